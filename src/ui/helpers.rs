use ratatui::style::Color;

pub fn clamp_name(value: &str, width: usize) -> String {
    let value_len = value.chars().count();
    if value_len <= width {
        return format!("{value:<width$}", width = width);
    }
    if width < 3 {
        return value.chars().take(width).collect();
    }
    let trimmed = value
        .chars()
        .take(width.saturating_sub(2))
        .collect::<String>();
    format!("{trimmed}..")
}

/// Parses `#RRGGBB` or `#RGB` into a terminal colour.
pub fn hex_to_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#').unwrap_or(value.trim());
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Color::Rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_name_pads_and_truncates() {
        assert_eq!(clamp_name("Road", 6), "Road  ");
        assert_eq!(clamp_name("Resurfacing", 6), "Resu..");
        assert_eq!(clamp_name("Resurfacing", 2), "Re");
    }

    #[test]
    fn hex_to_color_handles_short_and_long_forms() {
        assert_eq!(hex_to_color("#3b82f6"), Some(Color::Rgb(0x3b, 0x82, 0xf6)));
        assert_eq!(hex_to_color("#666"), Some(Color::Rgb(0x66, 0x66, 0x66)));
        assert_eq!(hex_to_color("#12"), None);
        assert_eq!(hex_to_color("#zzzzzz"), None);
    }
}
