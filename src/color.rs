/// Color utilities for crews and UI.
use rand::RngExt;

/// Validate if a string is a valid hex color (#RGB or #RRGGBB).
pub fn is_valid_hex(s: &str) -> bool {
    s.starts_with('#')
        && (s.len() == 7 || s.len() == 4)
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Generate a random #RRGGBB color for a new crew.
pub fn random_color() -> String {
    let mut rng = rand::rng();
    let value: u32 = rng.random_range(0..0x100_0000);
    format!("#{value:06x}")
}
