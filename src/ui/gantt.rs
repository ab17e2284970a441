use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, hex_to_color};
use super::theme::Theme;
use crate::app::App;
use crate::projection::{GanttRows, gantt_chart};

const LABEL_WIDTH: usize = 22;
const DAY_LETTERS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

pub fn build_gantt_text(app: &App) -> Text<'_> {
    let chart = gantt_chart(app.reference, &app.store, &app.layout);
    let day_width = app.layout.day_width.max(1) as usize;
    let total_width = chart.total_width as usize;
    let selected = app.selected_project().map(|project| project.id.as_str());
    let mut lines = Vec::new();

    let mut numbers = vec![Span::styled(
        clamp_name("Project", LABEL_WIDTH),
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    )];
    let mut letters = vec![Span::raw(" ".repeat(LABEL_WIDTH))];
    for day in &chart.days {
        let style = if day.is_weekend {
            Style::default().fg(Theme::dim())
        } else {
            Style::default().fg(Theme::text())
        };
        numbers.push(Span::styled(
            format!("{:>width$}", day.day, width = day_width),
            style,
        ));
        letters.push(Span::styled(
            format!(
                "{:>width$}",
                DAY_LETTERS[day.weekday.num_days_from_monday() as usize],
                width = day_width
            ),
            style,
        ));
    }
    lines.push(Line::from(numbers));
    lines.push(Line::from(letters));
    lines.push(Line::from(""));

    match &chart.rows {
        GanttRows::Empty => {
            lines.push(Line::from(Span::styled(
                "  No projects this month",
                Style::default().fg(Theme::dim()),
            )));
        }
        GanttRows::Rows(rows) => {
            for row in rows {
                let color = hex_to_color(row.color).unwrap_or(Theme::dim());
                let is_selected = selected == Some(row.project.id.as_str());
                let mut bar_style = Style::default().fg(Theme::on_bar()).bg(color);
                let mut label_style = Style::default().fg(Theme::text());
                if is_selected {
                    bar_style = bar_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                    label_style = label_style.add_modifier(Modifier::BOLD);
                }
                let left = row.left as usize;
                let right = (left + row.width as usize).min(total_width);
                lines.push(Line::from(vec![
                    Span::styled("● ", Style::default().fg(color)),
                    Span::styled(
                        clamp_name(&row.project.name, LABEL_WIDTH - 2),
                        label_style,
                    ),
                    Span::styled(track(0, left, day_width), Style::default().fg(Theme::dim())),
                    Span::styled(clamp_name(&row.project.name, right - left), bar_style),
                    Span::styled(
                        track(right, total_width, day_width),
                        Style::default().fg(Theme::dim()),
                    ),
                ]));
            }
        }
    }

    Text::from(lines)
}

/// Empty timeline between `from` and `to`, dotted at each day boundary.
fn track(from: usize, to: usize, day_width: usize) -> String {
    (from..to)
        .map(|position| if position % day_width == day_width - 1 { '·' } else { ' ' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_marks_day_boundaries() {
        assert_eq!(track(0, 6, 3), "  ·  ·");
        assert_eq!(track(4, 6, 3), " ·");
        assert_eq!(track(5, 5, 3), "");
    }
}
