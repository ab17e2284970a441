use chrono::Datelike;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, hex_to_color};
use super::theme::Theme;
use super::WEEKDAY_NAMES;
use crate::app::App;
use crate::config::DAYS_PER_WEEK;
use crate::projection::week_grid;

pub fn build_week_text(app: &App, width: u16) -> Text<'_> {
    let column_width = (usize::from(width) / DAYS_PER_WEEK).max(4);
    let columns = week_grid(app.reference, app.today, &app.store, &app.layout);
    let selected = app.selected_project().map(|project| project.id.as_str());
    let mut lines = Vec::new();

    lines.push(Line::from(
        columns
            .iter()
            .zip(WEEKDAY_NAMES)
            .map(|(column, name)| {
                let style = if column.is_today {
                    Style::default()
                        .fg(Theme::on_bar())
                        .bg(Theme::today())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Theme::secondary())
                        .add_modifier(Modifier::BOLD)
                };
                Span::styled(
                    clamp_name(&format!("{name} {}", column.date.day()), column_width),
                    style,
                )
            })
            .collect::<Vec<_>>(),
    ));
    lines.push(Line::from(Span::styled(
        "-".repeat(column_width * DAYS_PER_WEEK),
        Style::default().fg(Theme::dim()),
    )));

    let depth = columns
        .iter()
        .flat_map(|column| column.projects.iter())
        .map(|stacked| stacked.top + stacked.height)
        .max()
        .unwrap_or(0);
    if depth == 0 {
        lines.push(Line::from(Span::styled(
            "  No projects this week.",
            Style::default().fg(Theme::dim()),
        )));
        return Text::from(lines);
    }

    for row in 0..depth {
        let mut spans = Vec::new();
        for column in &columns {
            let stacked = column
                .projects
                .iter()
                .find(|stacked| stacked.top <= row && row < stacked.top + stacked.height);
            match stacked {
                Some(stacked) => {
                    let bg = hex_to_color(stacked.color).unwrap_or(Theme::dim());
                    let mut style = Style::default().fg(Theme::on_bar()).bg(bg);
                    if selected == Some(stacked.project.id.as_str()) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                    }
                    spans.push(Span::styled(
                        clamp_name(&stacked.project.name, column_width.saturating_sub(1)),
                        style,
                    ));
                    spans.push(Span::raw(" "));
                }
                None => spans.push(Span::raw(" ".repeat(column_width))),
            }
        }
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}
