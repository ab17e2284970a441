use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;

pub fn build_help_text() -> Text<'static> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "Key bindings",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(section_title("Global"));
    lines.extend(section_lines(&[
        "q: Quit",
        "?: Toggle help",
        "r: Reload board from disk",
        "esc: Clear status",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Views"));
    lines.extend(section_lines(&[
        "m/w/g: Month, week or Gantt view",
        "Tab: Next view",
        "Left/Right or h/l: Previous/next period",
        "t: Jump to today",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Projects"));
    lines.extend(section_lines(&[
        "Up/Down or k/j: Select a visible project",
        "d: Delete selected project (asks first)",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Editing"));
    lines.extend(section_lines(&[
        "crewboard project add|edit|delete|list",
        "crewboard crew add|edit|delete|list|member",
    ]));

    Text::from(lines)
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    ))
}

fn section_lines(items: &[&str]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(Span::styled(
                format!("  - {item}"),
                Style::default().fg(Theme::text()),
            ))
        })
        .collect()
}
