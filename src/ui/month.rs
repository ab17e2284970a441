use chrono::{Datelike, Weekday};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, hex_to_color};
use super::theme::Theme;
use super::WEEKDAY_NAMES;
use crate::app::App;
use crate::config::DAYS_PER_WEEK;
use crate::projection::{PlacedProject, SegmentRole, month_grid};

/// Projects drawn per day cell before collapsing into "+N more".
const MAX_CELL_PROJECTS: usize = 3;

pub fn build_month_text(app: &App, width: u16) -> Text<'_> {
    let cell_width = (usize::from(width) / DAYS_PER_WEEK).max(4);
    let cells = month_grid(app.reference, app.today, &app.store);
    let selected = app.selected_project().map(|project| project.id.as_str());
    let mut lines = Vec::new();

    lines.push(Line::from(
        WEEKDAY_NAMES
            .iter()
            .map(|name| {
                Span::styled(
                    clamp_name(name, cell_width),
                    Style::default()
                        .fg(Theme::secondary())
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect::<Vec<_>>(),
    ));

    for week in cells.chunks(DAYS_PER_WEEK) {
        lines.push(Line::from(
            week.iter()
                .map(|cell| {
                    let style = if cell.is_today {
                        Style::default()
                            .fg(Theme::on_bar())
                            .bg(Theme::today())
                            .add_modifier(Modifier::BOLD)
                    } else if cell.in_month {
                        Style::default().fg(Theme::text())
                    } else {
                        Style::default().fg(Theme::dim())
                    };
                    Span::styled(
                        clamp_name(&format!("{:>2}", cell.date.day()), cell_width),
                        style,
                    )
                })
                .collect::<Vec<_>>(),
        ));

        let depth = week
            .iter()
            .map(|cell| cell.projects.len())
            .max()
            .unwrap_or(0)
            .min(MAX_CELL_PROJECTS);
        for slot in 0..depth {
            let mut spans = Vec::new();
            for cell in week {
                let overflow = cell.projects.len() > MAX_CELL_PROJECTS;
                match cell.projects.get(slot) {
                    Some(_) if overflow && slot + 1 == MAX_CELL_PROJECTS => {
                        let hidden = cell.projects.len() - slot;
                        spans.push(Span::styled(
                            clamp_name(&format!(" +{hidden} more"), cell_width),
                            Style::default().fg(Theme::dim()),
                        ));
                    }
                    Some(placed) => {
                        let show_label = matches!(placed.role, SegmentRole::Single | SegmentRole::Start)
                            || cell.date.weekday() == Weekday::Sun;
                        spans.extend(segment_spans(placed, cell_width, show_label, selected));
                    }
                    None => spans.push(Span::raw(" ".repeat(cell_width))),
                }
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }

    Text::from(lines)
}

/// One cell's slice of a project bar. Start and end caps leave a blank
/// column so consecutive cells read as one continuous bar.
fn segment_spans(
    placed: &PlacedProject<'_>,
    width: usize,
    show_label: bool,
    selected: Option<&str>,
) -> Vec<Span<'static>> {
    let bg = hex_to_color(placed.color).unwrap_or(Theme::dim());
    let mut style = Style::default().fg(Theme::on_bar()).bg(bg);
    if selected == Some(placed.project.id.as_str()) {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    let (lead, trail) = match placed.role {
        SegmentRole::Single => (1, 1),
        SegmentRole::Start => (1, 0),
        SegmentRole::Middle => (0, 0),
        SegmentRole::End => (0, 1),
    };
    let inner = width.saturating_sub(lead + trail);
    let label = if show_label {
        clamp_name(&placed.project.name, inner)
    } else {
        " ".repeat(inner)
    };
    vec![
        Span::raw(" ".repeat(lead)),
        Span::styled(label, style),
        Span::raw(" ".repeat(trail)),
    ]
}
