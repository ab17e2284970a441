mod gantt;
mod help;
mod helpers;
mod month;
mod theme;
mod week;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, ConfirmPopup};
use crate::projection::{ViewMode, period_label};
use theme::Theme;

use helpers::hex_to_color;

pub(crate) const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Renders the entire UI for a single frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(area);

    let header = Paragraph::new(Text::from(header_line(app)))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary())),
        );
    frame.render_widget(header, layout[0]);

    let inner_width = layout[1].width.saturating_sub(2);
    let body_text = match app.view {
        ViewMode::Month => month::build_month_text(app, inner_width),
        ViewMode::Week => week::build_week_text(app, inner_width),
        ViewMode::Gantt => gantt::build_gantt_text(app),
    };
    let body = Paragraph::new(body_text)
        .style(Style::default().fg(Theme::text()))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary()))
                .title(format!(" {} ", app.view.label())),
        );
    frame.render_widget(body, layout[1]);

    let footer = Paragraph::new(Text::from(vec![
        selected_project_line(app),
        status_line(app),
    ]))
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Theme::secondary())),
    );
    frame.render_widget(footer, layout[2]);

    if app.show_help {
        render_help_popup(frame);
    }
    if let Some(popup) = &app.confirm_popup {
        render_confirm_popup(frame, popup);
    }
}

fn header_line(app: &App) -> Line<'_> {
    let mut spans = vec![
        Span::styled(
            "  Crewboard  ",
            Style::default().fg(Color::Black).bg(Theme::primary()),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{:<24}", period_label(app.view, app.reference)),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        ),
    ];
    for view in ViewMode::ALL {
        spans.push(Span::raw("  "));
        let style = if view == app.view {
            Style::default()
                .fg(Color::Black)
                .bg(Theme::highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        };
        spans.push(Span::styled(format!(" {} ", view.label()), style));
    }
    Line::from(spans)
}

fn selected_project_line(app: &App) -> Line<'_> {
    let Some(project) = app.selected_project() else {
        return Line::from(Span::styled(
            "No projects in view.",
            Style::default().fg(Theme::dim()),
        ));
    };

    let (crew_name, crew_style) = match (project.crew(), app.store.crew_for(project)) {
        (_, Some(crew)) => (
            crew.name.clone(),
            Style::default().fg(hex_to_color(&crew.color).unwrap_or(Theme::text())),
        ),
        (Some(id), None) => (format!("unknown crew {id}"), Style::default().fg(Theme::warn())),
        (None, None) => ("unassigned".to_string(), Style::default().fg(Theme::dim())),
    };

    let mut spans = vec![
        Span::styled(
            project.name.as_str(),
            Style::default()
                .fg(Theme::text())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} → {}  ", project.start_date, project.end_date),
            Style::default().fg(Theme::secondary()),
        ),
        Span::styled(crew_name, crew_style),
    ];
    if let Some(location) = project.location.as_deref().filter(|l| !l.is_empty()) {
        spans.push(Span::styled(
            format!("  @ {location}"),
            Style::default().fg(Theme::dim()),
        ));
    }
    if let Some(notes) = project.notes.as_deref().filter(|n| !n.is_empty()) {
        spans.push(Span::styled(
            format!("  · {notes}"),
            Style::default().fg(Theme::dim()),
        ));
    }
    Line::from(spans)
}

fn status_line(app: &App) -> Line<'_> {
    match &app.status {
        Some(status) => Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Theme::warn()),
        )),
        None => Line::from(Span::styled(
            "←/→: Period  m/w/g: View  t: Today  ↑/↓: Select  d: Delete  ?: Help  q: Quit",
            Style::default().fg(Theme::dim()),
        )),
    }
}

fn render_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(help::build_help_text())
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary()))
                .title(" Help "),
        );
    frame.render_widget(popup, area);
}

fn render_confirm_popup(frame: &mut Frame, popup: &ConfirmPopup) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        "Delete project",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Are you sure you want to delete '{}'?", popup.project_name),
        Style::default().fg(Theme::text()),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Theme::dim())),
        Span::styled("Y", Style::default().fg(Theme::highlight()).add_modifier(Modifier::BOLD)),
        Span::styled(" to confirm or ", Style::default().fg(Theme::dim())),
        Span::styled("N", Style::default().fg(Theme::highlight()).add_modifier(Modifier::BOLD)),
        Span::styled("/", Style::default().fg(Theme::dim())),
        Span::styled("ESC", Style::default().fg(Theme::highlight()).add_modifier(Modifier::BOLD)),
        Span::styled(" to cancel", Style::default().fg(Theme::dim())),
    ]));

    let popup_widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::warn()))
                .title(" Confirm "),
        );
    frame.render_widget(popup_widget, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::db;
    use crate::types::Project;

    fn app_with(projects: Vec<Project>) -> App {
        let conn = db::init(":memory:").expect("in-memory db");
        let mut app = App::new(conn).expect("app loads");
        for project in projects {
            app.store.upsert_project(project);
        }
        app.reference = crate::dates::parse_date("2024-06-12").expect("valid date");
        app.today = app.reference;
        app
    }

    fn project(id: &str, name: &str, start: &str, end: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            location: Some("Route 9".to_string()),
            start_date: start.to_string(),
            end_date: end.to_string(),
            crew_id: Some("1".to_string()),
            notes: None,
        }
    }

    fn render(app: &App) -> String {
        let backend = TestBackend::new(160, 40);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn month_view_shows_period_and_project() {
        let app = app_with(vec![project("a", "Bridge", "2024-06-10", "2024-06-11")]);
        let screen = render(&app);
        assert!(screen.contains("June 2024"));
        assert!(screen.contains("Bridge"));
        assert!(screen.contains("Alpha Crew"));
    }

    #[test]
    fn gantt_view_shows_placeholder_when_month_is_empty() {
        let mut app = app_with(Vec::new());
        app.set_view(ViewMode::Gantt);
        let screen = render(&app);
        assert!(screen.contains("No projects this month"));
    }

    #[test]
    fn week_view_shows_range_label() {
        let mut app = app_with(vec![project("a", "Culvert", "2024-06-12", "2024-06-12")]);
        app.set_view(ViewMode::Week);
        let screen = render(&app);
        assert!(screen.contains("Jun 9 - Jun 15, 2024"));
        assert!(screen.contains("Culvert"));
    }

    #[test]
    fn dangling_crew_is_reported_in_detail_line() {
        let mut p = project("a", "Overlay", "2024-06-12", "2024-06-12");
        p.crew_id = Some("gone".to_string());
        let app = app_with(vec![p]);
        assert!(render(&app).contains("unknown crew gone"));
    }
}
