use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::KeyCode;
use log::{error, info};
use rusqlite::Connection;

use crate::config::{GridLayout, MONTH_GRID_CELLS};
use crate::dates;
use crate::db;
use crate::projection::ViewMode;
use crate::store::Store;
use crate::types::{Project, ProjectId};

use super::AppEvent;

/// The top-level application state. Owns the store and everything the
/// board needs to project it: the view mode and the reference date.
pub struct App {
    pub running: bool,
    pub db: Connection,
    pub store: Store,
    pub view: ViewMode,
    pub reference: NaiveDate,
    pub today: NaiveDate,
    pub layout: GridLayout,
    pub selected_project_index: usize,
    pub status: Option<String>,
    pub show_help: bool,
    pub confirm_popup: Option<ConfirmPopup>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmPopup {
    pub project_id: ProjectId,
    pub project_name: String,
}

impl App {
    pub fn new(db: Connection) -> Result<Self> {
        let store = db::load_store(&db)?;
        let today = dates::today();
        Ok(Self {
            running: true,
            db,
            store,
            view: ViewMode::Month,
            reference: today,
            today,
            layout: GridLayout::terminal(),
            selected_project_index: 0,
            status: None,
            show_help: false,
            confirm_popup: None,
        })
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.today = dates::today(),
            AppEvent::KeyPress(key) => self.handle_key(key),
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.confirm_popup.is_some() {
            self.handle_confirm_key(key);
            return;
        }
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Left | KeyCode::Char('h') => self.navigate(-1),
            KeyCode::Right | KeyCode::Char('l') => self.navigate(1),
            KeyCode::Char('t') => self.go_to_today(),
            KeyCode::Char('m') => self.set_view(ViewMode::Month),
            KeyCode::Char('w') => self.set_view(ViewMode::Week),
            KeyCode::Char('g') => self.set_view(ViewMode::Gantt),
            KeyCode::Tab => self.cycle_view(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Char('d') => self.open_confirm_popup(),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Esc => self.clear_status(),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(popup) = self.confirm_popup.take() {
                    self.delete_project(&popup.project_id);
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => self.confirm_popup = None,
            _ => {}
        }
    }

    /// Month and Gantt views step by calendar months, the week view by
    /// seven days.
    pub fn navigate(&mut self, direction: i32) {
        self.reference = match self.view {
            ViewMode::Month | ViewMode::Gantt => dates::shift_months(self.reference, direction),
            ViewMode::Week => dates::add_days(self.reference, i64::from(direction) * 7),
        };
        self.clamp_selection();
    }

    pub fn go_to_today(&mut self) {
        self.today = dates::today();
        self.reference = self.today;
        self.clamp_selection();
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
        self.clamp_selection();
    }

    fn cycle_view(&mut self) {
        let index = ViewMode::ALL
            .iter()
            .position(|view| *view == self.view)
            .unwrap_or(0);
        self.set_view(ViewMode::ALL[(index + 1) % ViewMode::ALL.len()]);
    }

    /// First and last day the current view shows.
    pub fn visible_window(&self) -> (NaiveDate, NaiveDate) {
        match self.view {
            ViewMode::Month => {
                let first = dates::week_start(dates::month_start(self.reference));
                (first, dates::add_days(first, MONTH_GRID_CELLS as i64 - 1))
            }
            ViewMode::Week => {
                let first = dates::week_start(self.reference);
                (first, dates::add_days(first, 6))
            }
            ViewMode::Gantt => (
                dates::month_start(self.reference),
                dates::month_end(self.reference),
            ),
        }
    }

    /// Projects overlapping the visible window, in store order.
    pub fn visible_projects(&self) -> Vec<&Project> {
        let (first, last) = self.visible_window();
        self.store
            .projects()
            .iter()
            .filter(|project| {
                project
                    .span()
                    .map(|(start, end)| start <= last && end >= first)
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.visible_projects()
            .get(self.selected_project_index)
            .copied()
    }

    fn move_selection_up(&mut self) {
        let count = self.visible_projects().len();
        if count == 0 {
            return;
        }
        if self.selected_project_index == 0 {
            self.selected_project_index = count - 1;
        } else {
            self.selected_project_index -= 1;
        }
    }

    fn move_selection_down(&mut self) {
        let count = self.visible_projects().len();
        if count == 0 {
            return;
        }
        self.selected_project_index = (self.selected_project_index + 1) % count;
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_projects().len();
        if self.selected_project_index >= count {
            self.selected_project_index = count.saturating_sub(1);
        }
    }

    fn open_confirm_popup(&mut self) {
        let popup = self.selected_project().map(|project| ConfirmPopup {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
        });
        if popup.is_none() {
            self.status = Some("No project selected.".to_string());
        }
        self.confirm_popup = popup;
    }

    fn delete_project(&mut self, id: &str) {
        match self.store.delete_project(id) {
            Some(project) => {
                self.status = Some(format!("Deleted '{}'.", project.name));
                self.persist();
            }
            None => self.status = Some(format!("Project {id} no longer exists.")),
        }
        self.clamp_selection();
    }

    /// Saves the store right after a mutation.
    fn persist(&mut self) {
        if let Err(err) = db::save_store(&self.store, &self.db) {
            error!("event=store_save_failed error={err:#}");
            self.status = Some(format!("Save failed: {err}"));
        }
    }

    fn reload(&mut self) {
        match db::load_store(&self.db) {
            Ok(store) => {
                self.store = store;
                self.status = Some("Reloaded.".to_string());
                info!("event=store_reloaded");
            }
            Err(err) => {
                error!("event=store_reload_failed error={err:#}");
                self.status = Some(format!("Reload failed: {err}"));
            }
        }
        self.clamp_selection();
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        dates::parse_date(value).expect("test date should parse")
    }

    fn project(id: &str, start: &str, end: &str) -> Project {
        Project {
            id: id.to_string(),
            name: format!("Project {id}"),
            location: None,
            start_date: start.to_string(),
            end_date: end.to_string(),
            crew_id: Some("1".to_string()),
            notes: None,
        }
    }

    fn app_with(projects: Vec<Project>) -> App {
        let conn = db::init(":memory:").expect("in-memory db");
        let mut store = Store::seeded();
        for project in projects {
            store.upsert_project(project);
        }
        db::save_store(&store, &conn).expect("seed db");
        let mut app = App::new(conn).expect("app loads");
        app.reference = date("2024-06-12");
        app.today = date("2024-06-12");
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        app.update(AppEvent::KeyPress(key));
    }

    #[test]
    fn month_navigation_steps_by_calendar_month() {
        let mut app = app_with(Vec::new());
        app.reference = date("2024-01-31");
        press(&mut app, KeyCode::Right);
        assert_eq!(app.reference, date("2024-02-29"));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.reference, date("2024-01-29"));
    }

    #[test]
    fn week_navigation_steps_by_seven_days() {
        let mut app = app_with(Vec::new());
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.view, ViewMode::Week);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.reference, date("2024-06-19"));
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.reference, date("2024-06-05"));
    }

    #[test]
    fn gantt_navigation_steps_by_month() {
        let mut app = app_with(Vec::new());
        app.set_view(ViewMode::Gantt);
        app.navigate(1);
        assert_eq!(app.reference, date("2024-07-12"));
    }

    #[test]
    fn tab_cycles_through_views() {
        let mut app = app_with(Vec::new());
        let mut seen = Vec::new();
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
            seen.push(app.view);
        }
        assert_eq!(seen, [ViewMode::Week, ViewMode::Gantt, ViewMode::Month]);
    }

    #[test]
    fn visible_projects_follow_the_view_window() {
        let mut app = app_with(vec![
            project("june", "2024-06-12", "2024-06-13"),
            project("lead", "2024-05-27", "2024-05-27"),
            project("far", "2024-09-01", "2024-09-02"),
        ]);
        let ids = |app: &App| -> Vec<String> {
            app.visible_projects().iter().map(|p| p.id.clone()).collect()
        };
        assert_eq!(ids(&app), ["june", "lead"]);
        app.set_view(ViewMode::Gantt);
        assert_eq!(ids(&app), ["june"]);
        app.set_view(ViewMode::Week);
        assert_eq!(ids(&app), ["june"]);
    }

    #[test]
    fn selection_wraps() {
        let mut app = app_with(vec![
            project("a", "2024-06-10", "2024-06-11"),
            project("b", "2024-06-12", "2024-06-13"),
        ]);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_project().map(|p| p.id.as_str()), Some("b"));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_project().map(|p| p.id.as_str()), Some("a"));
    }

    #[test]
    fn delete_requires_confirmation_and_persists() {
        let mut app = app_with(vec![
            project("a", "2024-06-10", "2024-06-11"),
            project("b", "2024-06-12", "2024-06-13"),
        ]);

        press(&mut app, KeyCode::Char('d'));
        assert!(app.confirm_popup.is_some());
        press(&mut app, KeyCode::Char('n'));
        assert!(app.confirm_popup.is_none());
        assert_eq!(app.store.projects().len(), 2);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store.projects().len(), 1);
        assert!(app.store.project("a").is_none());

        let reloaded = db::load_store(&app.db).expect("reload");
        assert_eq!(reloaded, app.store);
    }

    #[test]
    fn delete_without_selection_sets_status() {
        let mut app = app_with(Vec::new());
        press(&mut app, KeyCode::Char('d'));
        assert!(app.confirm_popup.is_none());
        assert!(app.status.is_some());
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app_with(Vec::new());
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.reference, date("2024-06-12"));
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn reload_picks_up_external_writes() {
        let mut app = app_with(Vec::new());
        let mut other = app.store.clone();
        other.upsert_project(project("x", "2024-06-12", "2024-06-12"));
        db::save_store(&other, &app.db).expect("external write");
        press(&mut app, KeyCode::Char('r'));
        assert!(app.store.project("x").is_some());
    }
}
