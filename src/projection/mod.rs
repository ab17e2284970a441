//! Projection of scheduled projects onto the board's three grid layouts.
//!
//! Every function here is a pure function of a reference date, the current
//! store and a [`GridLayout`](crate::config::GridLayout). Nothing is
//! rendered; the output is plain data for the terminal UI and the CLI.
mod gantt;
mod month;
mod week;

use chrono::NaiveDate;

use crate::dates;
use crate::types::Project;

pub use gantt::{GanttChart, GanttDay, GanttRow, GanttRows, gantt_chart, gantt_rows};
pub use month::{MonthCell, month_grid};
pub use week::{StackedProject, WeekColumn, week_grid};

/// Which grid the board is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Gantt,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Month, ViewMode::Week, ViewMode::Gantt];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Month => "Month",
            ViewMode::Week => "Week",
            ViewMode::Gantt => "Gantt",
        }
    }
}

/// Where a day sits inside a project's range. Lets a grid draw one
/// continuous bar across neighbouring day cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentRole {
    Single,
    Start,
    Middle,
    End,
}

/// A project placed on a single day cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedProject<'a> {
    pub project: &'a Project,
    pub role: SegmentRole,
    pub color: &'a str,
}

/// Every project whose inclusive range contains `date`, in store order.
/// Reversed and malformed ranges never match.
pub fn projects_for_date(date: NaiveDate, projects: &[Project]) -> Vec<&Project> {
    projects
        .iter()
        .filter(|project| project.contains(date))
        .collect()
}

pub fn segment_role(project: &Project, date: NaiveDate) -> SegmentRole {
    let day = dates::format_date(&date);
    if project.start_date == project.end_date {
        SegmentRole::Single
    } else if day == project.start_date {
        SegmentRole::Start
    } else if day == project.end_date {
        SegmentRole::End
    } else {
        SegmentRole::Middle
    }
}

/// Human readable title for the visible period.
pub fn period_label(view: ViewMode, reference: NaiveDate) -> String {
    match view {
        ViewMode::Week => {
            let start = dates::week_start(reference);
            let end = dates::add_days(start, 6);
            format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
        }
        ViewMode::Month | ViewMode::Gantt => reference.format("%B %Y").to_string(),
    }
}
