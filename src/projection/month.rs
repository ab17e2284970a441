use chrono::{Datelike, NaiveDate};

use super::{PlacedProject, projects_for_date, segment_role};
use crate::config::MONTH_GRID_CELLS;
use crate::dates;
use crate::store::Store;

/// One day of the six-week month grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthCell<'a> {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub projects: Vec<PlacedProject<'a>>,
}

/// Builds the fixed 42-cell grid for the month of `reference`, starting on
/// the Sunday on or before the 1st.
pub fn month_grid(reference: NaiveDate, today: NaiveDate, store: &Store) -> Vec<MonthCell<'_>> {
    let first = dates::week_start(dates::month_start(reference));
    (0..MONTH_GRID_CELLS)
        .map(|offset| {
            let date = dates::add_days(first, offset as i64);
            let projects = projects_for_date(date, store.projects())
                .into_iter()
                .map(|project| PlacedProject {
                    project,
                    role: segment_role(project, date),
                    color: store.project_color(project),
                })
                .collect();
            MonthCell {
                date,
                in_month: date.month() == reference.month() && date.year() == reference.year(),
                is_today: dates::is_same_day(&date, &today),
                projects,
            }
        })
        .collect()
}
