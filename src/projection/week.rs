use chrono::NaiveDate;

use super::projects_for_date;
use crate::config::{DAYS_PER_WEEK, GridLayout};
use crate::dates;
use crate::store::Store;
use crate::types::Project;

/// A project stacked inside a week column. Stacking follows store order
/// only; there is no overlap resolution, so crowded days overflow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackedProject<'a> {
    pub project: &'a Project,
    pub color: &'a str,
    pub stack_index: usize,
    pub top: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekColumn<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub projects: Vec<StackedProject<'a>>,
}

/// Seven day columns starting at the Sunday of `reference`'s week.
pub fn week_grid<'a>(
    reference: NaiveDate,
    today: NaiveDate,
    store: &'a Store,
    layout: &GridLayout,
) -> Vec<WeekColumn<'a>> {
    let start = dates::week_start(reference);
    (0..DAYS_PER_WEEK)
        .map(|offset| {
            let date = dates::add_days(start, offset as i64);
            let projects = projects_for_date(date, store.projects())
                .into_iter()
                .enumerate()
                .map(|(stack_index, project)| StackedProject {
                    project,
                    color: store.project_color(project),
                    stack_index,
                    top: layout.stack_top + stack_index as u32 * layout.stack_offset,
                    height: layout.stack_height,
                })
                .collect();
            WeekColumn {
                date,
                is_today: dates::is_same_day(&date, &today),
                projects,
            }
        })
        .collect()
}
