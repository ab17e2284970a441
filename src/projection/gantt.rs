use chrono::{Datelike, NaiveDate, Weekday};

use crate::config::GridLayout;
use crate::dates;
use crate::store::Store;
use crate::types::Project;

/// Header entry for one day of the Gantt month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GanttDay {
    pub day: u32,
    pub weekday: Weekday,
    pub is_weekend: bool,
}

/// A project's bar, clamped to the visible month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GanttRow<'a> {
    pub project: &'a Project,
    pub color: &'a str,
    /// First visible day-of-month (1-based).
    pub display_start: u32,
    /// Last visible day-of-month (1-based, inclusive).
    pub display_end: u32,
    pub left: u32,
    pub width: u32,
}

/// Rows of a Gantt month. `Empty` is a normal state, drawn as a placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GanttRows<'a> {
    Empty,
    Rows(Vec<GanttRow<'a>>),
}

impl<'a> GanttRows<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, GanttRows::Empty)
    }

    pub fn rows(&self) -> &[GanttRow<'a>] {
        match self {
            GanttRows::Empty => &[],
            GanttRows::Rows(rows) => rows.as_slice(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GanttChart<'a> {
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub days: Vec<GanttDay>,
    /// Width of the whole timeline in layout units.
    pub total_width: u32,
    pub rows: GanttRows<'a>,
}

/// One row per project overlapping the month of `reference`, in store order.
pub fn gantt_rows<'a>(reference: NaiveDate, store: &'a Store, layout: &GridLayout) -> GanttRows<'a> {
    let month_start = dates::month_start(reference);
    let month_end = dates::month_end(reference);

    let rows: Vec<GanttRow<'a>> = store
        .projects()
        .iter()
        .filter_map(|project| {
            let (start, end) = project.span()?;
            if start > month_end || end < month_start {
                return None;
            }
            let display_start = start.max(month_start).day();
            let display_end = end.min(month_end).day();
            let days = display_end - display_start + 1;
            Some(GanttRow {
                project,
                color: store.project_color(project),
                display_start,
                display_end,
                left: (display_start - 1) * layout.day_width,
                width: (days * layout.day_width).saturating_sub(layout.bar_gap),
            })
        })
        .collect();

    if rows.is_empty() {
        GanttRows::Empty
    } else {
        GanttRows::Rows(rows)
    }
}

pub fn gantt_chart<'a>(reference: NaiveDate, store: &'a Store, layout: &GridLayout) -> GanttChart<'a> {
    let month_start = dates::month_start(reference);
    let days_in_month = dates::days_in_month(reference);
    let days = (0..days_in_month)
        .map(|offset| {
            let date = dates::add_days(month_start, i64::from(offset));
            let weekday = date.weekday();
            GanttDay {
                day: offset + 1,
                weekday,
                is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
            }
        })
        .collect();

    GanttChart {
        month_start,
        month_end: dates::month_end(reference),
        days,
        total_width: days_in_month * layout.day_width,
        rows: gantt_rows(reference, store, layout),
    }
}
