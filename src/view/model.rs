use chrono::NaiveDate;
use serde::Serialize;

use super::ViewState;
use crate::calendar::{BusyTime, Calendar};
use crate::window::{CannedRange, canned_ranges, format_hhmm, submit_allowed};

pub const CALENDARS_PER_ROW: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarOption {
    pub id: String,
    pub summary: String,
}

/// Everything the template reads, already formatted and grouped.
#[derive(Debug, Serialize)]
pub struct PageModel<'a> {
    pub begin_time: String,
    pub end_time: String,
    pub daterange: &'a str,
    pub ranges: Vec<CannedRange>,
    pub submit_disabled: bool,
    pub authorized: bool,
    pub calendar_rows: Vec<Vec<CalendarOption>>,
    pub busy_times: &'a [BusyTime],
}

/// Selected calendars only, in rows of three.
pub fn calendar_rows(calendars: &[Calendar]) -> Vec<Vec<CalendarOption>> {
    let options: Vec<CalendarOption> = calendars
        .iter()
        .filter(|c| c.selected)
        .map(|c| CalendarOption {
            id: c.id.clone(),
            summary: c.summary.clone(),
        })
        .collect();
    options
        .chunks(CALENDARS_PER_ROW)
        .map(|row| row.to_vec())
        .collect()
}

impl<'a> PageModel<'a> {
    pub fn new(state: &'a ViewState, today: NaiveDate) -> Self {
        Self {
            begin_time: state.begin_time.map(format_hhmm).unwrap_or_default(),
            end_time: state.end_time.map(format_hhmm).unwrap_or_default(),
            daterange: state.daterange.as_deref().unwrap_or_default(),
            ranges: canned_ranges(today),
            submit_disabled: !submit_allowed(state.begin_time, state.end_time),
            authorized: state.calendars.is_some(),
            calendar_rows: state
                .calendars
                .as_deref()
                .map(calendar_rows)
                .unwrap_or_default(),
            busy_times: &state.busy_times,
        }
    }
}
