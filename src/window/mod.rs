//! The daily time window and date span a user searches for busy
//! times in. The begin-before-end rule lives here so the page script
//! and the `/setdata` handler agree on what is submittable.

pub mod parse;
pub mod ranges;

use chrono::{NaiveDate, NaiveTime, Timelike};
use thiserror::Error;

pub use parse::{interpret_date, interpret_daterange, interpret_time};
pub use ranges::{CannedRange, canned_ranges};

/// Format used for the date range label, e.g. `01/31/2024`
pub const DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("Time '{0}' didn't match accepted formats 13:30 or 1:30pm")]
    Time(String),
    #[error("Date '{0}' didn't fit expected format 12/31/2001")]
    Date(String),
    #[error("Date range '{0}' didn't fit expected format 12/01/2001 - 12/31/2001")]
    DateRange(String),
    #[error("Begin time {begin} must be before end time {end}")]
    EmptyWindow { begin: String, end: String },
    #[error("End date {end} is before begin date {begin}")]
    ReversedDates { begin: NaiveDate, end: NaiveDate },
}

/// Minutes since midnight, the canonical form both times are compared
/// in.
pub fn minutes(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Whether the form may be submitted with this begin/end pair.
///
/// Submission requires both times and `begin < end`. Equal times are
/// rejected. An unset field also disables submission.
pub fn submit_allowed(begin: Option<NaiveTime>, end: Option<NaiveTime>) -> bool {
    match (begin, end) {
        (Some(begin), Some(end)) => minutes(begin) < minutes(end),
        _ => false,
    }
}

/// Format a time of day the way the `time` inputs expect it.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

const fn on_the_hour(hour: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, 0, 0) {
        Some(time) => time,
        None => NaiveTime::MIN,
    }
}

/// A validated daily window, `begin` strictly before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    begin: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    pub fn new(begin: NaiveTime, end: NaiveTime) -> Result<Self, WindowError> {
        if !submit_allowed(Some(begin), Some(end)) {
            return Err(WindowError::EmptyWindow {
                begin: format_hhmm(begin),
                end: format_hhmm(end),
            });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> NaiveTime {
        self.begin
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }
}

impl Default for TimeWindow {
    /// 9am to 5pm
    fn default() -> Self {
        Self {
            begin: on_the_hour(9),
            end: on_the_hour(17),
        }
    }
}

/// An inclusive span of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if end < begin {
            return Err(WindowError::ReversedDates { begin, end });
        }
        Ok(Self { begin, end })
    }

    /// The label shown in the `daterange` input.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.begin.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}
