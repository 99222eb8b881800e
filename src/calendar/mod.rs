//! Calendars and busy times as the view and the `/display` route see
//! them. Fetching them from an account happens behind
//! [`source::CalendarSource`].

pub mod busy;
pub mod events;
pub mod source;

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub use busy::{busy_times, is_busy};
pub use events::{EventInstance, EventResource, EventTime};
pub use source::{CalendarSource, SnapshotSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub summary: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub primary: bool,
}

/// An event instance occupying part of the selected window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyTime {
    pub summary: String,
    pub begin_datetime: DateTime<FixedOffset>,
    pub end_datetime: DateTime<FixedOffset>,
}

// Primary first, then selected, then unselected. Ties go by summary.
fn calendar_order(a: &Calendar, b: &Calendar) -> Ordering {
    b.primary
        .cmp(&a.primary)
        .then_with(|| b.selected.cmp(&a.selected))
        .then_with(|| a.summary.cmp(&b.summary))
}

pub fn sort_calendars(calendars: &mut [Calendar]) {
    calendars.sort_by(calendar_order);
}
