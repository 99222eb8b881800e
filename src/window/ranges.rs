//! Canned date ranges offered next to the `daterange` input. Weeks
//! start on Sunday.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::DateSpan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CannedRange {
    pub name: &'static str,
    pub label: String,
}

fn span(begin: NaiveDate, end: NaiveDate) -> DateSpan {
    DateSpan { begin, end }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

/// Resolve every canned range against `today`.
pub fn canned_ranges(today: NaiveDate) -> Vec<CannedRange> {
    let since_sunday = u64::from(today.weekday().num_days_from_sunday());
    let tomorrow = today + Days::new(1);
    let saturday = today + Days::new(6 - since_sunday);
    let next_sunday = today + Days::new(7 - since_sunday);

    [
        ("Today", span(today, today)),
        ("Tomorrow", span(tomorrow, tomorrow)),
        ("This week", span(today, saturday)),
        ("Next week", span(next_sunday, next_sunday + Days::new(6))),
        ("This month", span(today, last_day_of_month(today))),
        ("Within two weeks", span(today, today + Days::new(15))),
    ]
    .into_iter()
    .map(|(name, span)| CannedRange {
        name,
        label: span.label(),
    })
    .collect()
}
