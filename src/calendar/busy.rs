//! Decide which event instances are busy times within the daily
//! window. Instances handed in are already restricted to the date
//! span; this only checks the time of day on each date an instance
//! covers.

use chrono::{DateTime, FixedOffset, NaiveDate};

use super::{BusyTime, EventInstance};
use crate::window::TimeWindow;

/// The window on every date from `first` to `last`, inclusive, in
/// `offset`.
fn daily_windows(
    first: NaiveDate,
    last: NaiveDate,
    window: &TimeWindow,
    offset: FixedOffset,
) -> Vec<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    first
        .iter_days()
        .take_while(|day| *day <= last)
        .filter_map(|day| {
            let begin = day.and_time(window.begin()).and_local_timezone(offset).single()?;
            let end = day.and_time(window.end()).and_local_timezone(offset).single()?;
            Some((begin, end))
        })
        .collect()
}

/// An instance is busy if it overlaps the window on any date it
/// spans.
pub fn is_busy(instance: &EventInstance, window: &TimeWindow) -> bool {
    let offset = *instance.begin.offset();
    let first = instance.begin.date_naive();
    let last = instance.end.with_timezone(&offset).date_naive();

    daily_windows(first, last, window, offset)
        .into_iter()
        .any(|(begin, end)| {
            let busy = instance.end >= begin && instance.begin <= end;
            tracing::debug!(
                "{} {} a busy time within {} and {} on {}",
                instance.summary,
                if busy { "is" } else { "is NOT" },
                window.begin().format("%H:%M"),
                window.end().format("%H:%M"),
                begin.format("%Y-%m-%d")
            );
            busy
        })
}

/// Keep the busy instances, in the order given.
pub fn busy_times(instances: Vec<EventInstance>, window: &TimeWindow) -> Vec<BusyTime> {
    instances
        .into_iter()
        .filter(|instance| is_busy(instance, window))
        .map(|instance| BusyTime {
            summary: instance.summary,
            begin_datetime: instance.begin,
            end_datetime: instance.end,
        })
        .collect()
}
