//! Event resources in the shape Google Calendar returns them, and the
//! flattened instance the busy-time filter works on.

use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

const LAST_MINUTE: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: Option<DateTime<FixedOffset>>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResource {
    pub id: String,
    pub summary: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub transparency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInstance {
    pub id: String,
    pub summary: String,
    pub begin: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

fn at(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    date.and_time(time)
        .and_local_timezone(offset)
        .single()
        .ok_or(anyhow!("{} {} does not exist at {}", date, time, offset))
}

impl EventResource {
    /// Transparent events don't block time.
    pub fn is_transparent(&self) -> bool {
        self.transparency.as_deref() == Some("transparent")
    }

    /// Flatten into an instance with concrete begin and end.
    ///
    /// All-day events are given in dates with an exclusive end, so they
    /// run from 00:00 of the first day to 23:59 of the last day in
    /// `offset`.
    pub fn to_instance(&self, offset: FixedOffset) -> Result<EventInstance> {
        let summary = self
            .summary
            .clone()
            .unwrap_or_else(|| "No title".to_string());

        let (begin, end) = match (&self.start, &self.end) {
            (
                EventTime {
                    date_time: Some(begin),
                    ..
                },
                EventTime {
                    date_time: Some(end),
                    ..
                },
            ) => (*begin, *end),
            (
                EventTime {
                    date: Some(first), ..
                },
                EventTime {
                    date: Some(after_last),
                    ..
                },
            ) => {
                let last = after_last.pred_opt().unwrap_or(*first).max(*first);
                (
                    at(*first, NaiveTime::MIN, offset)?,
                    at(last, LAST_MINUTE, offset)?,
                )
            }
            _ => {
                return Err(anyhow!(
                    "Event {} has no specified start and end time or date",
                    self.id
                ));
            }
        };

        Ok(EventInstance {
            id: self.id.clone(),
            summary,
            begin,
            end,
        })
    }
}
