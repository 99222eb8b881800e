//! Where calendars and events come from. The account-backed source
//! lives outside this crate; `SnapshotSource` serves a JSON export in
//! the same shape so the view works end to end without one.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::Deserialize;

use super::{BusyTime, Calendar, EventResource, busy_times, sort_calendars};
use crate::window::{DateSpan, TimeWindow};

#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Every calendar on the account, in no particular order.
    async fn list_calendars(&self) -> Result<Vec<Calendar>>;

    /// Events on `calendar_id` overlapping `[time_min, time_max]`.
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> Result<Vec<EventResource>>;
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarSnapshot {
    pub calendars: Vec<Calendar>,
    #[serde(default)]
    pub events: HashMap<String, Vec<EventResource>>,
}

pub struct SnapshotSource {
    snapshot: CalendarSnapshot,
    offset: FixedOffset,
}

impl SnapshotSource {
    pub fn new(snapshot: CalendarSnapshot, offset: FixedOffset) -> Self {
        Self { snapshot, offset }
    }

    pub async fn load(path: impl AsRef<Path>, offset: FixedOffset) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read snapshot {}: {}", path.display(), e))?;
        let snapshot: CalendarSnapshot = serde_json::from_str(&text)?;
        tracing::debug!(
            "Loaded snapshot {} with {} calendars",
            path.display(),
            snapshot.calendars.len()
        );
        Ok(Self::new(snapshot, offset))
    }
}

#[async_trait]
impl CalendarSource for SnapshotSource {
    async fn list_calendars(&self) -> Result<Vec<Calendar>> {
        Ok(self.snapshot.calendars.clone())
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<FixedOffset>,
        time_max: DateTime<FixedOffset>,
    ) -> Result<Vec<EventResource>> {
        let Some(events) = self.snapshot.events.get(calendar_id) else {
            // Listed calendars without an events entry just have no events
            if self.snapshot.calendars.iter().any(|c| c.id == calendar_id) {
                tracing::debug!("No events exported for {}", calendar_id);
                return Ok(vec![]);
            }
            return Err(anyhow!("Calendar {} not found", calendar_id));
        };

        let mut found = Vec::new();
        for event in events {
            let instance = event.to_instance(self.offset)?;
            if instance.end >= time_min && instance.begin <= time_max {
                found.push(event.clone());
            }
        }
        Ok(found)
    }
}

/// Calendars from the source, primary and selected first.
pub async fn list_calendars(source: &dyn CalendarSource) -> Result<Vec<Calendar>> {
    tracing::debug!("Listing calendars");
    let mut calendars = source.list_calendars().await?;
    sort_calendars(&mut calendars);
    Ok(calendars)
}

/// Busy times on the selected calendars within `window` on each date
/// in `span`. Transparent events are skipped.
pub async fn find_busy_times(
    source: &dyn CalendarSource,
    selected: &[String],
    span: &DateSpan,
    window: &TimeWindow,
    offset: FixedOffset,
) -> Result<Vec<BusyTime>> {
    let bound = |date: NaiveDate, time: NaiveTime| {
        date.and_time(time)
            .and_local_timezone(offset)
            .single()
            .ok_or(anyhow!("{} {} does not exist at {}", date, time, offset))
    };
    let time_min = bound(span.begin, window.begin())?;
    let time_max = bound(span.end, window.end())?;

    let mut instances = Vec::new();
    for calendar_id in selected {
        let events = source.list_events(calendar_id, time_min, time_max).await?;
        tracing::debug!("Events found on {}: {}", calendar_id, events.len());
        for event in events.iter().filter(|e| !e.is_transparent()) {
            instances.push(event.to_instance(offset)?);
        }
    }

    let busy = busy_times(instances, window);
    tracing::info!("Found {} busy times", busy.len());
    Ok(busy)
}
