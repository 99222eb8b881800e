use std::env;

use chrono::{FixedOffset, Local, NaiveDate, Offset, Utc};

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// JSON export of the calendar account. Without one the page stays
    /// in the pre-authorization state.
    pub snapshot_path: Option<String>,
    /// Offset used for all-day events and the date range bounds
    pub utc_offset: FixedOffset,
    /// Pins "today" (YYYY-MM-DD), useful when serving an old snapshot
    pub today: Option<NaiveDate>,
}

fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}

impl Default for AppConfig {
    fn default() -> Self {
        let snapshot_path = env::var("MEETME_SNAPSHOT_PATH").ok();
        let utc_offset = match env::var("MEETME_UTC_OFFSET") {
            Ok(raw) => raw.parse::<FixedOffset>().unwrap_or_else(|e| {
                tracing::warn!("Ignoring MEETME_UTC_OFFSET '{}': {}", raw, e);
                local_offset()
            }),
            Err(_) => local_offset(),
        };
        let today = env::var("MEETME_TODAY").ok().and_then(|raw| {
            raw.parse::<NaiveDate>()
                .map_err(|e| tracing::warn!("Ignoring MEETME_TODAY '{}': {}", raw, e))
                .ok()
        });

        Self {
            snapshot_path,
            utc_offset,
            today,
        }
    }
}

impl AppConfig {
    /// Today in the configured offset, unless pinned.
    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| Utc::now().with_timezone(&self.utc_offset).date_naive())
    }
}
