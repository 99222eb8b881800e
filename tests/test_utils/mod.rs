//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};
use chrono::{FixedOffset, NaiveDate};

use meetme::api::AppState;
use meetme::api::app;
use meetme::calendar::source::CalendarSnapshot;
use meetme::calendar::{CalendarSource, SnapshotSource};
use meetme::core::AppConfig;
use meetme::view::BusyTimesView;

pub const SNAPSHOT: &str = r#"{
    "calendars": [
        {"id": "home", "summary": "Home", "selected": true},
        {"id": "me@example.com", "summary": "Me", "selected": true, "primary": true},
        {"id": "holidays", "summary": "Holidays", "selected": false}
    ],
    "events": {
        "me@example.com": [
            {
                "id": "standup",
                "summary": "Standup",
                "start": {"dateTime": "2024-01-02T09:00:00Z"},
                "end": {"dateTime": "2024-01-02T09:15:00Z"}
            },
            {
                "id": "gym",
                "summary": "Gym",
                "start": {"dateTime": "2024-01-02T06:00:00Z"},
                "end": {"dateTime": "2024-01-02T07:00:00Z"}
            },
            {
                "id": "focus",
                "summary": "Focus time",
                "start": {"dateTime": "2024-01-02T13:00:00Z"},
                "end": {"dateTime": "2024-01-02T15:00:00Z"},
                "transparency": "transparent"
            }
        ],
        "home": [
            {
                "id": "plumber",
                "summary": "Plumber",
                "start": {"dateTime": "2024-01-03T11:00:00Z"},
                "end": {"dateTime": "2024-01-03T12:00:00Z"}
            },
            {
                "id": "offsite",
                "summary": "Offsite",
                "start": {"date": "2024-01-04"},
                "end": {"date": "2024-01-05"}
            },
            {
                "id": "trip",
                "summary": "Trip",
                "start": {"date": "2024-01-05"},
                "end": {"date": "2024-01-07"}
            }
        ]
    }
}"#;

/// The date every test app treats as today
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

pub fn snapshot_source() -> Arc<dyn CalendarSource> {
    let snapshot: CalendarSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
    Arc::new(SnapshotSource::new(snapshot, utc()))
}

/// Creates a test application router, optionally backed by the
/// snapshot above.
pub fn test_app_with(source: Option<Arc<dyn CalendarSource>>) -> Router {
    let app_config = AppConfig {
        snapshot_path: None,
        utc_offset: utc(),
        today: Some(today()),
    };
    let view = BusyTimesView::new().expect("Failed to compile templates");
    let app_state = AppState::new(app_config, source, view);
    app(Arc::new(RwLock::new(app_state)))
}

pub fn test_app() -> Router {
    test_app_with(None)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
