use std::sync::Arc;

use chrono::{Days, NaiveDate};

use crate::calendar::{BusyTime, Calendar, CalendarSource};
use crate::core::AppConfig;
use crate::view::{BusyTimesView, ViewState};
use crate::window::{DateSpan, TimeWindow};

/// What the user last asked for on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub window: TimeWindow,
    pub span: DateSpan,
    pub selected_calendars: Vec<String>,
}

impl Selection {
    /// 9am to 5pm, tomorrow through a week from today, nothing
    /// selected.
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            window: TimeWindow::default(),
            span: DateSpan {
                begin: today + Days::new(1),
                end: today + Days::new(7),
            },
            selected_calendars: vec![],
        }
    }
}

pub struct AppState {
    // Empty until the form is first submitted
    pub selection: Option<Selection>,
    // Set once the source has been asked for calendars
    pub calendars: Option<Vec<Calendar>>,
    pub busy_times: Vec<BusyTime>,
    pub source: Option<Arc<dyn CalendarSource>>,
    pub view: BusyTimesView,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        source: Option<Arc<dyn CalendarSource>>,
        view: BusyTimesView,
    ) -> Self {
        Self {
            selection: None,
            calendars: None,
            busy_times: vec![],
            source,
            view,
            config,
        }
    }

    /// The stored selection, or the defaults relative to `today` when
    /// nothing was submitted yet.
    pub fn selection(&self, today: NaiveDate) -> Selection {
        self.selection
            .clone()
            .unwrap_or_else(|| Selection::initial(today))
    }

    pub fn view_state(&self, today: NaiveDate) -> ViewState {
        let selection = self.selection(today);
        ViewState {
            begin_time: Some(selection.window.begin()),
            end_time: Some(selection.window.end()),
            daterange: Some(selection.span.label()),
            calendars: self.calendars.clone(),
            busy_times: self.busy_times.clone(),
        }
    }
}
