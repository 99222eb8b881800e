//! The busy-times page. Rendering is a pure function of a
//! [`ViewState`] and the current date.

pub mod model;
pub mod template;

use chrono::{NaiveDate, NaiveTime};
use handlebars::Handlebars;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::calendar::{BusyTime, Calendar};
use crate::window::format_hhmm;
use model::PageModel;
use template::{BUSY_TIMES_PAGE, templates};

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Failed to register template: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("Failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("Invalid view state: {0}")]
    State(#[from] serde_json::Error),
}

fn serialize_hhmm<S: Serializer>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
    match time {
        Some(time) => serializer.serialize_str(&format_hhmm(*time)),
        None => serializer.serialize_none(),
    }
}

fn deserialize_hhmm<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveTime::parse_from_str(raw, "%H:%M")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// The data one page render needs. Built per request by whoever owns
/// the selection; the view only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(
        default,
        serialize_with = "serialize_hhmm",
        deserialize_with = "deserialize_hhmm"
    )]
    pub begin_time: Option<NaiveTime>,
    #[serde(
        default,
        serialize_with = "serialize_hhmm",
        deserialize_with = "deserialize_hhmm"
    )]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub daterange: Option<String>,
    /// `None` until the account has been authorized
    #[serde(default)]
    pub calendars: Option<Vec<Calendar>>,
    #[serde(default, rename = "busytimes")]
    pub busy_times: Vec<BusyTime>,
}

impl ViewState {
    pub fn from_json(text: &str) -> Result<Self, ViewError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Holds the compiled template so each request only renders.
pub struct BusyTimesView {
    registry: Handlebars<'static>,
}

impl BusyTimesView {
    pub fn new() -> Result<Self, ViewError> {
        Ok(Self {
            registry: templates()?,
        })
    }

    pub fn render(&self, state: &ViewState, today: NaiveDate) -> Result<String, ViewError> {
        let page = PageModel::new(state, today);
        Ok(self.registry.render(BUSY_TIMES_PAGE, &page)?)
    }
}

/// Render the page with a freshly compiled template.
pub fn render(state: &ViewState, today: NaiveDate) -> Result<String, ViewError> {
    BusyTimesView::new()?.render(state, today)
}
