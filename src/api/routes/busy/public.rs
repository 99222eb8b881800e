//! Public types for the busy times page
use serde::Deserialize;

/// Fields posted by the busy times form. Each checked calendar sends
/// its own `checkbox` field.
#[derive(Debug, Deserialize)]
pub struct SetDataForm {
    pub begin_time: String,
    pub end_time: String,
    pub daterange: String,
    #[serde(default)]
    pub checkbox: Vec<String>,
}
