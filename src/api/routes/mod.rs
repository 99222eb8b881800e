//! Page routes module

pub mod busy;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Busy times form and results
        .merge(busy::router())
}
