use std::sync::{Arc, RwLock};

use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::routes;
use crate::api::state::AppState;
use crate::calendar::{CalendarSource, SnapshotSource};
use crate::core::AppConfig;
use crate::view::BusyTimesView;

pub fn app(shared_state: Arc<RwLock<AppState>>) -> Router {
    Router::new()
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&shared_state))
}

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> Result<()> {
    let source: Option<Arc<dyn CalendarSource>> = match &config.snapshot_path {
        Some(path) => {
            let source = SnapshotSource::load(path, config.utc_offset).await?;
            Some(Arc::new(source) as Arc<dyn CalendarSource>)
        }
        None => {
            tracing::warn!("MEETME_SNAPSHOT_PATH not set, calendars will not be listed");
            None
        }
    };

    let app_state = AppState::new(config, source, BusyTimesView::new()?);
    let shared_state = Arc::new(RwLock::new(app_state));
    let app = app(Arc::clone(&shared_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
