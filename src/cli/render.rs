use std::path::Path;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;

use crate::core::AppConfig;
use crate::view::{ViewState, render};

/// Render a view state JSON file to stdout, or to `out` when given.
pub async fn run(state_path: &Path, today: Option<NaiveDate>, out: Option<&Path>) -> Result<()> {
    let text = tokio::fs::read_to_string(state_path)
        .await
        .map_err(|e| anyhow!("Failed to read {}: {}", state_path.display(), e))?;
    let state = ViewState::from_json(&text)?;
    let today = today.unwrap_or_else(|| AppConfig::default().today());

    let html = render(&state, today)?;
    match out {
        Some(path) => tokio::fs::write(path, html).await?,
        None => println!("{}", html),
    }
    Ok(())
}
