use super::payload::DashboardPayload;
use super::render::render_dashboard;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize dashboard payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write dashboard: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the dashboard and writes it to `path`, creating missing directories.
#[instrument(skip(payload))]
pub fn write_dashboard(payload: &DashboardPayload, path: &Path) -> Result<(), OutputError> {
    let html = render_dashboard(payload)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;

    info!("Wrote dashboard to {}", path.display());

    Ok(())
}
