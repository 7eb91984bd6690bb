//! CLI command implementations.

pub mod builds;
pub mod hierarchy;
pub mod rerun;
pub mod results;
pub mod serve;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::models::Config;
use crate::infrastructure::bitrise::BitriseClient;
use crate::infrastructure::manifest::ManifestTestMethodSource;
use crate::services::DashboardService;

/// Dashboard service wired to Bitrise and manifest downloads
pub type BitriseDashboard = DashboardService<BitriseClient, ManifestTestMethodSource>;

/// Wire the dashboard service from configuration
pub fn dashboard_service(config: &Config) -> Result<BitriseDashboard> {
    let ci = BitriseClient::new(&config.ci).context("Failed to create Bitrise client")?;
    let test_methods = ManifestTestMethodSource::new(config.ci.timeout_secs)
        .context("Failed to create manifest downloader")?;
    Ok(DashboardService::new(
        Arc::new(ci),
        Arc::new(test_methods),
        config,
    ))
}
