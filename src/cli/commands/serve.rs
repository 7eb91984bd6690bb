//! `flankci serve`

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use crate::cli::types::ServeArgs;
use crate::domain::models::Config;
use crate::infrastructure::http::{DashboardHttpConfig, DashboardHttpServer};

use super::dashboard_service;

/// Resolve the listen address, command-line flags winning over configuration
pub fn http_config(args: &ServeArgs, config: &Config) -> DashboardHttpConfig {
    let mut http_config = DashboardHttpConfig::from(&config.server);
    if let Some(host) = &args.host {
        http_config.host.clone_from(host);
    }
    if let Some(port) = args.port {
        http_config.port = port;
    }
    http_config
}

pub async fn execute(args: ServeArgs, config: &Config, _json_mode: bool) -> Result<()> {
    let service = Arc::new(dashboard_service(config)?);
    let http_config = http_config(&args, config);

    info!(
        host = %http_config.host,
        port = http_config.port,
        cors = http_config.enable_cors,
        "starting dashboard server"
    );

    DashboardHttpServer::new(service, http_config)
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!("Dashboard server failed: {e}"))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "cannot listen for ctrl-c, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
