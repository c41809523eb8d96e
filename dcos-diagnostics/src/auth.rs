//! Authentication helpers for the diagnostics client.
//!
//! These helpers resolve the attached cluster's URL, ACS token and TLS
//! settings so the CLI can build a ready-to-use client in one call.

use anyhow::{Context, Result};
use dcos_core::{ClusterConfig, ConfigDirs, HttpClient};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::DiagnosticsClient;

/// Creates an authenticated diagnostics client for a resolved cluster.
pub fn create_diagnostics_client_from_config(config: &ClusterConfig) -> Result<DiagnosticsClient> {
  if config.acs_token.is_none() {
    debug!("No ACS token configured, sending unauthenticated requests");
  }
  let http = HttpClient::from_config(config).context("Failed to create cluster HTTP client")?;
  Ok(DiagnosticsClient::new(http))
}

/// Creates a diagnostics client for the cluster selected by `dirs` and `lookup`.
pub fn create_diagnostics_client_for<F>(dirs: &ConfigDirs, lookup: F) -> Result<DiagnosticsClient>
where
  F: Fn(&str) -> Option<String>,
{
  let config = ClusterConfig::resolve(dirs, lookup).context("Failed to load cluster configuration")?;
  create_diagnostics_client_from_config(&config)
}

/// Creates a tokio runtime and a diagnostics client for the attached cluster.
pub fn create_diagnostics_runtime_and_client() -> Result<(Runtime, DiagnosticsClient)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let config = dcos_core::load_cluster_config().context("Failed to load cluster configuration")?;
  let client = create_diagnostics_client_from_config(&config)?;
  Ok((rt, client))
}
