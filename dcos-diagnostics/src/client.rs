//! # Diagnostics HTTP Client
//!
//! Client for the cluster health API's diagnostics bundle resources, layered
//! on the shared authenticated transport.

use anyhow::Result;
use dcos_core::HttpClient;

/// Represents a diagnostics bundle API client
#[derive(Debug, Clone)]
pub struct DiagnosticsClient {
  pub(crate) http: HttpClient,
}

impl DiagnosticsClient {
  /// Create a new diagnostics client over an authenticated transport
  pub fn new(http: HttpClient) -> Self {
    Self { http }
  }
}

/// Create a diagnostics client from a cluster URL and ACS token
pub fn create_diagnostics_client(dcos_url: &str, acs_token: Option<&str>) -> Result<DiagnosticsClient> {
  let http = HttpClient::new(dcos_url, acs_token.map(str::to_string))?;
  Ok(DiagnosticsClient::new(http))
}
