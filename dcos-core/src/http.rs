//! # Cluster HTTP Transport
//!
//! Authenticated HTTP client shared by the DC/OS API clients. It owns the
//! cluster base URL and the ACS token, builds endpoint URLs and issues
//! requests; interpreting status codes is left to each API client.

use std::fs;

use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, HeaderMap, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Certificate, Client, Response, StatusCode};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::{ClusterConfig, SslVerify};
use crate::url::normalize_cluster_url;

/// User-Agent header value for requests to the cluster
pub const USER_AGENT: &str = concat!("dcos-cli/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Represents an authenticated connection to one DC/OS cluster
#[derive(Debug, Clone)]
pub struct HttpClient {
  pub(crate) client: Client,
  pub(crate) base_url: Url,
  pub(crate) acs_token: Option<String>,
}

impl HttpClient {
  /// Create a client with default transport settings
  pub fn new(base_url: &str, acs_token: Option<String>) -> Result<Self> {
    Self::with_client(Client::new(), base_url, acs_token)
  }

  /// Create a client honouring the TLS and timeout settings of a cluster
  pub fn from_config(config: &ClusterConfig) -> Result<Self> {
    let mut builder = Client::builder();

    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }

    match &config.ssl_verify {
      SslVerify::Enabled => {}
      SslVerify::Disabled => {
        debug!("TLS certificate verification disabled");
        builder = builder.danger_accept_invalid_certs(true);
      }
      SslVerify::CaBundle(path) => {
        let pem = fs::read(path).with_context(|| format!("Failed to read CA bundle {}", path.display()))?;
        let certificate =
          Certificate::from_pem(&pem).with_context(|| format!("Invalid CA bundle {}", path.display()))?;
        builder = builder.add_root_certificate(certificate);
      }
    }

    let client = builder.build().context("Failed to build HTTP client")?;
    Self::with_client(client, &config.dcos_url, config.acs_token.clone())
  }

  fn with_client(client: Client, base_url: &str, acs_token: Option<String>) -> Result<Self> {
    let base_url = normalize_cluster_url(base_url)?;
    Ok(Self {
      client,
      base_url,
      acs_token,
    })
  }

  /// Get the cluster base URL
  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// Build an endpoint URL.
  ///
  /// `path` is a fixed API path such as `/system/health/v1/diagnostics`;
  /// each entry of `segments` is appended as one percent-encoded path
  /// segment, so caller-supplied identifiers cannot escape the resource.
  pub fn endpoint(&self, path: &str, segments: &[&str]) -> Url {
    let mut url = self.base_url.clone();
    // Normalized http(s) URLs always accept path segments.
    if let Ok(mut parts) = url.path_segments_mut() {
      parts.pop_if_empty();
      parts.extend(path.split('/').filter(|part| !part.is_empty()));
      parts.extend(segments);
    }
    url
  }

  /// Issue a GET request and return the raw response
  #[instrument(skip_all, fields(url = %url), level = "debug")]
  pub async fn get(&self, url: Url) -> reqwest::Result<Response> {
    let mut request = self.client.get(url).header(USER_AGENT_HEADER, USER_AGENT);

    if let Some(token) = &self.acs_token {
      request = request.header(AUTHORIZATION, format!("token={token}"));
    }

    let response = request.send().await?;
    debug!(status = %response.status(), "Received response");
    Ok(response)
  }
}

/// A failed HTTP response, kept whole for inspection by the caller
#[derive(Debug, Error)]
#[error("HTTP {status} from {url}{}", describe_body(.body))]
pub struct HttpError {
  pub status: StatusCode,
  pub url: Url,
  pub headers: HeaderMap,
  pub body: String,
}

impl HttpError {
  /// Capture a response, reading its body to the end
  pub async fn from_response(response: Response) -> Self {
    let status = response.status();
    let url = response.url().clone();
    let headers = response.headers().clone();
    let body = match response.text().await {
      Ok(body) => body,
      Err(error) => {
        warn!(%status, %url, %error, "Failed to read error response body");
        String::new()
      }
    };

    Self {
      status,
      url,
      headers,
      body,
    }
  }
}

fn describe_body(body: &str) -> String {
  let body = body.trim();
  if body.is_empty() {
    String::new()
  } else {
    format!(": {body}")
  }
}
