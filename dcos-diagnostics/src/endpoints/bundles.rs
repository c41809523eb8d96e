//! # Diagnostics Bundle Endpoints
//!
//! Listing, inspecting and downloading diagnostics bundles. Every call issues
//! exactly one request; the response is consumed or dropped before returning.

use std::io::Write;

use reqwest::StatusCode;
use tracing::{debug, instrument};

use crate::client::DiagnosticsClient;
use crate::consts::{BUNDLE_FILE_SEGMENT, DIAGNOSTICS_PATH};
use crate::error::DiagnosticsError;
use crate::models::Bundle;

impl DiagnosticsClient {
  /// List all bundles known to the cluster, in server order
  #[instrument(skip(self), level = "debug")]
  pub async fn list_bundles(&self) -> Result<Vec<Bundle>, DiagnosticsError> {
    let url = self.http.endpoint(DIAGNOSTICS_PATH, &[]);
    let response = self.http.get(url).await?;

    match response.status() {
      StatusCode::OK => {
        let body = response.bytes().await?;
        // A JSON `null` listing means no bundles
        let bundles = serde_json::from_slice::<Option<Vec<Bundle>>>(&body)?.unwrap_or_default();
        debug!(count = bundles.len(), "Listed diagnostics bundles");
        Ok(bundles)
      }
      _ => Err(DiagnosticsError::from_response(response).await),
    }
  }

  /// Get a single bundle record
  #[instrument(skip(self), level = "debug")]
  pub async fn get_bundle(&self, id: &str) -> Result<Bundle, DiagnosticsError> {
    validate_bundle_id(id)?;

    let url = self.http.endpoint(DIAGNOSTICS_PATH, &[id]);
    let response = self.http.get(url).await?;

    match response.status() {
      StatusCode::OK => {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice::<Bundle>(&body)?)
      }
      StatusCode::NOT_FOUND => Err(DiagnosticsError::BundleNotFound { id: id.to_string() }),
      _ => Err(DiagnosticsError::from_response(response).await),
    }
  }

  /// Stream a bundle's archive into `dst`, returning the number of bytes
  /// written.
  ///
  /// Bytes are written as they arrive. If reading or writing fails midway,
  /// `dst` keeps whatever was written before the failure.
  #[instrument(skip(self, dst), level = "debug")]
  pub async fn download_bundle<W>(&self, id: &str, dst: &mut W) -> Result<u64, DiagnosticsError>
  where
    W: Write + ?Sized,
  {
    validate_bundle_id(id)?;

    let url = self.http.endpoint(DIAGNOSTICS_PATH, &[id, BUNDLE_FILE_SEGMENT]);
    let mut response = self.http.get(url).await?;

    match response.status() {
      StatusCode::OK => {
        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
          dst.write_all(&chunk)?;
          written += chunk.len() as u64;
        }
        dst.flush()?;

        debug!(bytes = written, "Downloaded diagnostics bundle");
        Ok(written)
      }
      StatusCode::NOT_FOUND => Err(DiagnosticsError::BundleNotFound { id: id.to_string() }),
      StatusCode::INTERNAL_SERVER_ERROR => Err(DiagnosticsError::BundleNotReadable { id: id.to_string() }),
      _ => Err(DiagnosticsError::from_response(response).await),
    }
  }
}

fn validate_bundle_id(id: &str) -> Result<(), DiagnosticsError> {
  if id.trim().is_empty() {
    return Err(DiagnosticsError::EmptyBundleId);
  }
  Ok(())
}
