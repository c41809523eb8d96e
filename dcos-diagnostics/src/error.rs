//! Error types returned by the diagnostics client.

use dcos_core::HttpError;
use reqwest::{Response, StatusCode};
use thiserror::Error;
use tracing::warn;

/// Errors returned by [`DiagnosticsClient`](crate::DiagnosticsClient) operations
#[derive(Debug, Error)]
pub enum DiagnosticsError {
  /// The request could not be completed, or the body could not be read
  #[error(transparent)]
  Transport(#[from] reqwest::Error),

  /// A successful response carried a body that is not the expected JSON
  #[error("Failed to decode diagnostics response: {0}")]
  Decode(#[from] serde_json::Error),

  /// Writing a downloaded bundle to its destination failed
  #[error("Failed to write bundle: {0}")]
  Io(#[from] std::io::Error),

  #[error("no bundle {id} found")]
  BundleNotFound { id: String },

  #[error("bundle {id} not readable")]
  BundleNotReadable { id: String },

  /// Any other failed response; the full response is retained
  #[error(transparent)]
  Http(#[from] HttpError),

  /// A non-error status reached a path with no handling for it
  #[error("unexpected status code {}", .0.as_u16())]
  UnexpectedStatus(StatusCode),

  #[error("bundle ID cannot be empty")]
  EmptyBundleId,
}

impl DiagnosticsError {
  /// Classify a response that no operation handles specifically.
  ///
  /// Statuses below 400 become [`DiagnosticsError::UnexpectedStatus`]; the
  /// rest are captured whole as [`DiagnosticsError::Http`].
  pub async fn from_response(response: Response) -> Self {
    let status = response.status();
    if status.as_u16() < 400 {
      warn!(%status, url = %response.url(), "Unexpected status from diagnostics API");
      return DiagnosticsError::UnexpectedStatus(status);
    }

    DiagnosticsError::Http(HttpError::from_response(response).await)
  }

  /// HTTP status behind this error, when it came from a response
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      DiagnosticsError::BundleNotFound { .. } => Some(StatusCode::NOT_FOUND),
      DiagnosticsError::BundleNotReadable { .. } => Some(StatusCode::INTERNAL_SERVER_ERROR),
      DiagnosticsError::Http(error) => Some(error.status),
      DiagnosticsError::UnexpectedStatus(status) => Some(*status),
      DiagnosticsError::Transport(error) => error.status(),
      DiagnosticsError::Decode(_) | DiagnosticsError::Io(_) | DiagnosticsError::EmptyBundleId => None,
    }
  }
}
