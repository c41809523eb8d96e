//! # DC/OS Diagnostics Client
//!
//! Provides read access to the cluster health API's diagnostics bundles:
//! listing bundles, fetching a single bundle record and streaming a finished
//! bundle's archive to a writer.

pub mod auth;
pub mod client;
pub mod consts;
mod endpoints;
pub mod error;
pub mod models;

// Re-export the client
pub use client::{DiagnosticsClient, create_diagnostics_client};
// Re-export errors and models
pub use error::DiagnosticsError;
pub use models::{Bundle, BundleStatus};
