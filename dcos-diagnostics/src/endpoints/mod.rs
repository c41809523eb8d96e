//! # Diagnostics API Endpoints
//!
//! Endpoint implementations for the cluster health API's diagnostics bundle
//! resources.

pub mod bundles;
