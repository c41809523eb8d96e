//! # DC/OS Core Library
//!
//! Shared building blocks for the DC/OS CLI crates: cluster configuration
//! discovery, the authenticated HTTP transport used by every API client, and
//! terminal output helpers.

pub mod config;
pub mod http;
pub mod output;
pub mod url;

// Re-export main types for API clients and the CLI
pub use config::{ClusterConfig, ConfigDirs, DcosConfig, SslVerify, get_config_dirs, load_cluster_config};
pub use http::{HttpClient, HttpError};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
