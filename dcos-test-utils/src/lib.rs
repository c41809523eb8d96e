//! Test utilities shared across the DC/OS CLI workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary DC/OS configuration directories ([`ClusterDirGuard`])
//! - Sample diagnostics bundle payloads ([`bundles`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod bundles;
pub mod cluster;

// Re-export commonly used items
pub use cluster::ClusterDirGuard;
