//! Constants for the dcos-diagnostics client

/// Collection endpoint of the diagnostics bundle API
pub const DIAGNOSTICS_PATH: &str = "/system/health/v1/diagnostics";

/// Sub-resource of a bundle serving its archive
pub const BUNDLE_FILE_SEGMENT: &str = "file";
