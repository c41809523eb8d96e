//! DC/OS configuration directory management for testing
//!
//! This module builds throwaway `DCOS_DIR` trees so configuration loading
//! can be exercised without touching the user's `~/.dcos`.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary DC/OS configuration root with a `clusters/` directory
pub struct ClusterDirGuard {
  /// The temporary directory used as the configuration root
  pub temp_dir: TempDir,
}

impl Default for ClusterDirGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl ClusterDirGuard {
  /// Create an empty configuration root
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    fs::create_dir_all(temp_dir.path().join("clusters")).expect("Failed to create clusters directory");

    Self { temp_dir }
  }

  /// Get the configuration root, suitable for `DCOS_DIR`
  pub fn dcos_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Get the directory for a cluster ID
  pub fn cluster_dir(&self, cluster_id: &str) -> PathBuf {
    self.temp_dir.path().join("clusters").join(cluster_id)
  }

  /// Add a cluster with a minimal `dcos.toml`, optionally marking it attached
  pub fn add_cluster(&self, cluster_id: &str, dcos_url: &str, acs_token: Option<&str>, attached: bool) -> PathBuf {
    let dir = self.cluster_dir(cluster_id);
    fs::create_dir_all(&dir).expect("Failed to create cluster directory");

    let mut content = format!("[core]\ndcos_url = \"{dcos_url}\"\n");
    if let Some(token) = acs_token {
      content.push_str(&format!("dcos_acs_token = \"{token}\"\n"));
    }
    self.write_config(&dir, &content);

    if attached {
      fs::write(dir.join("attached"), "").expect("Failed to write attached marker");
    }

    dir
  }

  /// Replace a cluster's `dcos.toml` with raw content
  pub fn write_config(&self, cluster_dir: &Path, content: &str) {
    fs::write(cluster_dir.join("dcos.toml"), content).expect("Failed to write dcos.toml");
  }
}
