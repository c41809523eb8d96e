//! # Configuration Management
//!
//! Locates the DC/OS CLI configuration directory, selects the attached
//! cluster and loads its `dcos.toml`, applying environment variable
//! overrides on top.
//!
//! The on-disk layout is shared with other DC/OS CLI tooling:
//!
//! ```text
//! ~/.dcos/
//!   clusters/
//!     <cluster-id>/
//!       dcos.toml
//!       attached
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use tracing::debug;

use crate::url::normalize_cluster_url;

/// Overrides the configuration root (defaults to `~/.dcos`).
pub const ENV_DCOS_DIR: &str = "DCOS_DIR";
/// Selects a configured cluster by ID or name.
pub const ENV_DCOS_CLUSTER: &str = "DCOS_CLUSTER";
/// Overrides `core.dcos_url`.
pub const ENV_DCOS_URL: &str = "DCOS_URL";
/// Overrides `core.dcos_acs_token`.
pub const ENV_DCOS_ACS_TOKEN: &str = "DCOS_ACS_TOKEN";
/// Overrides `core.ssl_verify`.
pub const ENV_DCOS_SSL_VERIFY: &str = "DCOS_SSL_VERIFY";
/// Overrides `core.timeout` (seconds).
pub const ENV_DCOS_TIMEOUT: &str = "DCOS_TIMEOUT";

const CONFIG_FILE_NAME: &str = "dcos.toml";
const ATTACHED_MARKER: &str = "attached";

/// Represents the configuration directories for the DC/OS CLI
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub dcos_dir: PathBuf,
}

impl ConfigDirs {
  /// Resolve the configuration root from `$DCOS_DIR` or the home directory
  pub fn new() -> Result<Self> {
    if let Some(dir) = std::env::var_os(ENV_DCOS_DIR).filter(|dir| !dir.is_empty()) {
      return Ok(Self::from_path(dir));
    }

    let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
    Ok(Self::from_path(base_dirs.home_dir().join(".dcos")))
  }

  /// Use an explicit configuration root
  pub fn from_path<P: Into<PathBuf>>(dcos_dir: P) -> Self {
    Self {
      dcos_dir: dcos_dir.into(),
    }
  }

  /// Get the configuration root
  pub fn dcos_dir(&self) -> &PathBuf {
    &self.dcos_dir
  }

  /// Get the directory holding one sub-directory per configured cluster
  pub fn clusters_dir(&self) -> PathBuf {
    self.dcos_dir.join("clusters")
  }

  /// Get the path to a cluster's configuration file
  pub fn cluster_config_path<P: AsRef<Path>>(&self, cluster_dir: P) -> PathBuf {
    cluster_dir.as_ref().join(CONFIG_FILE_NAME)
  }

  /// List configured cluster directories, sorted by cluster ID.
  ///
  /// Only directories containing a `dcos.toml` count as clusters.
  pub fn cluster_dirs(&self) -> Result<Vec<PathBuf>> {
    let clusters_dir = self.clusters_dir();
    if !clusters_dir.is_dir() {
      return Ok(Vec::new());
    }

    let entries =
      fs::read_dir(&clusters_dir).with_context(|| format!("Failed to read {}", clusters_dir.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
      let path = entry
        .with_context(|| format!("Failed to read entry in {}", clusters_dir.display()))?
        .path();
      if path.is_dir() && self.cluster_config_path(&path).is_file() {
        dirs.push(path);
      }
    }
    dirs.sort();

    Ok(dirs)
  }

  /// Find the cluster directory to use.
  ///
  /// With a selector, the cluster whose ID or `cluster.name` matches is
  /// returned. Without one, the attached cluster wins; a lone configured
  /// cluster is used even when it is not marked as attached.
  pub fn find_cluster(&self, selector: Option<&str>) -> Result<Option<PathBuf>> {
    let dirs = self.cluster_dirs()?;

    if let Some(selector) = selector {
      for dir in &dirs {
        if dir.file_name().is_some_and(|name| name == selector) {
          return Ok(Some(dir.clone()));
        }
        let config = DcosConfig::load(&self.cluster_config_path(dir))?;
        if config.cluster.name.as_deref() == Some(selector) {
          return Ok(Some(dir.clone()));
        }
      }
      return Ok(None);
    }

    if let Some(attached) = dirs.iter().find(|dir| dir.join(ATTACHED_MARKER).is_file()) {
      return Ok(Some(attached.clone()));
    }

    match dirs.as_slice() {
      [only] => Ok(Some(only.clone())),
      _ => Ok(None),
    }
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Contents of a cluster's `dcos.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DcosConfig {
  #[serde(default)]
  pub core: CoreSection,
  #[serde(default)]
  pub cluster: ClusterSection,
}

/// The `[core]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CoreSection {
  #[serde(default)]
  pub dcos_url: Option<String>,
  #[serde(default)]
  pub dcos_acs_token: Option<String>,
  #[serde(default)]
  pub ssl_verify: Option<String>,
  #[serde(default)]
  pub timeout: Option<u64>,
}

/// The `[cluster]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClusterSection {
  #[serde(default)]
  pub name: Option<String>,
}

impl DcosConfig {
  /// Load a `dcos.toml` file
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: DcosConfig =
      toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))?;

    Ok(config)
  }

  /// Apply environment overrides. `lookup` returns the value of a variable.
  pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
  where
    F: Fn(&str) -> Option<String>,
  {
    let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(url) = non_empty(ENV_DCOS_URL) {
      self.core.dcos_url = Some(url);
    }
    if let Some(token) = non_empty(ENV_DCOS_ACS_TOKEN) {
      self.core.dcos_acs_token = Some(token);
    }
    if let Some(ssl_verify) = non_empty(ENV_DCOS_SSL_VERIFY) {
      self.core.ssl_verify = Some(ssl_verify);
    }
    if let Some(timeout) = non_empty(ENV_DCOS_TIMEOUT) {
      let seconds = timeout
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid {ENV_DCOS_TIMEOUT} value '{timeout}': expected seconds"))?;
      self.core.timeout = Some(seconds);
    }

    Ok(())
  }
}

/// TLS verification policy for the cluster connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SslVerify {
  /// Verify against the system trust store
  Enabled,
  /// Accept any certificate
  Disabled,
  /// Verify against a PEM bundle on disk
  CaBundle(PathBuf),
}

impl SslVerify {
  /// Parse the `core.ssl_verify` setting
  pub fn parse(value: Option<&str>) -> Self {
    match value.map(str::trim) {
      None | Some("") => Self::Enabled,
      Some(value) if value.eq_ignore_ascii_case("true") => Self::Enabled,
      Some(value) if value.eq_ignore_ascii_case("false") => Self::Disabled,
      Some(path) => Self::CaBundle(PathBuf::from(path)),
    }
  }
}

/// Fully resolved settings for talking to one cluster
#[derive(Debug, Clone)]
pub struct ClusterConfig {
  pub name: Option<String>,
  pub dcos_url: String,
  pub acs_token: Option<String>,
  pub ssl_verify: SslVerify,
  pub timeout: Option<Duration>,
}

impl ClusterConfig {
  /// Resolve the settings for the selected cluster.
  ///
  /// `lookup` reads environment variables; with `DCOS_URL` set no config
  /// file is required.
  pub fn resolve<F>(dirs: &ConfigDirs, lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let selector = lookup(ENV_DCOS_CLUSTER).filter(|value| !value.is_empty());

    let mut config = match dirs.find_cluster(selector.as_deref())? {
      Some(cluster_dir) => {
        let path = dirs.cluster_config_path(&cluster_dir);
        debug!("Loading cluster config from {}", path.display());
        DcosConfig::load(&path)?
      }
      None => {
        if let Some(selector) = &selector {
          return Err(anyhow::anyhow!(
            "Cluster '{selector}' not found in {}",
            dirs.clusters_dir().display()
          ));
        }
        debug!("No attached cluster found in {}", dirs.dcos_dir().display());
        DcosConfig::default()
      }
    };

    config.apply_overrides(&lookup)?;

    let dcos_url = config.core.dcos_url.ok_or_else(|| {
      anyhow::anyhow!(
        "No cluster is attached. Set {ENV_DCOS_URL} or attach a cluster configured under {}",
        dirs.clusters_dir().display()
      )
    })?;
    let dcos_url = normalize_cluster_url(&dcos_url)?.to_string();

    Ok(Self {
      name: config.cluster.name,
      dcos_url,
      acs_token: config.core.dcos_acs_token,
      ssl_verify: SslVerify::parse(config.core.ssl_verify.as_deref()),
      timeout: config.core.timeout.map(Duration::from_secs),
    })
  }
}

/// Load the cluster settings using the process environment
pub fn load_cluster_config() -> Result<ClusterConfig> {
  let dirs = get_config_dirs()?;
  ClusterConfig::resolve(&dirs, |key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use dcos_test_utils::ClusterDirGuard;
  use tempfile::TempDir;

  use super::*;

  fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key: &str| vars.get(key).cloned()
  }

  #[test]
  fn test_config_dirs_layout() {
    let dirs = ConfigDirs::from_path("/tmp/dcos-home");
    assert_eq!(dirs.clusters_dir(), PathBuf::from("/tmp/dcos-home/clusters"));
    assert_eq!(
      dirs.cluster_config_path(dirs.clusters_dir().join("abc")),
      PathBuf::from("/tmp/dcos-home/clusters/abc/dcos.toml")
    );
  }

  #[test]
  fn test_cluster_dirs_empty_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::from_path(temp_dir.path().join("missing"));
    assert!(dirs.cluster_dirs().unwrap().is_empty());
    assert!(dirs.find_cluster(None).unwrap().is_none());
  }

  #[test]
  fn test_find_attached_cluster() {
    let guard = ClusterDirGuard::new();
    guard.add_cluster("first", "https://first.example.com", None, false);
    let second = guard.add_cluster("second", "https://second.example.com", None, true);

    let dirs = ConfigDirs::from_path(guard.dcos_dir());
    assert_eq!(dirs.cluster_dirs().unwrap().len(), 2);
    assert_eq!(dirs.find_cluster(None).unwrap(), Some(second));
  }

  #[test]
  fn test_find_single_unattached_cluster() {
    let guard = ClusterDirGuard::new();
    let only = guard.add_cluster("only", "https://only.example.com", None, false);

    let dirs = ConfigDirs::from_path(guard.dcos_dir());
    assert_eq!(dirs.find_cluster(None).unwrap(), Some(only));
  }

  #[test]
  fn test_find_none_with_multiple_unattached_clusters() {
    let guard = ClusterDirGuard::new();
    guard.add_cluster("a", "https://a.example.com", None, false);
    guard.add_cluster("b", "https://b.example.com", None, false);

    let dirs = ConfigDirs::from_path(guard.dcos_dir());
    assert!(dirs.find_cluster(None).unwrap().is_none());
  }

  #[test]
  fn test_find_cluster_by_id_or_name() {
    let guard = ClusterDirGuard::new();
    let prod = guard.add_cluster("7f3c", "https://prod.example.com", None, false);
    guard.write_config(
      &prod,
      "[core]\ndcos_url = \"https://prod.example.com\"\n\n[cluster]\nname = \"prod\"\n",
    );
    guard.add_cluster("staging-id", "https://staging.example.com", None, true);

    let dirs = ConfigDirs::from_path(guard.dcos_dir());
    assert_eq!(dirs.find_cluster(Some("7f3c")).unwrap(), Some(prod.clone()));
    assert_eq!(dirs.find_cluster(Some("prod")).unwrap(), Some(prod));
    assert!(dirs.find_cluster(Some("nope")).unwrap().is_none());
  }

  #[test]
  fn test_dcos_config_load_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dcos.toml");
    fs::write(
      &path,
      "[core]\ndcos_url = \"https://cluster.example.com\"\ndcos_acs_token = \"secret\"\n\
       ssl_verify = \"false\"\ntimeout = 30\n\n[cluster]\nname = \"demo\"\n",
    )
    .unwrap();

    let expected = DcosConfig {
      core: CoreSection {
        dcos_url: Some("https://cluster.example.com".to_string()),
        dcos_acs_token: Some("secret".to_string()),
        ssl_verify: Some("false".to_string()),
        timeout: Some(30),
      },
      cluster: ClusterSection {
        name: Some("demo".to_string()),
      },
    };
    assert_eq!(DcosConfig::load(&path).unwrap(), expected);
  }

  #[test]
  fn test_dcos_config_parse_error_names_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dcos.toml");
    fs::write(&path, "[core\ndcos_url = ").unwrap();

    let error = format!("{:#}", DcosConfig::load(&path).unwrap_err());
    assert!(error.contains("Failed to parse config"));
    assert!(error.contains("dcos.toml"));
  }

  #[test]
  fn test_apply_overrides() {
    let mut config = DcosConfig::default();
    config
      .apply_overrides(env(&[
        (ENV_DCOS_URL, "https://env.example.com"),
        (ENV_DCOS_ACS_TOKEN, "env-token"),
        (ENV_DCOS_SSL_VERIFY, "false"),
        (ENV_DCOS_TIMEOUT, "12"),
      ]))
      .unwrap();

    assert_eq!(config.core.dcos_url.as_deref(), Some("https://env.example.com"));
    assert_eq!(config.core.dcos_acs_token.as_deref(), Some("env-token"));
    assert_eq!(config.core.ssl_verify.as_deref(), Some("false"));
    assert_eq!(config.core.timeout, Some(12));
  }

  #[test]
  fn test_apply_overrides_ignores_empty_values() {
    let mut config = DcosConfig::default();
    config.core.dcos_url = Some("https://file.example.com".to_string());
    config.apply_overrides(env(&[(ENV_DCOS_URL, "")])).unwrap();

    assert_eq!(config.core.dcos_url.as_deref(), Some("https://file.example.com"));
  }

  #[test]
  fn test_apply_overrides_rejects_bad_timeout() {
    let mut config = DcosConfig::default();
    let error = config
      .apply_overrides(env(&[(ENV_DCOS_TIMEOUT, "soon")]))
      .unwrap_err()
      .to_string();
    assert!(error.contains(ENV_DCOS_TIMEOUT));
  }

  #[test]
  fn test_ssl_verify_parse() {
    assert_eq!(SslVerify::parse(None), SslVerify::Enabled);
    assert_eq!(SslVerify::parse(Some("TRUE")), SslVerify::Enabled);
    assert_eq!(SslVerify::parse(Some("false")), SslVerify::Disabled);
    assert_eq!(
      SslVerify::parse(Some("/etc/ssl/dcos-ca.crt")),
      SslVerify::CaBundle(PathBuf::from("/etc/ssl/dcos-ca.crt"))
    );
  }

  #[test]
  fn test_resolve_from_attached_cluster() {
    let guard = ClusterDirGuard::new();
    guard.add_cluster("abc", "cluster.example.com", Some("file-token"), true);

    let dirs = ConfigDirs::from_path(guard.dcos_dir());
    let config = ClusterConfig::resolve(&dirs, env(&[])).unwrap();

    assert_eq!(config.dcos_url, "https://cluster.example.com/");
    assert_eq!(config.acs_token.as_deref(), Some("file-token"));
    assert_eq!(config.ssl_verify, SslVerify::Enabled);
    assert_eq!(config.timeout, None);
  }

  #[test]
  fn test_resolve_env_overrides_file() {
    let guard = ClusterDirGuard::new();
    guard.add_cluster("abc", "https://cluster.example.com", Some("file-token"), true);

    let dirs = ConfigDirs::from_path(guard.dcos_dir());
    let config = ClusterConfig::resolve(
      &dirs,
      env(&[(ENV_DCOS_ACS_TOKEN, "env-token"), (ENV_DCOS_TIMEOUT, "5")]),
    )
    .unwrap();

    assert_eq!(config.acs_token.as_deref(), Some("env-token"));
    assert_eq!(config.timeout, Some(Duration::from_secs(5)));
  }

  #[test]
  fn test_resolve_from_env_without_config() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::from_path(temp_dir.path());

    let config = ClusterConfig::resolve(&dirs, env(&[(ENV_DCOS_URL, "http://10.0.0.1")])).unwrap();
    assert_eq!(config.dcos_url, "http://10.0.0.1/");
    assert!(config.acs_token.is_none());
  }

  #[test]
  fn test_resolve_without_cluster_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::from_path(temp_dir.path());

    let error = ClusterConfig::resolve(&dirs, env(&[])).unwrap_err().to_string();
    assert!(error.contains("No cluster is attached"));
    assert!(error.contains(ENV_DCOS_URL));
  }

  #[test]
  fn test_resolve_unknown_selected_cluster_fails() {
    let guard = ClusterDirGuard::new();
    guard.add_cluster("abc", "https://cluster.example.com", None, true);

    let dirs = ConfigDirs::from_path(guard.dcos_dir());
    let error = ClusterConfig::resolve(&dirs, env(&[(ENV_DCOS_CLUSTER, "other")]))
      .unwrap_err()
      .to_string();
    assert!(error.contains("Cluster 'other' not found"));
  }
}
