//! Cluster URL helpers.
//!
//! Users configure `core.dcos_url` in many shapes (`cluster.example.com`,
//! `http://10.0.0.1/`, `https://master.mesos/prefix`). These helpers turn any
//! of them into a [`Url`] the transport can append API paths to.

use anyhow::Result;
use url::Url;

/// Normalize a configured cluster URL.
///
/// Inputs without a scheme are assumed to be `https://`. Only `http` and
/// `https` are accepted, and a trailing slash on the path is dropped so
/// endpoint paths can be appended uniformly.
pub fn normalize_cluster_url(input: &str) -> Result<Url> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Cluster URL cannot be empty"));
  }

  let candidate = if trimmed.contains("://") {
    trimmed.to_string()
  } else {
    format!("https://{trimmed}")
  };

  let mut url = Url::parse(&candidate).map_err(|e| anyhow::anyhow!("Invalid cluster URL '{input}': {e}"))?;

  match url.scheme() {
    "http" | "https" => {}
    scheme => {
      return Err(anyhow::anyhow!(
        "Unsupported scheme '{scheme}' in cluster URL '{input}'. Use http or https."
      ));
    }
  }

  if url.host_str().is_none_or(str::is_empty) {
    return Err(anyhow::anyhow!("Cluster URL '{input}' has no host"));
  }

  let path = url.path().trim_end_matches('/').to_string();
  url.set_path(&path);
  url.set_query(None);
  url.set_fragment(None);

  Ok(url)
}
