use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle state of a diagnostics bundle, as reported by the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleStatus {
  Started,
  InProgress,
  Done,
  Canceled,
  Deleted,
  Failed,
  /// Unrecognised or unset status
  #[default]
  #[serde(other)]
  Unknown,
}

impl BundleStatus {
  /// Wire name of the status
  pub const fn as_str(self) -> &'static str {
    match self {
      BundleStatus::Unknown => "Unknown",
      BundleStatus::Started => "Started",
      BundleStatus::InProgress => "InProgress",
      BundleStatus::Done => "Done",
      BundleStatus::Canceled => "Canceled",
      BundleStatus::Deleted => "Deleted",
      BundleStatus::Failed => "Failed",
    }
  }
}

impl fmt::Display for BundleStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Represents a diagnostics bundle job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
  #[serde(default)]
  pub id: String,
  /// Archive length in bytes; 0 for canceled or deleted bundles
  #[serde(default)]
  pub size: u64,
  #[serde(default)]
  pub status: BundleStatus,
  #[serde(
    rename = "started_at",
    default,
    deserialize_with = "deserialize_timestamp",
    skip_serializing_if = "Option::is_none"
  )]
  pub started: Option<DateTime<Utc>>,
  #[serde(
    rename = "stopped_at",
    default,
    deserialize_with = "deserialize_timestamp",
    skip_serializing_if = "Option::is_none"
  )]
  pub stopped: Option<DateTime<Utc>>,
  #[serde(default, deserialize_with = "deserialize_errors", skip_serializing_if = "Vec::is_empty")]
  pub errors: Vec<String>,
}

impl Bundle {
  /// Size of the downloadable archive, only known once the bundle is done
  pub fn artifact_size(&self) -> Option<u64> {
    match self.status {
      BundleStatus::Done => Some(self.size),
      _ => None,
    }
  }
}

/// The server reports unset times as `0001-01-01T00:00:00Z`; treat those as absent.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
  D: Deserializer<'de>,
{
  let timestamp = Option::<DateTime<Utc>>::deserialize(deserializer)?;
  Ok(timestamp.filter(|timestamp| timestamp.year() > 1))
}

fn deserialize_errors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use dcos_test_utils::bundles::DONE_BUNDLE_JSON;

  use super::*;

  #[test]
  fn test_bundle_minimal_record() {
    let bundle: Bundle = serde_json::from_str(r#"{"id":"abc","size":128,"status":"Done"}"#).unwrap();
    assert_eq!(bundle.id, "abc");
    assert_eq!(bundle.size, 128);
    assert_eq!(bundle.status, BundleStatus::Done);
    assert!(bundle.started.is_none());
    assert!(bundle.stopped.is_none());
    assert!(bundle.errors.is_empty());
  }

  #[test]
  fn test_bundle_all_fields_omitted() {
    let bundle: Bundle = serde_json::from_str("{}").unwrap();
    assert_eq!(bundle, Bundle::default());
    assert_eq!(bundle.status, BundleStatus::Unknown);
  }

  #[test]
  fn test_bundle_timestamps() {
    let bundle: Bundle = serde_json::from_str(DONE_BUNDLE_JSON).unwrap();
    assert_eq!(
      bundle.started,
      Some(Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap())
    );
    assert_eq!(
      bundle.stopped,
      Some(Utc.with_ymd_and_hms(2024, 3, 9, 14, 7, 30).unwrap())
    );
  }

  #[test]
  fn test_zero_and_null_timestamps_are_absent() {
    let bundle: Bundle = serde_json::from_str(
      r#"{"id":"abc","status":"Started","started_at":"0001-01-01T00:00:00Z","stopped_at":null}"#,
    )
    .unwrap();
    assert!(bundle.started.is_none());
    assert!(bundle.stopped.is_none());
  }

  #[test]
  fn test_errors_preserve_order_and_accept_null() {
    let bundle: Bundle = serde_json::from_str(r#"{"id":"abc","errors":["first","second"]}"#).unwrap();
    assert_eq!(bundle.errors, vec!["first".to_string(), "second".to_string()]);

    let bundle: Bundle = serde_json::from_str(r#"{"id":"abc","errors":null}"#).unwrap();
    assert!(bundle.errors.is_empty());
  }

  #[test]
  fn test_status_wire_names() {
    for (wire, status) in [
      ("Started", BundleStatus::Started),
      ("InProgress", BundleStatus::InProgress),
      ("Done", BundleStatus::Done),
      ("Canceled", BundleStatus::Canceled),
      ("Deleted", BundleStatus::Deleted),
      ("Failed", BundleStatus::Failed),
      ("Unknown", BundleStatus::Unknown),
    ] {
      let parsed: BundleStatus = serde_json::from_str(&format!("\"{wire}\"")).unwrap();
      assert_eq!(parsed, status);
      assert_eq!(status.to_string(), wire);
    }
  }

  #[test]
  fn test_unrecognised_status_is_unknown() {
    let status: BundleStatus = serde_json::from_str("\"Archived\"").unwrap();
    assert_eq!(status, BundleStatus::Unknown);
  }

  #[test]
  fn test_artifact_size_only_for_done() {
    let mut bundle = Bundle {
      id: "abc".to_string(),
      size: 4096,
      status: BundleStatus::Done,
      ..Default::default()
    };
    assert_eq!(bundle.artifact_size(), Some(4096));

    bundle.status = BundleStatus::Canceled;
    bundle.size = 0;
    assert_eq!(bundle.artifact_size(), None);

    bundle.status = BundleStatus::InProgress;
    assert_eq!(bundle.artifact_size(), None);
  }

  #[test]
  fn test_serialize_skips_absent_fields() {
    let bundle = Bundle {
      id: "abc".to_string(),
      size: 128,
      status: BundleStatus::Done,
      ..Default::default()
    };
    let json = serde_json::to_value(&bundle).unwrap();
    assert_eq!(json, serde_json::json!({"id": "abc", "size": 128, "status": "Done"}));
  }
}
