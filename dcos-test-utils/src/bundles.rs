//! Sample diagnostics bundle payloads
//!
//! JSON bodies shaped like the cluster health API's responses, shared by the
//! client tests and the CLI integration tests.

/// A finished bundle with a known size
pub const DONE_BUNDLE_JSON: &str = r#"{
  "id": "bundle-2024-03-09T14:05:00-abc",
  "size": 2048,
  "status": "Done",
  "started_at": "2024-03-09T14:05:00Z",
  "stopped_at": "2024-03-09T14:07:30Z"
}"#;

/// A listing with one bundle in each of several lifecycle states
pub const BUNDLE_LIST_JSON: &str = r#"[
  {
    "id": "bundle-done",
    "size": 2048,
    "status": "Done",
    "started_at": "2024-03-09T14:05:00Z",
    "stopped_at": "2024-03-09T14:07:30Z"
  },
  {
    "id": "bundle-running",
    "status": "InProgress",
    "started_at": "2024-03-10T08:00:00Z",
    "stopped_at": "0001-01-01T00:00:00Z"
  },
  {
    "id": "bundle-failed",
    "status": "Failed",
    "started_at": "2024-03-11T09:00:00Z",
    "stopped_at": "2024-03-11T09:00:05Z",
    "errors": ["could not collect logs from agent 10.0.1.7", "timeout waiting for master"]
  }
]"#;
