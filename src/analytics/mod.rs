//! Request event log — one JSONL line per API call for diagnostics.
//!
//! Captures every transport call the console issues, including failures,
//! so slow or flaky pipeline deployments can be diagnosed after the fact.
//!
//! Log file: `~/.vantage/requests.jsonl`. Best-effort — logging failures
//! are silently ignored and never affect the command that triggered them.

use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Event entry
// ---------------------------------------------------------------------------

/// A single request-log entry. One line per transport call.
#[derive(Debug, Serialize)]
pub struct RequestEvent {
    pub timestamp: String,
    pub method: String,
    pub path: String,
    /// HTTP status, when the service answered at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// `"ok"` or `"error"`.
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log one transport call to `~/.vantage/requests.jsonl`.
pub fn log_request(
    method: &str,
    path: &str,
    status: Option<u16>,
    error: Option<String>,
    elapsed_ms: u64,
) {
    let event = RequestEvent {
        timestamp: Utc::now().to_rfc3339(),
        method: method.to_string(),
        path: path.to_string(),
        status,
        outcome: if error.is_none() { "ok" } else { "error" }.to_string(),
        error,
        elapsed_ms,
    };
    let _ = append_event(&event);
}

fn append_event(event: &RequestEvent) -> anyhow::Result<()> {
    let Some(path) = request_log_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(event)?;
    writeln!(file, "{json}")?;

    Ok(())
}

fn request_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vantage").join("requests.jsonl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_event_omits_error_field() {
        let event = RequestEvent {
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            method: "GET".to_string(),
            path: "/signals".to_string(),
            status: Some(200),
            outcome: "ok".to_string(),
            error: None,
            elapsed_ms: 42,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["status"], 200);
    }

    #[test]
    fn transport_failure_omits_status() {
        let event = RequestEvent {
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            method: "POST".to_string(),
            path: "/pipeline/collect".to_string(),
            status: None,
            outcome: "error".to_string(),
            error: Some("connection refused".to_string()),
            elapsed_ms: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("status").is_none());
        assert_eq!(json["outcome"], "error");
    }
}
