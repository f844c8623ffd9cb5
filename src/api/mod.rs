//! Typed HTTP access to the remote analysis pipeline.
//!
//! The pipeline service speaks JSON over HTTP at a configured base URL.
//! [`ApiClient`] owns the transport concerns — URL construction, query
//! serialization, the JSON content type, status checking, body decoding —
//! so the per-resource accessor modules stay thin:
//!
//! - [`signals`] — processed and raw signal listings
//! - [`patterns`] — pattern listings and updates
//! - [`opportunities`] — opportunity listings, detail, and updates
//! - [`chat`] — conversation turns (global and opportunity-scoped)
//! - [`digest`] — periodic digest retrieval
//! - [`pipeline`] — stage triggers, stats, health
//!
//! Every accessor propagates [`ApiError`] unchanged. No retries and no
//! caching happen at this layer — callers own their own retry policy.

use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::analytics;
use crate::config::VantageConfig;

pub mod chat;
pub mod digest;
pub mod opportunities;
pub mod patterns;
pub mod pipeline;
pub mod signals;
pub mod types;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Failure of a single API call.
///
/// The caller never receives partial data: a call either yields a fully
/// decoded value or one of these.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success HTTP status.
    #[error("API error: {status} {message}")]
    Status { status: u16, message: String },

    /// The request never completed — DNS, connection refused, timeout.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response arrived but was not the JSON we expected.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    fn from_ureq(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, resp) => Self::Status {
                status,
                message: resp.status_text().to_string(),
            },
            ureq::Error::Transport(t) => Self::Transport(t.to_string()),
        }
    }

    /// The HTTP status code, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the pipeline service.
///
/// Built once from the resolved config and shared by every accessor call in
/// a command. Cheap to share across threads — the underlying agent keeps a
/// connection pool internally.
#[derive(Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    log_requests: bool,
}

impl ApiClient {
    /// Build a client from the resolved config.
    pub fn from_config(config: &VantageConfig) -> Self {
        Self::new(
            &config.api.base_url,
            config.api.timeout_ms,
            config.logging.requests,
        )
    }

    pub fn new(base_url: &str, timeout_ms: u64, log_requests: bool) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(timeout_ms))
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            log_requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with the given query pairs and decode the JSON body.
    ///
    /// Query pairs are appended as given — accessors are responsible for
    /// omitting unset filters (see [`push_param`] / [`push_text_param`]).
    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.agent.get(&url);
        for (key, value) in query {
            req = req.query(key, value);
        }

        let started = Instant::now();
        let result = req.call().map_err(ApiError::from_ureq);
        self.finish("GET", path, started, result)
    }

    /// POST `path` with a JSON body and decode the JSON response.
    pub fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        let result = self
            .agent
            .post(&url)
            .send_json(body)
            .map_err(ApiError::from_ureq);
        self.finish("POST", path, started, result)
    }

    /// POST `path` with no body — used by the fire-and-forget pipeline
    /// triggers, which carry everything in the path.
    pub fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        let result = self.agent.post(&url).call().map_err(ApiError::from_ureq);
        self.finish("POST", path, started, result)
    }

    /// PATCH `path` with a JSON body and decode the updated record.
    pub fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        let result = self
            .agent
            .request("PATCH", &url)
            .send_json(body)
            .map_err(ApiError::from_ureq);
        self.finish("PATCH", path, started, result)
    }

    /// Decode the response body and write the request-log entry.
    fn finish<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        started: Instant,
        result: Result<ureq::Response, ApiError>,
    ) -> Result<T, ApiError> {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(resp) => {
                let status = resp.status();
                match resp.into_json::<T>() {
                    Ok(value) => {
                        self.log(method, path, Some(status), None, elapsed_ms);
                        Ok(value)
                    }
                    Err(e) => {
                        let err = ApiError::Decode(e.to_string());
                        self.log(method, path, Some(status), Some(&err), elapsed_ms);
                        Err(err)
                    }
                }
            }
            Err(err) => {
                self.log(method, path, err.status(), Some(&err), elapsed_ms);
                Err(err)
            }
        }
    }

    fn log(
        &self,
        method: &str,
        path: &str,
        status: Option<u16>,
        error: Option<&ApiError>,
        elapsed_ms: u64,
    ) {
        if self.log_requests {
            analytics::log_request(method, path, status, error.map(|e| e.to_string()), elapsed_ms);
        }
    }
}

// ---------------------------------------------------------------------------
// Query construction helpers
// ---------------------------------------------------------------------------

/// Append a numeric/scalar query parameter when a value is supplied.
pub(crate) fn push_param<T: ToString>(
    query: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<T>,
) {
    if let Some(v) = value {
        query.push((key, v.to_string()));
    }
}

/// Append a text query parameter when supplied and non-empty.
///
/// Unset filters are omitted entirely — never sent as empty strings.
pub(crate) fn push_text_param(
    query: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<&str>,
) {
    if let Some(v) = value
        && !v.trim().is_empty()
    {
        query.push((key, v.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_strips_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/", 30_000, false);
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn client_keeps_clean_base_url() {
        let client = ApiClient::new("http://api.example.com:9000", 30_000, false);
        assert_eq!(client.base_url(), "http://api.example.com:9000");
    }

    #[test]
    fn push_param_skips_none() {
        let mut q: Vec<(&'static str, String)> = Vec::new();
        push_param(&mut q, "limit", None::<u32>);
        push_param(&mut q, "days", Some(7u32));
        assert_eq!(q, vec![("days", "7".to_string())]);
    }

    #[test]
    fn push_text_param_skips_empty_and_whitespace() {
        let mut q: Vec<(&'static str, String)> = Vec::new();
        push_text_param(&mut q, "source_type", Some(""));
        push_text_param(&mut q, "status", Some("   "));
        push_text_param(&mut q, "timing_stage", Some("emerging"));
        assert_eq!(q, vec![("timing_stage", "emerging".to_string())]);
    }

    #[test]
    fn status_error_accessors() {
        let err = ApiError::Status {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "API error: 503 Service Unavailable");
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
    }
}
