//! Pipeline stage triggers, aggregate stats, and the health probe.
//!
//! Triggers are fire-and-forget: the service acknowledges with a
//! status/message pair and performs the work asynchronously. Callers
//! re-fetch the affected resources once the trigger resolves.

use super::{ApiClient, ApiError};
use crate::api::types::{ActionAck, PipelineStats};

/// `POST /pipeline/collect` — gather fresh raw signals from sources.
pub fn run_collection(client: &ApiClient) -> Result<ActionAck, ApiError> {
    client.post_empty("/pipeline/collect")
}

/// `POST /pipeline/process` — process collected raw signals.
pub fn run_processing(client: &ApiClient) -> Result<ActionAck, ApiError> {
    client.post_empty("/pipeline/process")
}

/// `POST /pipeline/detect-patterns` — detect patterns across signals.
pub fn run_pattern_detection(client: &ApiClient) -> Result<ActionAck, ApiError> {
    client.post_empty("/pipeline/detect-patterns")
}

/// `POST /pipeline/generate-opportunities` — score patterns into
/// opportunities.
pub fn run_opportunity_generation(client: &ApiClient) -> Result<ActionAck, ApiError> {
    client.post_empty("/pipeline/generate-opportunities")
}

/// `GET /stats` — aggregate entity counters.
pub fn fetch_stats(client: &ApiClient) -> Result<PipelineStats, ApiError> {
    client.get_json("/stats", &[])
}

/// `GET /health` — service liveness. The document shape is unspecified,
/// so it is kept as raw JSON for display.
pub fn check_health(client: &ApiClient) -> Result<serde_json::Value, ApiError> {
    client.get_json("/health", &[])
}
