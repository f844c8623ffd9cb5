//! Pattern listing and update accessors.

use serde::Serialize;

use super::{ApiClient, ApiError, push_param, push_text_param};
use crate::api::types::Pattern;

/// Filter for the pattern listing.
#[derive(Debug, Clone, Default)]
pub struct PatternFilter {
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub min_score: Option<f64>,
}

impl PatternFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_param(&mut query, "limit", self.limit);
        push_text_param(&mut query, "status", self.status.as_deref());
        push_param(&mut query, "min_score", self.min_score);
        query
    }
}

/// Partial update body for `PATCH /patterns/{id}`. Unsupplied fields are
/// left off the wire so the service only touches what the user changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatternUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
}

impl PatternUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.user_notes.is_none()
    }
}

/// `GET /patterns`.
pub fn fetch_patterns(
    client: &ApiClient,
    filter: &PatternFilter,
) -> Result<Vec<Pattern>, ApiError> {
    client.get_json("/patterns", &filter.to_query())
}

/// `PATCH /patterns/{id}` — returns the updated record.
pub fn update_pattern(
    client: &ApiClient,
    id: &str,
    update: &PatternUpdate,
) -> Result<Pattern, ApiError> {
    client.patch_json(&format!("/patterns/{id}"), update)
}
