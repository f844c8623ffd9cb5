//! Opportunity listing, detail, and update accessors.

use serde::Serialize;

use super::{ApiClient, ApiError, push_param, push_text_param};
use crate::api::types::Opportunity;

/// Filter for the opportunity listing.
#[derive(Debug, Clone, Default)]
pub struct OpportunityFilter {
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub timing_stage: Option<String>,
}

impl OpportunityFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_param(&mut query, "limit", self.limit);
        push_text_param(&mut query, "status", self.status.as_deref());
        push_text_param(&mut query, "timing_stage", self.timing_stage.as_deref());
        query
    }
}

/// Partial update body for `PATCH /opportunities/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpportunityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
}

impl OpportunityUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.user_notes.is_none()
    }
}

/// `GET /opportunities`.
pub fn fetch_opportunities(
    client: &ApiClient,
    filter: &OpportunityFilter,
) -> Result<Vec<Opportunity>, ApiError> {
    client.get_json("/opportunities", &filter.to_query())
}

/// `GET /opportunities/{id}`.
pub fn fetch_opportunity(client: &ApiClient, id: &str) -> Result<Opportunity, ApiError> {
    client.get_json(&format!("/opportunities/{id}"), &[])
}

/// `PATCH /opportunities/{id}` — returns the updated record, so callers
/// can re-render without a second fetch.
pub fn update_opportunity(
    client: &ApiClient,
    id: &str,
    update: &OpportunityUpdate,
) -> Result<Opportunity, ApiError> {
    client.patch_json(&format!("/opportunities/{id}"), update)
}
