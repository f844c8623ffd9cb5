//! Wire types for the pipeline service.
//!
//! Field names follow the service contract exactly. Records are opaque to
//! the client — we never mutate identity, only render. Deserialization is
//! deliberately tolerant: anything the service may omit is `Option` or
//! defaulted, thesis scores are open maps keyed by axis name, and unknown
//! status/type strings are kept verbatim (the label tables in
//! [`crate::utils::labels`] decide how to render them).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named-axis confidence scores in [0, 1], keyed by thesis axis.
///
/// A `BTreeMap` so rendering order is stable across runs.
pub type ThesisScores = BTreeMap<String, f64>;

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// An external collection record, immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSignal {
    pub id: String,
    #[serde(default)]
    pub source_type: String,
    #[serde(default)]
    pub source_category: String,
    #[serde(default)]
    pub source_url: Option<String>,
    /// Arbitrary payload as collected — shape varies per source.
    #[serde(default)]
    pub raw_content: serde_json::Value,
    #[serde(default)]
    pub signal_date: Option<String>,
    #[serde(default)]
    pub geography: Option<String>,
    #[serde(default)]
    pub collected_at: String,
    #[serde(default)]
    pub created_at: String,
}

/// Entity sets extracted from a signal during processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalEntities {
    pub companies: Vec<String>,
    pub technologies: Vec<String>,
    pub industries: Vec<String>,
    pub locations: Vec<String>,
}

impl SignalEntities {
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
            && self.technologies.is_empty()
            && self.industries.is_empty()
            && self.locations.is_empty()
    }
}

/// A signal after pipeline processing — derived from exactly one
/// [`RawSignal`] via `raw_signal_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedSignal {
    pub id: String,
    #[serde(default)]
    pub raw_signal_id: String,
    #[serde(default)]
    pub signal_type: Option<String>,
    #[serde(default)]
    pub signal_subtype: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub entities: SignalEntities,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub thesis_scores: ThesisScores,
    #[serde(default)]
    pub thesis_reasoning: Option<String>,
    #[serde(default)]
    pub novelty_score: Option<f64>,
    #[serde(default)]
    pub velocity_score: Option<f64>,
    #[serde(default)]
    pub geography: Option<String>,
    #[serde(default)]
    pub timing_stage: Option<String>,
    #[serde(default)]
    pub processed_at: String,
    #[serde(default)]
    pub created_at: String,
}

impl ProcessedSignal {
    /// Best available one-line description for list rendering.
    pub fn headline(&self) -> &str {
        self.title
            .as_deref()
            .or(self.summary.as_deref())
            .unwrap_or("Signal detected")
    }
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// A detected grouping/correlation across multiple signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    pub id: String,
    /// Detected type: `convergence`, `velocity_spike`, `emergence`,
    /// `correlation`, … — unknown values still render.
    #[serde(default)]
    pub pattern_type: String,
    #[serde(default)]
    pub signal_ids: Vec<String>,
    #[serde(default)]
    pub signal_count: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hypothesis: Option<String>,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub opportunity_score: f64,
    #[serde(default)]
    pub primary_thesis_alignment: Option<String>,
    #[serde(default)]
    pub thesis_scores: ThesisScores,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub user_notes: Option<String>,
    #[serde(default)]
    pub detected_at: String,
    #[serde(default)]
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Opportunities
// ---------------------------------------------------------------------------

/// A business-opportunity hypothesis derived from one or more patterns.
///
/// `pattern_ids`/`signal_ids` may reference records that are not part of
/// the currently loaded page — renderers omit what they cannot resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub detailed_analysis: Option<String>,
    #[serde(default)]
    pub pattern_ids: Vec<String>,
    #[serde(default)]
    pub signal_ids: Vec<String>,
    #[serde(default)]
    pub opportunity_type: Option<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub geographies: Vec<String>,
    #[serde(default)]
    pub thesis_scores: ThesisScores,
    #[serde(default)]
    pub primary_thesis: Option<String>,
    #[serde(default)]
    pub execution_fit_reasoning: Option<String>,
    /// Timing stage: `emerging`, `forming`, `ready`, …
    #[serde(default)]
    pub timing_stage: Option<String>,
    #[serde(default)]
    pub time_sensitivity: Option<String>,
    #[serde(default)]
    pub existing_players: Vec<String>,
    #[serde(default)]
    pub incumbent_weakness: Option<String>,
    #[serde(default)]
    pub estimated_complexity: Option<String>,
    #[serde(default)]
    pub key_requirements: Vec<String>,
    #[serde(default)]
    pub potential_moats: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    /// Lifecycle status: `new`, `exploring`, `validating`, `pursuing`,
    /// `passed`, … — unknown values still render.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub user_notes: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in a chat conversation. Ordered, append-only,
/// client-local — the transcript is replayed as history on each turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Build an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Response body from `POST /chat` and `POST /chat/opportunity/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// Aggregate counts carried by the older digest shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestStats {
    pub signals: Option<u64>,
    pub patterns: Option<u64>,
    pub opportunities: Option<u64>,
    pub top_thesis: Option<String>,
}

/// A loosely shaped digest list entry (opportunity, pattern, trend, or
/// velocity spike). The service emits these with varying keys; anything
/// absent renders as nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub pattern_type: Option<String>,
    pub score: Option<f64>,
}

impl DigestItem {
    /// Best available label for rendering, if the entry carries one at all.
    pub fn label(&self) -> Option<&str> {
        self.title.as_deref().or(self.pattern_type.as_deref())
    }
}

/// A point-in-time summary for a period.
///
/// Two schema generations exist in the wild: an older
/// `stats`/`content`/`top_opportunities`/`key_patterns` shape and a newer
/// `signals_processed`/`key_insight`/`new_opportunities`/… shape. This is
/// the canonical union — every field optional, validated here at the
/// boundary so nothing downstream has to guess. [`crate::cli::digest`]
/// reconciles the two generations for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestContent {
    pub period: Option<String>,
    pub generated_at: Option<String>,

    // Newer shape.
    pub signals_processed: Option<u64>,
    pub patterns_detected: Option<u64>,
    pub opportunities_identified: Option<u64>,
    pub top_patterns: Vec<DigestItem>,
    pub new_opportunities: Vec<DigestItem>,
    pub velocity_spikes: Vec<DigestItem>,
    pub emerging_trends: Vec<DigestItem>,
    pub build_ready_ideas: Vec<DigestItem>,
    pub pass_list: Vec<DigestItem>,
    pub key_insight: Option<String>,
    pub recommended_actions: Vec<String>,

    // Older shape.
    pub stats: Option<DigestStats>,
    pub content: Option<String>,
    pub top_opportunities: Vec<DigestItem>,
    pub key_patterns: Vec<DigestItem>,
}

// ---------------------------------------------------------------------------
// Pipeline actions & stats
// ---------------------------------------------------------------------------

/// Acknowledgement from a fire-and-forget pipeline trigger. Carries no
/// data — callers re-fetch the affected resources.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActionAck {
    pub status: String,
    pub message: String,
}

/// Aggregate counters from `GET /stats`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PipelineStats {
    pub signals_count: u64,
    pub patterns_count: u64,
    pub opportunities_count: u64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_roles_serialize_lowercase() {
        let msg = ChatMessage::user("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");

        let msg = ChatMessage::assistant("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn processed_signal_headline_fallback_chain() {
        let mut signal: ProcessedSignal =
            serde_json::from_value(serde_json::json!({ "id": "s1" })).unwrap();
        assert_eq!(signal.headline(), "Signal detected");

        signal.summary = Some("a summary".to_string());
        assert_eq!(signal.headline(), "a summary");

        signal.title = Some("a title".to_string());
        assert_eq!(signal.headline(), "a title");
    }

    #[test]
    fn minimal_opportunity_parses_with_defaults() {
        let opp: Opportunity =
            serde_json::from_str(r#"{"id": "o1", "title": "Thin record"}"#).unwrap();
        assert_eq!(opp.id, "o1");
        assert!(opp.status.is_empty());
        assert!(opp.risks.is_empty());
        assert!(opp.thesis_scores.is_empty());
    }

    #[test]
    fn digest_parses_empty_object() {
        let digest: DigestContent = serde_json::from_str("{}").unwrap();
        assert!(digest.period.is_none());
        assert!(digest.top_patterns.is_empty());
        assert!(digest.stats.is_none());
    }

    #[test]
    fn digest_item_ignores_unknown_keys() {
        let item: DigestItem = serde_json::from_value(serde_json::json!({
            "title": "Spike in permitting tools",
            "velocity": 3.2,
            "sources": ["hn", "reddit"]
        }))
        .unwrap();
        assert_eq!(item.label(), Some("Spike in permitting tools"));
        assert!(item.score.is_none());
    }
}
