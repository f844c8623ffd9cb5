//! Digest view: schema reconciliation and rendering.
//!
//! The service has emitted two digest generations — an older
//! `stats`/`content`/`top_opportunities`/`key_patterns` shape and a newer
//! `signals_processed`/`key_insight`/`new_opportunities`/… shape — and a
//! live deployment may answer with either. [`DigestView`] folds both into
//! one renderable structure: the newer field wins when both are present,
//! counts coerce to zero, and every section is independently optional.
//! A digest missing any subset of sections renders the rest.

use anyhow::Result;
use colored::Colorize;

use crate::api::digest::{DigestPeriod, fetch_digest};
use crate::api::types::{DigestContent, DigestItem};
use crate::api::{ApiClient, ApiError};
use crate::config;
use crate::state::actions::{ActionId, ActionRunner, RunOutcome};
use crate::state::loader::{LoadState, Loader};
use crate::utils::format::{format_number, format_time_ago, pct};

use super::OutputFormat;

// ---------------------------------------------------------------------------
// Schema reconciliation
// ---------------------------------------------------------------------------

/// A digest flattened for rendering, whichever schema generation the
/// service answered with.
#[derive(Debug, Default)]
pub struct DigestView {
    pub generated_at: Option<String>,
    pub signals_processed: u64,
    pub patterns_detected: u64,
    pub opportunities_identified: u64,
    pub top_thesis: Option<String>,
    /// Narrative summary: `key_insight`, falling back to `content`.
    pub summary: Option<String>,
    /// `new_opportunities`, falling back to `top_opportunities`.
    pub opportunities: Vec<DigestItem>,
    /// `top_patterns`, falling back to `key_patterns`.
    pub patterns: Vec<DigestItem>,
    pub velocity_spikes: Vec<DigestItem>,
    pub emerging_trends: Vec<DigestItem>,
    pub build_ready_ideas: Vec<DigestItem>,
    pub pass_list: Vec<DigestItem>,
    pub recommended_actions: Vec<String>,
}

impl DigestView {
    pub fn from_content(content: &DigestContent) -> Self {
        let stats = content.stats.clone().unwrap_or_default();
        Self {
            generated_at: content.generated_at.clone(),
            signals_processed: content.signals_processed.or(stats.signals).unwrap_or(0),
            patterns_detected: content.patterns_detected.or(stats.patterns).unwrap_or(0),
            opportunities_identified: content
                .opportunities_identified
                .or(stats.opportunities)
                .unwrap_or(0),
            top_thesis: stats.top_thesis,
            summary: content
                .key_insight
                .clone()
                .or_else(|| content.content.clone()),
            opportunities: pick_list(&content.new_opportunities, &content.top_opportunities),
            patterns: pick_list(&content.top_patterns, &content.key_patterns),
            velocity_spikes: content.velocity_spikes.clone(),
            emerging_trends: content.emerging_trends.clone(),
            build_ready_ideas: content.build_ready_ideas.clone(),
            pass_list: content.pass_list.clone(),
            recommended_actions: content.recommended_actions.clone(),
        }
    }

    /// True when the digest carries nothing renderable at all.
    pub fn is_bare(&self) -> bool {
        self.summary.is_none()
            && self.opportunities.is_empty()
            && self.patterns.is_empty()
            && self.velocity_spikes.is_empty()
            && self.emerging_trends.is_empty()
            && self.build_ready_ideas.is_empty()
            && self.pass_list.is_empty()
            && self.recommended_actions.is_empty()
            && self.signals_processed == 0
            && self.patterns_detected == 0
            && self.opportunities_identified == 0
    }
}

fn pick_list(preferred: &[DigestItem], fallback: &[DigestItem]) -> Vec<DigestItem> {
    if preferred.is_empty() {
        fallback.to_vec()
    } else {
        preferred.to_vec()
    }
}

// ---------------------------------------------------------------------------
// vantage digest
// ---------------------------------------------------------------------------

/// Show (or generate) the digest for a period.
///
/// The service generates a digest as a side effect of the read itself, so
/// `--generate` is the same GET routed through the action controller for
/// mutual exclusion with the other pipeline triggers.
pub fn run_digest(period: DigestPeriod, generate: bool, format: OutputFormat) -> Result<()> {
    let config = config::load();
    let client = ApiClient::from_config(&config);

    if generate {
        let mut runner = ActionRunner::new();
        println!("{}", format!("Generating {period} digest…").cyan());
        let outcome = runner.run(
            ActionId::GenerateDigest,
            || fetch_digest(&client, period),
            |digest| render_digest_result(digest, period, format),
        );
        match outcome {
            RunOutcome::Busy(current) => {
                println!(
                    "{}",
                    format!("{current} is already running — try again when it finishes.").yellow()
                );
            }
            RunOutcome::Completed(_) => {}
            RunOutcome::Failed(err) => report_digest_error(&err, period),
        }
        return Ok(());
    }

    let mut loader: Loader<DigestContent> = Loader::new();
    loader.load_with(|| fetch_digest(&client, period));
    match loader.state() {
        LoadState::Loaded(digest) => render_digest_result(digest, period, format),
        LoadState::Errored(err) => report_digest_error(err, period),
        LoadState::Idle | LoadState::Loading => {}
    }
    Ok(())
}

fn report_digest_error(err: &ApiError, period: DigestPeriod) {
    if err.is_not_found() {
        println!("{}", format!("No {period} digest available").yellow());
        println!(
            "{}",
            "Generate one with `vantage digest --generate` to see a summary of recent activity."
                .dimmed()
        );
    } else {
        eprintln!("{} {err}", "error:".red().bold());
        println!("{}", "Failed to load the digest".red());
        println!(
            "{}",
            "Check the service with `vantage health`, then retry.".dimmed()
        );
    }
}

fn render_digest_result(digest: &DigestContent, period: DigestPeriod, format: OutputFormat) {
    if format == OutputFormat::Json {
        match serde_json::to_string_pretty(digest) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("{} {err}", "error:".red().bold()),
        }
        return;
    }
    print_digest(&DigestView::from_content(digest), period);
}

fn print_digest(view: &DigestView, period: DigestPeriod) {
    let mut title = format!("{period} digest");
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    println!("{}", title.bold().cyan());
    if let Some(generated_at) = &view.generated_at {
        println!(
            "{}",
            format!("Generated {}", format_time_ago(generated_at)).dimmed()
        );
    }
    println!("{}", "=".repeat(60));
    println!();

    println!(
        "  {} signals processed  ·  {} patterns detected  ·  {} opportunities",
        format_number(view.signals_processed).bold(),
        format_number(view.patterns_detected).bold(),
        format_number(view.opportunities_identified).bold(),
    );
    if let Some(thesis) = &view.top_thesis {
        println!(
            "  top thesis: {}",
            crate::utils::labels::thesis_label(thesis)
        );
    }
    println!();

    if let Some(summary) = &view.summary {
        println!("{}", "Summary".bold());
        println!("{summary}");
        println!();
    }

    print_item_section("Top Opportunities", &view.opportunities);
    print_item_section("Key Patterns", &view.patterns);
    print_item_section("Velocity Spikes", &view.velocity_spikes);
    print_item_section("Emerging Trends", &view.emerging_trends);
    print_item_section("Build-Ready Ideas", &view.build_ready_ideas);
    print_item_section("Pass List", &view.pass_list);

    if !view.recommended_actions.is_empty() {
        println!("{}", "Recommended Actions".bold());
        for action in &view.recommended_actions {
            println!("  • {action}");
        }
        println!();
    }

    if view.is_bare() {
        println!("{}", "This digest is empty.".dimmed());
    }
}

fn print_item_section(title: &str, items: &[DigestItem]) {
    if items.is_empty() {
        return;
    }
    println!("{}", title.bold());
    for item in items {
        let Some(label) = item.label() else {
            continue;
        };
        match item.score {
            Some(score) => println!("  {}  {}", label.bold(), pct(score).dimmed()),
            None => println!("  {}", label.bold()),
        }
        if let Some(description) = &item.description {
            println!("    {}", description.dimmed());
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newer_variant() -> DigestContent {
        serde_json::from_value(serde_json::json!({
            "period": "weekly",
            "generated_at": "2026-08-03T09:00:00Z",
            "signals_processed": 147,
            "patterns_detected": 12,
            "opportunities_identified": 4,
            "top_patterns": [{ "title": "Permitting tools converge", "score": 0.82 }],
            "new_opportunities": [{ "title": "Inspection marketplace", "description": "Licensed inspectors on demand" }],
            "velocity_spikes": [{ "title": "Contractor-of-record chatter" }],
            "key_insight": "Construction compliance is accelerating.",
            "recommended_actions": ["Validate inspector supply"]
        }))
        .unwrap()
    }

    fn older_variant() -> DigestContent {
        serde_json::from_value(serde_json::json!({
            "period": "weekly",
            "generated_at": "2026-08-03T09:00:00Z",
            "stats": { "signals": 90, "patterns": 7, "opportunities": 2, "top_thesis": "trust_scarcity" },
            "content": "A quieter week with one standout pattern.",
            "top_opportunities": [{ "title": "Escrow for trades", "score": 0.74 }],
            "key_patterns": [{ "pattern_type": "convergence" }]
        }))
        .unwrap()
    }

    #[test]
    fn newer_variant_maps_directly() {
        let view = DigestView::from_content(&newer_variant());
        assert_eq!(view.signals_processed, 147);
        assert_eq!(view.opportunities.len(), 1);
        assert_eq!(view.patterns.len(), 1);
        assert_eq!(view.velocity_spikes.len(), 1);
        assert_eq!(
            view.summary.as_deref(),
            Some("Construction compliance is accelerating.")
        );
        assert!(view.top_thesis.is_none());
    }

    #[test]
    fn older_variant_maps_through_fallbacks() {
        let view = DigestView::from_content(&older_variant());
        assert_eq!(view.signals_processed, 90);
        assert_eq!(view.patterns_detected, 7);
        assert_eq!(view.top_thesis.as_deref(), Some("trust_scarcity"));
        assert_eq!(
            view.summary.as_deref(),
            Some("A quieter week with one standout pattern.")
        );
        assert_eq!(view.opportunities[0].title.as_deref(), Some("Escrow for trades"));
        // A pattern entry with only a type still gets a label.
        assert_eq!(view.patterns[0].label(), Some("convergence"));
    }

    #[test]
    fn newer_names_win_when_both_generations_present() {
        let content: DigestContent = serde_json::from_value(serde_json::json!({
            "signals_processed": 200,
            "stats": { "signals": 90 },
            "key_insight": "new narrative",
            "content": "old narrative",
            "new_opportunities": [{ "title": "new list" }],
            "top_opportunities": [{ "title": "old list" }]
        }))
        .unwrap();
        let view = DigestView::from_content(&content);
        assert_eq!(view.signals_processed, 200);
        assert_eq!(view.summary.as_deref(), Some("new narrative"));
        assert_eq!(view.opportunities[0].title.as_deref(), Some("new list"));
    }

    #[test]
    fn empty_digest_is_bare_with_zero_counts() {
        let view = DigestView::from_content(&DigestContent::default());
        assert!(view.is_bare());
        assert_eq!(view.signals_processed, 0);
        assert_eq!(view.opportunities_identified, 0);
    }

    #[test]
    fn missing_sections_are_simply_absent() {
        let content: DigestContent = serde_json::from_value(serde_json::json!({
            "signals_processed": 10,
            "key_insight": "only an insight"
        }))
        .unwrap();
        let view = DigestView::from_content(&content);
        assert!(!view.is_bare());
        assert!(view.velocity_spikes.is_empty());
        assert!(view.recommended_actions.is_empty());
    }
}
