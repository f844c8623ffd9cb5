//! View commands for the vantage console.
//!
//! One runner per subcommand:
//! - `vantage dashboard` — stat cards + latest opportunities + recent
//!   signals, with optional `--run <action>` quick actions
//! - `vantage signals` / `patterns` / `opportunities` — filtered lists
//! - `vantage opportunity <id>` — detail view, notes/status updates
//! - `vantage pattern <id>` — pattern notes/status updates
//! - `vantage digest` — periodic digest (see [`digest`])
//! - `vantage chat` — one-shot or interactive conversation
//! - `vantage pipeline <action>` — stage triggers with dependent reloads
//! - `vantage stats` / `health` — service counters and liveness
//!
//! Every runner resolves config, builds one [`ApiClient`], drives the
//! relevant state machine, and renders. Remote failures never escape as
//! process errors — they render as error cards and exit cleanly.

pub mod digest;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::types::{Opportunity, Pattern, ProcessedSignal, RawSignal, Role};
use crate::api::{ApiClient, ApiError, chat, opportunities, patterns, pipeline, signals};
use crate::config::{self, VantageConfig};
use crate::state::actions::{ActionId, ActionRunner, RunOutcome};
use crate::state::chat::{ChatThread, TurnOutcome};
use crate::state::loader::{LoadState, Loader};
use crate::utils::format::{format_number, format_time_ago, pct, truncate};
use crate::utils::labels::{pattern_type_label, source_icon, status_badge, thesis_label};

/// Output format for list and stat commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Suggested prompts shown on an empty chat transcript.
const SUGGESTED_PROMPTS: &[&str] = &[
    "What's the top opportunity right now?",
    "Show me velocity spikes",
    "Explore trust scarcity thesis",
    "What should I pursue?",
    "Summarize this week's signals",
    "Find opportunities in construction",
];

fn build_client(config: &VantageConfig) -> ApiClient {
    ApiClient::from_config(config)
}

// ---------------------------------------------------------------------------
// vantage dashboard
// ---------------------------------------------------------------------------

/// Render the dashboard; optionally run one quick action first.
///
/// With `--run`, the action goes through the [`ActionRunner`] and the full
/// dashboard reloads only after the trigger resolves successfully — a
/// failed trigger leaves whatever was rendered before untouched.
pub fn run_dashboard(action: Option<ActionId>) -> Result<()> {
    let config = config::load();
    let client = build_client(&config);

    match action {
        None => {
            render_dashboard(&client, &config);
            Ok(())
        }
        Some(ActionId::GenerateDigest) => {
            // Digest generation belongs to the digest view.
            digest::run_digest(
                crate::api::digest::DigestPeriod::Weekly,
                true,
                OutputFormat::Table,
            )
        }
        Some(id) => {
            let mut runner = ActionRunner::new();
            println!("{}", format!("Running {}…", id.label()).cyan());
            let outcome = runner.run(
                id,
                || trigger_action(&client, id),
                |_ack| render_dashboard(&client, &config),
            );
            report_action_outcome(id, outcome);
            Ok(())
        }
    }
}

/// Dispatch one pipeline trigger. `GenerateDigest` never reaches this —
/// the digest read is its own trigger (see [`digest`]).
fn trigger_action(
    client: &ApiClient,
    id: ActionId,
) -> Result<crate::api::types::ActionAck, ApiError> {
    match id {
        ActionId::Collect => pipeline::run_collection(client),
        ActionId::Process => pipeline::run_processing(client),
        ActionId::DetectPatterns => pipeline::run_pattern_detection(client),
        ActionId::GenerateOpportunities => pipeline::run_opportunity_generation(client),
        ActionId::GenerateDigest => Err(ApiError::Transport(
            "digest generation is a digest reload".to_string(),
        )),
    }
}

fn report_action_outcome(id: ActionId, outcome: RunOutcome<crate::api::types::ActionAck>) {
    match outcome {
        RunOutcome::Busy(current) => {
            println!(
                "{}",
                format!("{} is already running — try again when it finishes.", current).yellow()
            );
        }
        RunOutcome::Completed(ack) => {
            let note = if ack.message.is_empty() {
                ack.status.clone()
            } else {
                ack.message.clone()
            };
            println!("{} {}", format!("{} triggered:", id.label()).green(), note);
        }
        RunOutcome::Failed(err) => {
            eprintln!("{} {} failed: {err}", "error:".red().bold(), id.label());
            println!(
                "{}",
                "No reload performed — views keep their previous data.".dimmed()
            );
        }
    }
}

/// Fetch and render the dashboard body: stat cards plus the latest
/// opportunities and recent signals panels.
///
/// The three summary fetches run concurrently and fail independently — a
/// resource that errors renders as an empty panel without blocking the
/// others.
fn render_dashboard(client: &ApiClient, config: &VantageConfig) {
    let limit = config.output.dashboard_limit;

    let stats = match pipeline::fetch_stats(client) {
        Ok(stats) => stats,
        Err(err) => {
            eprintln!("{} failed to load stats: {err}", "warning:".yellow());
            Default::default()
        }
    };

    let signal_filter = signals::SignalFilter {
        limit: Some(limit),
        ..Default::default()
    };
    let opportunity_filter = opportunities::OpportunityFilter {
        limit: Some(limit),
        ..Default::default()
    };
    let pattern_filter = patterns::PatternFilter {
        limit: Some(limit),
        ..Default::default()
    };

    let (recent_signals, latest_opportunities, latest_patterns) = std::thread::scope(|scope| {
        let signals_handle = scope.spawn(|| signals::fetch_signals(client, &signal_filter));
        let opportunities_handle =
            scope.spawn(|| opportunities::fetch_opportunities(client, &opportunity_filter));
        let patterns_handle = scope.spawn(|| patterns::fetch_patterns(client, &pattern_filter));
        (
            join_summary(signals_handle, "signals"),
            join_summary(opportunities_handle, "opportunities"),
            join_summary(patterns_handle, "patterns"),
        )
    });

    println!("{}", "Vantage Dashboard".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();
    println!(
        "  {}  signals collected",
        format!("{:>8}", format_number(stats.signals_count)).bold()
    );
    println!(
        "  {}  patterns detected ({} loaded)",
        format!("{:>8}", format_number(stats.patterns_count)).bold(),
        latest_patterns.len()
    );
    println!(
        "  {}  opportunities generated",
        format!("{:>8}", format_number(stats.opportunities_count)).bold()
    );
    println!();

    println!("{}", "Latest Opportunities".bold().cyan());
    if latest_opportunities.is_empty() {
        println!("  {}", "No opportunities yet".dimmed());
    } else {
        for opp in latest_opportunities.iter().take(limit as usize) {
            let thesis = opp
                .primary_thesis
                .as_deref()
                .map(thesis_label)
                .unwrap_or_default();
            let stage = opp.timing_stage.as_deref().unwrap_or("");
            println!(
                "  {} [{}] {} {}",
                truncate(&opp.title, 44),
                status_badge(&opp.status),
                thesis.dimmed(),
                stage.dimmed(),
            );
        }
    }
    println!();

    println!("{}", "Recent Signals".bold().cyan());
    if recent_signals.is_empty() {
        println!("  {}", "No signals yet".dimmed());
    } else {
        for signal in recent_signals.iter().take(limit as usize) {
            println!(
                "  {} {}  {}",
                source_icon(signal.signal_type.as_deref().unwrap_or("")),
                truncate(signal.headline(), 52),
                format_time_ago(&signal.processed_at).dimmed(),
            );
        }
    }
}

fn join_summary<T>(
    handle: std::thread::ScopedJoinHandle<'_, Result<Vec<T>, ApiError>>,
    what: &str,
) -> Vec<T> {
    match handle.join() {
        Ok(Ok(list)) => list,
        Ok(Err(err)) => {
            eprintln!("{} failed to load {what}: {err}", "warning:".yellow());
            Vec::new()
        }
        Err(_) => {
            eprintln!("{} {what} fetch did not complete", "warning:".yellow());
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// vantage signals
// ---------------------------------------------------------------------------

/// List processed (or raw) signals.
pub fn run_signals(
    source_type: Option<String>,
    days: Option<u32>,
    limit: Option<u32>,
    raw: bool,
    format: OutputFormat,
) -> Result<()> {
    let config = config::load();
    let client = build_client(&config);
    let filter = signals::SignalFilter {
        limit: limit.or(Some(config.output.default_limit)),
        source_type,
        days,
    };

    if raw {
        let mut loader: Loader<Vec<RawSignal>> = Loader::new();
        loader.load_with(|| signals::fetch_raw_signals(&client, &filter));
        render_list(
            loader.state(),
            format,
            "raw signals",
            "Run the collection to gather signals from configured sources",
            print_raw_signals_table,
        );
    } else {
        let mut loader: Loader<Vec<ProcessedSignal>> = Loader::new();
        loader.load_with(|| signals::fetch_signals(&client, &filter));
        render_list(
            loader.state(),
            format,
            "signals",
            "Run the collection to gather signals from configured sources",
            print_signals_table,
        );
    }
    Ok(())
}

fn print_signals_table(list: &[ProcessedSignal]) {
    println!("{}", format!("Signals ({})", list.len()).bold().cyan());
    println!("{}", "=".repeat(72));
    for signal in list {
        println!(
            "{} {}  {} {}",
            source_icon(signal.signal_type.as_deref().unwrap_or("")),
            truncate(signal.headline(), 56).bold(),
            signal
                .signal_type
                .as_deref()
                .unwrap_or("unknown")
                .dimmed(),
            format_time_ago(&signal.processed_at).dimmed(),
        );
        if let Some(summary) = &signal.summary
            && signal.title.is_some()
        {
            println!("   {}", truncate(summary, 68).dimmed());
        }
        let mut tags: Vec<String> = Vec::new();
        if let Some(novelty) = signal.novelty_score {
            tags.push(format!("novelty {}", pct(novelty)));
        }
        if let Some(velocity) = signal.velocity_score {
            tags.push(format!("velocity {}", pct(velocity)));
        }
        if !signal.keywords.is_empty() {
            tags.push(signal.keywords.iter().take(4).cloned().collect::<Vec<_>>().join(", "));
        }
        if !tags.is_empty() {
            println!("   {}", tags.join("  ·  ").dimmed());
        }
    }
}

fn print_raw_signals_table(list: &[RawSignal]) {
    println!("{}", format!("Raw Signals ({})", list.len()).bold().cyan());
    println!("{}", "=".repeat(72));
    for signal in list {
        println!(
            "{} {}  {} {}",
            source_icon(&signal.source_type),
            signal.source_type.bold(),
            signal.source_category.dimmed(),
            format_time_ago(&signal.collected_at).dimmed(),
        );
        if let Some(url) = &signal.source_url {
            println!("   {}", url.dimmed());
        }
    }
}

// ---------------------------------------------------------------------------
// vantage patterns
// ---------------------------------------------------------------------------

/// List detected patterns.
pub fn run_patterns(
    status: Option<String>,
    min_score: Option<f64>,
    limit: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let config = config::load();
    let client = build_client(&config);
    let filter = patterns::PatternFilter {
        limit: limit.or(Some(config.output.default_limit)),
        status,
        min_score,
    };

    let mut loader: Loader<Vec<Pattern>> = Loader::new();
    loader.load_with(|| patterns::fetch_patterns(&client, &filter));
    render_list(
        loader.state(),
        format,
        "patterns",
        "Run pattern detection to analyze recent signals",
        print_patterns_table,
    );
    Ok(())
}

fn print_patterns_table(list: &[Pattern]) {
    println!("{}", format!("Patterns ({})", list.len()).bold().cyan());
    println!("{}", "=".repeat(72));
    for pattern in list {
        println!(
            "{}  [{}] {}",
            truncate(&pattern.title, 52).bold(),
            status_badge(&pattern.status),
            pattern_type_label(&pattern.pattern_type).dimmed(),
        );
        println!(
            "   {} signals  ·  confidence {}  ·  opportunity {}  ·  {}",
            pattern.signal_count,
            pct(pattern.confidence_score),
            pct(pattern.opportunity_score),
            format_time_ago(&pattern.detected_at),
        );
        if let Some(description) = &pattern.description {
            println!("   {}", truncate(description, 68).dimmed());
        }
    }
}

// ---------------------------------------------------------------------------
// vantage opportunities
// ---------------------------------------------------------------------------

/// List opportunities.
pub fn run_opportunities(
    status: Option<String>,
    timing_stage: Option<String>,
    limit: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let config = config::load();
    let client = build_client(&config);
    let filter = opportunities::OpportunityFilter {
        limit: limit.or(Some(config.output.default_limit)),
        status,
        timing_stage,
    };

    let mut loader: Loader<Vec<Opportunity>> = Loader::new();
    loader.load_with(|| opportunities::fetch_opportunities(&client, &filter));
    render_list(
        loader.state(),
        format,
        "opportunities",
        "Try adjusting your filters or run the pipeline to generate opportunities",
        print_opportunities_table,
    );
    Ok(())
}

fn print_opportunities_table(list: &[Opportunity]) {
    println!(
        "{}",
        format!("Opportunities ({})", list.len()).bold().cyan()
    );
    println!("{}", "=".repeat(72));
    for opp in list {
        println!(
            "{}  [{}]",
            truncate(&opp.title, 58).bold(),
            status_badge(&opp.status),
        );
        let mut details: Vec<String> = Vec::new();
        if let Some(thesis) = &opp.primary_thesis {
            details.push(thesis_label(thesis));
        }
        if let Some(stage) = &opp.timing_stage {
            details.push(stage.clone());
        }
        details.push(format!("id {}", opp.id));
        println!("   {}", details.join("  ·  ").dimmed());
        if let Some(summary) = &opp.summary {
            println!("   {}", truncate(summary, 68).dimmed());
        }
    }
}

// ---------------------------------------------------------------------------
// vantage opportunity <id>
// ---------------------------------------------------------------------------

/// Show one opportunity; with `--set-status`/`--notes`, PATCH first and
/// render the record the service returns — the badge reflects the new
/// value without a second fetch.
pub fn run_opportunity(
    id: &str,
    set_status: Option<String>,
    notes: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let config = config::load();
    let client = build_client(&config);

    let update = opportunities::OpportunityUpdate {
        status: set_status,
        user_notes: notes,
    };

    let result = if update.is_empty() {
        opportunities::fetch_opportunity(&client, id)
    } else {
        opportunities::update_opportunity(&client, id, &update)
    };

    match result {
        Ok(opp) => match format {
            OutputFormat::Json => print_json(&opp)?,
            OutputFormat::Table => print_opportunity_detail(&opp),
        },
        Err(err) if err.is_not_found() => {
            println!("{}", "Opportunity not found".yellow());
        }
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            print_error_card("the opportunity");
        }
    }
    Ok(())
}

fn print_opportunity_detail(opp: &Opportunity) {
    println!("{}  [{}]", opp.title.bold().cyan(), status_badge(&opp.status));
    if let Some(summary) = &opp.summary {
        println!("{summary}");
    }
    println!();

    if !opp.thesis_scores.is_empty() {
        println!("{}", "Thesis Alignment".bold());
        for (thesis, score) in &opp.thesis_scores {
            println!(
                "  {:<24} {} {:>4}",
                thesis_label(thesis),
                crate::utils::format::score_bar(*score, 20)
                    .color(crate::utils::labels::thesis_color(thesis)),
                pct(*score),
            );
        }
        println!();
    }

    let mut facts: Vec<(&str, String)> = Vec::new();
    if let Some(thesis) = &opp.primary_thesis {
        facts.push(("Primary thesis", thesis_label(thesis)));
    }
    if let Some(stage) = &opp.timing_stage {
        facts.push(("Timing", stage.clone()));
    }
    if let Some(sensitivity) = &opp.time_sensitivity {
        facts.push(("Time sensitivity", sensitivity.clone()));
    }
    if let Some(complexity) = &opp.estimated_complexity {
        facts.push(("Complexity", complexity.clone()));
    }
    if !opp.industries.is_empty() {
        facts.push(("Industries", opp.industries.join(", ")));
    }
    if !opp.pattern_ids.is_empty() {
        facts.push(("Patterns", format!("{} linked", opp.pattern_ids.len())));
    }
    if !opp.signal_ids.is_empty() {
        facts.push(("Signals", format!("{} linked", opp.signal_ids.len())));
    }
    for (label, value) in facts {
        println!("  {:<18} {value}", format!("{label}:").bold());
    }
    println!();

    if let Some(analysis) = &opp.detailed_analysis {
        println!("{}", "Analysis".bold());
        println!("{analysis}");
        println!();
    }

    print_bullet_section("Key Requirements", &opp.key_requirements);
    print_bullet_section("Potential Moats", &opp.potential_moats);
    print_bullet_section("Risks", &opp.risks);

    if let Some(weakness) = &opp.incumbent_weakness {
        println!("{}", "Incumbent Weakness".bold());
        println!("  {weakness}");
        println!();
    }
    if !opp.existing_players.is_empty() {
        println!("{}", "Existing Players".bold());
        println!("  {}", opp.existing_players.join(", "));
        println!();
    }
    if let Some(notes) = &opp.user_notes {
        println!("{}", "Notes".bold());
        println!("  {notes}");
        println!();
    }
    println!(
        "{}",
        format!(
            "created {}  ·  updated {}",
            format_time_ago(&opp.created_at),
            format_time_ago(&opp.updated_at)
        )
        .dimmed()
    );
}

fn print_bullet_section(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{}", title.bold());
    for item in items {
        println!("  • {item}");
    }
    println!();
}

// ---------------------------------------------------------------------------
// vantage pattern <id>
// ---------------------------------------------------------------------------

/// Update a pattern's status or notes and render the returned record.
pub fn run_pattern_update(
    id: &str,
    set_status: Option<String>,
    notes: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let config = config::load();
    let client = build_client(&config);

    let update = patterns::PatternUpdate {
        status: set_status,
        user_notes: notes,
    };
    if update.is_empty() {
        println!(
            "{}",
            "Nothing to update — pass --set-status and/or --notes.".yellow()
        );
        return Ok(());
    }

    match patterns::update_pattern(&client, id, &update) {
        Ok(pattern) => match format {
            OutputFormat::Json => print_json(&pattern)?,
            OutputFormat::Table => {
                println!(
                    "{} {}  [{}]",
                    "updated".green(),
                    pattern.title.bold(),
                    status_badge(&pattern.status),
                );
                if let Some(notes) = &pattern.user_notes {
                    println!("  {}", notes.dimmed());
                }
            }
        },
        Err(err) if err.is_not_found() => {
            println!("{}", "Pattern not found".yellow());
        }
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            print_error_card("the pattern");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// vantage pipeline <action>
// ---------------------------------------------------------------------------

/// Trigger one pipeline stage, then reload the dependent view on success.
pub fn run_pipeline(action: ActionId, format: OutputFormat) -> Result<()> {
    if action == ActionId::GenerateDigest {
        // The digest read is itself the generation trigger.
        return digest::run_digest(crate::api::digest::DigestPeriod::Weekly, true, format);
    }

    let config = config::load();
    let client = build_client(&config);
    let mut runner = ActionRunner::new();

    println!("{}", format!("Running {}…", action.label()).cyan());
    let outcome = runner.run(
        action,
        || trigger_action(&client, action),
        |_ack| reload_dependent_view(&client, &config, action, format),
    );
    report_action_outcome(action, outcome);
    Ok(())
}

/// Reload the view that depends on the mutated resource. Runs only after
/// a successful trigger.
fn reload_dependent_view(
    client: &ApiClient,
    config: &VantageConfig,
    action: ActionId,
    format: OutputFormat,
) {
    let limit = Some(config.output.default_limit);
    println!();
    match action {
        ActionId::Collect | ActionId::Process => {
            let filter = signals::SignalFilter {
                limit,
                ..Default::default()
            };
            let mut loader: Loader<Vec<ProcessedSignal>> = Loader::new();
            loader.load_with(|| signals::fetch_signals(client, &filter));
            render_list(
                loader.state(),
                format,
                "signals",
                "Run the collection to gather signals from configured sources",
                print_signals_table,
            );
        }
        ActionId::DetectPatterns => {
            let filter = patterns::PatternFilter {
                limit,
                ..Default::default()
            };
            let mut loader: Loader<Vec<Pattern>> = Loader::new();
            loader.load_with(|| patterns::fetch_patterns(client, &filter));
            render_list(
                loader.state(),
                format,
                "patterns",
                "Run pattern detection to analyze recent signals",
                print_patterns_table,
            );
        }
        ActionId::GenerateOpportunities => {
            let filter = opportunities::OpportunityFilter {
                limit,
                ..Default::default()
            };
            let mut loader: Loader<Vec<Opportunity>> = Loader::new();
            loader.load_with(|| opportunities::fetch_opportunities(client, &filter));
            render_list(
                loader.state(),
                format,
                "opportunities",
                "Try adjusting your filters or run the pipeline to generate opportunities",
                print_opportunities_table,
            );
        }
        ActionId::GenerateDigest => {}
    }
}

// ---------------------------------------------------------------------------
// vantage chat
// ---------------------------------------------------------------------------

/// One-shot or interactive chat. With `--opportunity <id>`, turns are
/// scoped to that opportunity and carry no history — the id is the whole
/// context.
pub fn run_chat(message: Option<String>, opportunity_id: Option<String>) -> Result<()> {
    let config = config::load();
    let client = build_client(&config);
    let mut thread = ChatThread::new();

    match message {
        Some(message) => {
            send_and_render(&client, &mut thread, &message, opportunity_id.as_deref());
            Ok(())
        }
        None => chat_repl(&client, &mut thread, opportunity_id.as_deref()),
    }
}

fn chat_repl(client: &ApiClient, thread: &mut ChatThread, opportunity_id: Option<&str>) -> Result<()> {
    match opportunity_id {
        Some(id) => println!("{}", format!("Chat about opportunity {id}").bold().cyan()),
        None => println!("{}", "Opportunity Intelligence Agent".bold().cyan()),
    }
    println!(
        "{}",
        "Ask about opportunities, signals, patterns, or investment theses.".dimmed()
    );
    if thread.is_empty() && opportunity_id.is_none() {
        println!("{}", "Suggested:".dimmed());
        for prompt in SUGGESTED_PROMPTS {
            println!("  {}", prompt.dimmed());
        }
    }
    println!("{}", "Type 'exit' to leave.\n".dimmed());

    let stdin = std::io::stdin();
    loop {
        print!("{} ", ">".bold());
        std::io::stdout().flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed reading chat input")?;
        if read == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        send_and_render(client, thread, input, opportunity_id);
    }
    Ok(())
}

/// Run one turn through the conversation manager and render the reply.
fn send_and_render(
    client: &ApiClient,
    thread: &mut ChatThread,
    input: &str,
    opportunity_id: Option<&str>,
) {
    let outcome = thread.send_turn(input, |message, history| {
        let reply = match opportunity_id {
            Some(id) => chat::chat_about_opportunity(client, id, message)?,
            None => chat::send_message(client, message, history)?,
        };
        Ok(reply.response)
    });

    match outcome {
        TurnOutcome::Rejected => {
            if !input.trim().is_empty() {
                println!("{}", "A reply is still pending — try again.".yellow());
            }
        }
        TurnOutcome::Replied => {
            if let Some(reply) = last_assistant_message(thread) {
                println!("{} {}\n", "assistant:".bold().cyan(), reply);
            }
        }
        TurnOutcome::FellBack(err) => {
            eprintln!("{} chat request failed: {err}", "error:".red().bold());
            if let Some(reply) = last_assistant_message(thread) {
                println!("{} {}\n", "assistant:".bold().cyan(), reply);
            }
        }
    }
}

fn last_assistant_message(thread: &ChatThread) -> Option<&str> {
    thread
        .messages()
        .iter()
        .rev()
        .find(|m| m.role == Role::Assistant)
        .map(|m| m.content.as_str())
}

// ---------------------------------------------------------------------------
// vantage stats
// ---------------------------------------------------------------------------

/// Show pipeline entity counters.
pub fn run_stats(format: OutputFormat) -> Result<()> {
    let config = config::load();
    let client = build_client(&config);

    match pipeline::fetch_stats(&client) {
        Ok(stats) => match format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "signals_count": stats.signals_count,
                    "patterns_count": stats.patterns_count,
                    "opportunities_count": stats.opportunities_count,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            OutputFormat::Table => {
                println!("{}", "Pipeline Stats".bold().cyan());
                println!("{}", "=".repeat(40));
                println!("  {} {}", "Signals:      ".bold(), format_number(stats.signals_count));
                println!("  {} {}", "Patterns:     ".bold(), format_number(stats.patterns_count));
                println!(
                    "  {} {}",
                    "Opportunities:".bold(),
                    format_number(stats.opportunities_count)
                );
            }
        },
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            print_error_card("stats");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// vantage health
// ---------------------------------------------------------------------------

/// Check that the pipeline service is reachable.
pub fn run_health() -> Result<()> {
    let config = config::load();
    let client = build_client(&config);

    println!("{}", "Vantage Health Check".bold().cyan());
    println!("{}", "=".repeat(40));
    println!("  {} {}", "Service:".bold(), client.base_url());

    match pipeline::check_health(&client) {
        Ok(body) => {
            let status = body
                .get("status")
                .and_then(|v| v.as_str())
                .unwrap_or("ok");
            println!("  {} {}", "Status: ".bold(), status.green());
        }
        Err(err) => {
            println!("  {} {}", "Status: ".bold(), "unreachable".red());
            eprintln!("{} {err}", "error:".red().bold());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared rendering
// ---------------------------------------------------------------------------

/// Render one loader's terminal state: table or JSON for data, an
/// empty-state card for a loaded-but-empty collection, a separate error
/// card for a failed fetch.
fn render_list<T: serde::Serialize>(
    state: &LoadState<Vec<T>>,
    format: OutputFormat,
    what: &str,
    empty_hint: &str,
    print_table: impl Fn(&[T]),
) {
    match state {
        LoadState::Loaded(list) if list.is_empty() => {
            if format == OutputFormat::Json {
                println!("[]");
                return;
            }
            println!("{}", format!("No {what} found").yellow());
            println!("{}", empty_hint.dimmed());
        }
        LoadState::Loaded(list) => match format {
            OutputFormat::Json => {
                if let Err(err) = print_json(list) {
                    eprintln!("{} {err}", "error:".red().bold());
                }
            }
            OutputFormat::Table => print_table(list),
        },
        LoadState::Errored(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            print_error_card(what);
        }
        // List commands always drive the loader to a terminal state.
        LoadState::Idle | LoadState::Loading => {}
    }
}

fn print_error_card(what: &str) {
    println!("{}", format!("Failed to load {what}").red());
    println!(
        "{}",
        "Check the service with `vantage health`, then retry.".dimmed()
    );
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
