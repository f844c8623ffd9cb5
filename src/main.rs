use anyhow::Result;
use clap::{Parser, Subcommand};

use vantage::api::digest::DigestPeriod;
use vantage::cli;
use vantage::state::actions::ActionId;

#[derive(Debug, Parser)]
#[command(name = "vantage")]
#[command(about = "Console for the signal → pattern → opportunity pipeline")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Overview: stats, latest opportunities, recent signals
    Dashboard {
        /// Run a quick action first, then reload:
        /// collect | detect-patterns | process | generate-opportunities
        #[arg(long)]
        run: Option<String>,
    },
    /// List processed signals (or raw collection records with --raw)
    Signals {
        /// Filter by source type (reddit, twitter, news, hn, government, …)
        #[arg(long)]
        source_type: Option<String>,
        /// Only include signals from the last N days
        #[arg(long)]
        days: Option<u32>,
        /// Maximum number of rows
        #[arg(long)]
        limit: Option<u32>,
        /// Show raw collection records instead of processed signals
        #[arg(long)]
        raw: bool,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List detected patterns
    Patterns {
        /// Filter by lifecycle status
        #[arg(long)]
        status: Option<String>,
        /// Minimum opportunity score in [0, 1]
        #[arg(long)]
        min_score: Option<f64>,
        /// Maximum number of rows
        #[arg(long)]
        limit: Option<u32>,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Update a pattern's status or notes
    Pattern {
        /// Pattern id
        id: String,
        /// New lifecycle status
        #[arg(long)]
        set_status: Option<String>,
        /// Replace the user notes
        #[arg(long)]
        notes: Option<String>,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List opportunities
    Opportunities {
        /// Filter by status (new, exploring, validating, pursuing, passed)
        #[arg(long)]
        status: Option<String>,
        /// Filter by timing stage (emerging, forming, ready)
        #[arg(long)]
        timing_stage: Option<String>,
        /// Maximum number of rows
        #[arg(long)]
        limit: Option<u32>,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show one opportunity; optionally update its status or notes
    Opportunity {
        /// Opportunity id
        id: String,
        /// New status (new, exploring, validating, pursuing, passed)
        #[arg(long)]
        set_status: Option<String>,
        /// Replace the user notes
        #[arg(long)]
        notes: Option<String>,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show the periodic digest
    Digest {
        /// Digest period: weekly (default), daily, monthly
        #[arg(long, default_value = "weekly")]
        period: String,
        /// Generate a fresh digest (the read is the trigger)
        #[arg(long)]
        generate: bool,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Chat with the intelligence agent (interactive when no message given)
    Chat {
        /// One-shot message; omit for an interactive session
        message: Vec<String>,
        /// Scope the conversation to one opportunity
        #[arg(long)]
        opportunity: Option<String>,
    },
    /// Trigger a pipeline stage:
    /// collect | process | detect-patterns | generate-opportunities | generate-digest
    Pipeline {
        /// The action to run
        action: String,
        /// Output format for the reloaded view: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show pipeline entity counters
    Stats {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Check that the pipeline service is reachable
    Health,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Dashboard { run } => {
            let action = match run.as_deref() {
                None => None,
                Some(raw) => match ActionId::parse(raw) {
                    Some(action) => Some(action),
                    None => {
                        anyhow::bail!(
                            "unknown action '{raw}' — expected collect, process, \
                             detect-patterns, generate-opportunities, or generate-digest"
                        );
                    }
                },
            };
            cli::run_dashboard(action)
        }
        Commands::Signals {
            source_type,
            days,
            limit,
            raw,
            format,
        } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_signals(source_type, days, limit, raw, fmt)
        }
        Commands::Patterns {
            status,
            min_score,
            limit,
            format,
        } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_patterns(status, min_score, limit, fmt)
        }
        Commands::Pattern {
            id,
            set_status,
            notes,
            format,
        } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_pattern_update(&id, set_status, notes, fmt)
        }
        Commands::Opportunities {
            status,
            timing_stage,
            limit,
            format,
        } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_opportunities(status, timing_stage, limit, fmt)
        }
        Commands::Opportunity {
            id,
            set_status,
            notes,
            format,
        } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_opportunity(&id, set_status, notes, fmt)
        }
        Commands::Digest {
            period,
            generate,
            format,
        } => {
            let Some(period) = DigestPeriod::parse(&period) else {
                anyhow::bail!("unknown period '{period}' — expected daily, weekly, or monthly");
            };
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::digest::run_digest(period, generate, fmt)
        }
        Commands::Chat {
            message,
            opportunity,
        } => {
            let message = if message.is_empty() {
                None
            } else {
                Some(message.join(" "))
            };
            cli::run_chat(message, opportunity)
        }
        Commands::Pipeline { action, format } => {
            let Some(action) = ActionId::parse(&action) else {
                anyhow::bail!(
                    "unknown action '{action}' — expected collect, process, \
                     detect-patterns, generate-opportunities, or generate-digest"
                );
            };
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_pipeline(action, fmt)
        }
        Commands::Stats { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_stats(fmt)
        }
        Commands::Health => cli::run_health(),
    }
}
