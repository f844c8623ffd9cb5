//! Label and color vocabulary for statuses, theses, and sources.
//!
//! Status, thesis-axis, pattern-type, and source values come from fixed
//! enumerations the service is known to emit, but the client must never
//! choke on a value outside them — every lookup here falls back to
//! rendering the raw value with a neutral color.

use colored::{Color, ColoredString, Colorize};

/// Human label for a thesis axis.
///
/// Two generations of axis names exist in the service's output; both
/// resolve. Anything else renders as the raw key.
pub fn thesis_label(thesis: &str) -> String {
    match thesis.to_ascii_lowercase().as_str() {
        "ai_leverage" => "AI Leverage".to_string(),
        "ai_enablement" => "AI Enablement".to_string(),
        "trust_scarcity" => "Trust Scarcity".to_string(),
        "physical_digital" => "Physical-Digital".to_string(),
        "incumbent_decay" => "Incumbent Decay".to_string(),
        "incumbent_disruption" => "Incumbent Disruption".to_string(),
        "speed_advantage" => "Speed Advantage".to_string(),
        "execution_fit" => "Execution Fit".to_string(),
        "execution_arbitrage" => "Execution Arbitrage".to_string(),
        _ => thesis.to_string(),
    }
}

/// Color for a thesis axis.
pub fn thesis_color(thesis: &str) -> Color {
    match thesis.to_ascii_lowercase().as_str() {
        "ai_leverage" | "ai_enablement" => Color::Cyan,
        "trust_scarcity" => Color::Green,
        "physical_digital" => Color::Yellow,
        "incumbent_decay" | "incumbent_disruption" => Color::Red,
        "speed_advantage" => Color::Magenta,
        "execution_fit" | "execution_arbitrage" => Color::Blue,
        _ => Color::White,
    }
}

/// Render an opportunity/pattern status as a colored badge.
pub fn status_badge(status: &str) -> ColoredString {
    match status.to_ascii_lowercase().as_str() {
        "new" => status.cyan(),
        "exploring" => status.blue(),
        "validating" => status.yellow(),
        "pursuing" => status.green(),
        "passed" => status.dimmed(),
        "active" => status.green(),
        "archived" => status.dimmed(),
        _ => status.normal(),
    }
}

/// Human label for a pattern type.
pub fn pattern_type_label(pattern_type: &str) -> String {
    match pattern_type.to_ascii_lowercase().as_str() {
        "convergence" => "Convergence".to_string(),
        "velocity_spike" => "Velocity Spike".to_string(),
        "emergence" => "Emergence".to_string(),
        "correlation" => "Correlation".to_string(),
        _ => pattern_type.to_string(),
    }
}

/// Icon for a signal source.
pub fn source_icon(source: &str) -> &'static str {
    match source.to_ascii_lowercase().as_str() {
        "google_trends" => "📈",
        "github_trending" => "🐙",
        "hacker_news" | "hn" => "🔶",
        "reddit" => "🔴",
        "product_hunt" => "🦁",
        "twitter" => "🐦",
        "news" => "📰",
        "government" => "🏛",
        _ => "📊",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_thesis_labels() {
        assert_eq!(thesis_label("ai_leverage"), "AI Leverage");
        assert_eq!(thesis_label("TRUST_SCARCITY"), "Trust Scarcity");
        // Both axis-name generations resolve.
        assert_eq!(thesis_label("incumbent_decay"), "Incumbent Decay");
        assert_eq!(thesis_label("incumbent_disruption"), "Incumbent Disruption");
    }

    #[test]
    fn unknown_thesis_renders_raw_key() {
        assert_eq!(thesis_label("quantum_moats"), "quantum_moats");
        assert_eq!(thesis_color("quantum_moats"), Color::White);
    }

    #[test]
    fn unknown_status_still_renders() {
        let badge = status_badge("hibernating");
        assert!(badge.to_string().contains("hibernating"));
    }

    #[test]
    fn unknown_pattern_type_and_source_fall_back() {
        assert_eq!(pattern_type_label("seasonality"), "seasonality");
        assert_eq!(source_icon("carrier_pigeon"), "📊");
    }
}
