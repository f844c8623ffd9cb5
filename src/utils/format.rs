//! Value formatting for table output.

use chrono::{DateTime, Utc};

/// Render a service timestamp as a relative age: "just now", "5m ago",
/// "3h ago", "2d ago", then a short date beyond a week. Unparseable or
/// missing timestamps render as an em-dash placeholder rather than
/// failing the view.
pub fn format_time_ago(timestamp: &str) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
        return "—".to_string();
    };
    let seconds = (Utc::now() - parsed.with_timezone(&Utc)).num_seconds();

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3_600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3_600)
    } else if seconds < 604_800 {
        format!("{}d ago", seconds / 86_400)
    } else {
        parsed.format("%b %-d, %Y").to_string()
    }
}

/// Format an integer with thousands separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Truncate to `max_len` characters (not bytes — remote titles are
/// arbitrary text), appending "…" if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// Render a [0, 1] score as a whole percentage, e.g. `87%`.
pub fn pct(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

/// Render a [0, 1] score as a fixed-width bar, e.g. `███████░░░`.
pub fn score_bar(score: f64, width: usize) -> String {
    let clamped = score.clamp(0.0, 1.0);
    let filled = (clamped * width as f64).round() as usize;
    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..width {
        bar.push('░');
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(duration: Duration) -> String {
        (Utc::now() - duration).to_rfc3339()
    }

    #[test]
    fn time_ago_buckets() {
        assert_eq!(format_time_ago(&ago(Duration::seconds(10))), "just now");
        assert_eq!(format_time_ago(&ago(Duration::minutes(5))), "5m ago");
        assert_eq!(format_time_ago(&ago(Duration::hours(3))), "3h ago");
        assert_eq!(format_time_ago(&ago(Duration::days(2))), "2d ago");
    }

    #[test]
    fn time_ago_falls_back_on_garbage() {
        assert_eq!(format_time_ago(""), "—");
        assert_eq!(format_time_ago("not-a-date"), "—");
    }

    #[test]
    fn old_dates_render_as_short_date() {
        let rendered = format_time_ago("2024-03-09T12:00:00Z");
        assert_eq!(rendered, "Mar 9, 2024");
    }

    #[test]
    fn number_grouping() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        // Multibyte content must not split mid-character.
        assert_eq!(truncate("📈📈📈📈", 3), "📈📈…");
    }

    #[test]
    fn pct_rounds() {
        assert_eq!(pct(0.874), "87%");
        assert_eq!(pct(0.875), "88%");
        assert_eq!(pct(0.0), "0%");
        assert_eq!(pct(1.0), "100%");
    }

    #[test]
    fn score_bar_fills_proportionally() {
        assert_eq!(score_bar(0.0, 10), "░░░░░░░░░░");
        assert_eq!(score_bar(0.5, 10), "█████░░░░░");
        assert_eq!(score_bar(1.0, 10), "██████████");
        // Out-of-range scores clamp instead of overflowing the bar.
        assert_eq!(score_bar(1.7, 4), "████");
    }
}
