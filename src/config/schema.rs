/// Configuration schema and defaults for vantage.
///
/// Maps to the `~/.vantage/config.toml` and `.vantage.toml` file schemas
/// with sections `[api]`, `[output]`, and `[logging]`. Every field has a
/// built-in default — users only set what they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level vantage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VantageConfig {
    pub api: ApiConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Remote pipeline service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the pipeline service.
    /// Can also be set via `VANTAGE_API_URL`.
    pub base_url: String,
    /// Per-request timeout (milliseconds).
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 30_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [output]
// ---------------------------------------------------------------------------

/// List rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default page size for list views when `--limit` is not given.
    pub default_limit: u32,
    /// Row count for each dashboard summary panel.
    pub dashboard_limit: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            dashboard_limit: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append one JSONL line per API request to `~/.vantage/requests.jsonl`.
    /// Best-effort — logging failures never affect commands.
    pub requests: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { requests: true }
    }
}
