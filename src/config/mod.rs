/// Configuration system for vantage.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::VantageConfig::default()`]
/// 2. **User global config** — `~/.vantage/config.toml`
/// 3. **Project local config** — `.vantage.toml` in the current working directory
/// 4. **Environment variables** — `VANTAGE_*` overrides (highest precedence)
///
/// Later layers override earlier ones. Missing sections in a TOML file
/// fall back to the previous layer's values; malformed files are ignored
/// so a bad config edit never takes the console down.
pub mod schema;

use std::fs;
use std::path::PathBuf;

pub use schema::VantageConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved vantage configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML →
/// env vars. This is the primary entry point for the binary.
pub fn load() -> VantageConfig {
    let mut config = VantageConfig::default();

    // Layer 2: user global config (~/.vantage/config.toml)
    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    // Layer 3: project local config (.vantage.toml)
    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    // Layer 4: environment variable overrides
    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed.
fn load_toml_file(path: Option<PathBuf>) -> Option<VantageConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.vantage/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vantage").join("config.toml"))
}

/// Path to the project local config: `.vantage.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".vantage.toml"))
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `VANTAGE_API_URL` — pipeline service base URL
/// - `VANTAGE_TIMEOUT_MS` — per-request timeout
/// - `VANTAGE_LIMIT` — default list page size
/// - `VANTAGE_REQUEST_LOG` — request-log toggle (`1`/`true`/`yes`/`on`)
fn apply_env_overrides(config: &mut VantageConfig) {
    if let Ok(val) = std::env::var("VANTAGE_API_URL")
        && !val.is_empty()
    {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("VANTAGE_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("VANTAGE_LIMIT")
        && let Ok(limit) = val.parse::<u32>()
    {
        config.output.default_limit = limit;
    }
    if let Ok(val) = std::env::var("VANTAGE_REQUEST_LOG") {
        config.logging.requests = is_truthy(&val);
    }
}

/// Interpret common truthy strings: `1`, `true`, `yes`, `on` (any case).
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
