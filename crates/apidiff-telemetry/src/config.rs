//! Telemetry opt-out configuration
//!
//! The opt-out is honored at the integration point: the instrumented CLI
//! loads this config and skips the collector entirely when telemetry is
//! disabled.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable suppressing telemetry entirely.
pub const ENV_NO_TELEMETRY: &str = "APIDIFF_NO_TELEMETRY";

/// Universal opt-out, respected alongside the application-specific one.
pub const ENV_DO_NOT_TRACK: &str = "DO_NOT_TRACK";

/// Environment variable enabling debug mode (print events, don't send).
pub const ENV_TELEMETRY_DEBUG: &str = "APIDIFF_TELEMETRY_DEBUG";

/// Environment variable overriding the events endpoint URL.
pub const ENV_TELEMETRY_ENDPOINT: &str = "APIDIFF_TELEMETRY_ENDPOINT";

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// Whether telemetry is enabled (default: true, opt-out model)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Debug mode: print events instead of sending (default: false)
    #[serde(default)]
    pub debug: bool,

    /// Override for the events endpoint URL (testing, self-hosting)
    pub endpoint: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
            endpoint: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// Load telemetry configuration with precedence:
/// 1. Environment variables (highest priority)
/// 2. User config (`~/.apidiff/config.toml`)
/// 3. Default (enabled=true)
pub fn load_telemetry_config() -> Result<TelemetryConfig> {
    let mut config = TelemetryConfig::default();

    if let Some(home_dir) = dirs::home_dir() {
        let user_config = home_dir.join(".apidiff/config.toml");
        if user_config.exists() {
            if let Ok(cfg) = load_config_from_file(&user_config) {
                config = cfg;
            }
        }
    }

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Load the `[telemetry]` table from a TOML config file.
fn load_config_from_file(path: &Path) -> Result<TelemetryConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    #[derive(Deserialize)]
    struct FullConfig {
        #[serde(default)]
        telemetry: Option<TelemetryConfig>,
    }

    let full_config: FullConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;

    Ok(full_config.telemetry.unwrap_or_default())
}

/// Apply environment variable overrides.
fn apply_env_overrides(config: &mut TelemetryConfig) {
    if env::var(ENV_NO_TELEMETRY).is_ok() || env::var(ENV_DO_NOT_TRACK).is_ok() {
        config.enabled = false;
    }

    if env::var(ENV_TELEMETRY_DEBUG).is_ok() {
        config.debug = true;
    }

    if let Ok(endpoint) = env::var(ENV_TELEMETRY_ENDPOINT) {
        if !endpoint.is_empty() {
            config.endpoint = Some(endpoint);
        }
    }
}
