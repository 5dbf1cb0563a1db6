use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{CheckError, Result};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> Result<bool> {
    let Some(raw) = profiled_env_opt(profile, key) else {
        return Ok(default);
    };
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CheckError::Config(format!(
            "{key} must be a boolean (true/false, yes/no, on/off, 1/0), got {raw:?}"
        ))),
    }
}

// ── Top-level config ──────────────────────────────────────────

/// Environment-derived settings shared by the check binaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Evaluate every record regardless of exclusion state (diagnostics).
    pub include_excluded: bool,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `VCHECK_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    ///
    /// Fails with [`CheckError::Config`] on a malformed boolean.
    pub fn from_env() -> Result<Self> {
        let profile = env_or("VCHECK_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Result<Self> {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Ok(Self {
            profile: p.to_string(),
            log_filter: profiled_env_or(p, "VCHECK_LOG", "warn"),
            include_excluded: profiled_env_bool(p, "VCHECK_INCLUDE_EXCLUDED", false)?,
        })
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  log filter:       {}", self.log_filter);
        tracing::info!("  include excluded: {}", self.include_excluded);
    }
}
