use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Photo search is disabled when unset; every post then gets a placeholder image.
    pub pexels_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the persisted session record.
    pub state_dir: PathBuf,
    /// Transport-level attempts per model call. 1 means a single request/response.
    pub llm_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let llm_max_attempts = lookup("LLM_MAX_ATTEMPTS")
            .unwrap_or_else(|| "1".to_string())
            .parse::<u32>()
            .context("LLM_MAX_ATTEMPTS must be a positive integer")?
            .max(1);

        Ok(Config {
            anthropic_api_key: require("ANTHROPIC_API_KEY")?,
            pexels_api_key: lookup("PEXELS_API_KEY").filter(|v| !v.trim().is_empty()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            state_dir: lookup("STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            llm_max_attempts,
        })
    }
}
