//! Runtime configuration loaded once at startup.
//!
//! Values come from the process environment; `main` loads a `.env` file first
//! so local development can keep the API key out of the shell history.

use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_COMMENTS: usize = 600;
pub const DEFAULT_TOP_N: usize = 3;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Immutable settings shared by every submission.
#[derive(Debug, Clone)]
pub struct Config {
    /// YouTube Data API v3 key
    pub api_key: String,
    /// Base URL of the Data API, without trailing slash
    pub api_base: String,
    /// Address the web UI listens on
    pub bind_addr: String,
    /// Upper bound on comments collected per run
    pub max_comments: usize,
    /// How many extreme comments to show per side
    pub top_n: usize,
    /// Per-request timeout for the Data API
    pub http_timeout: Duration,
}

impl Config {
    /// Build a config with defaults for everything except the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_comments: DEFAULT_MAX_COMMENTS,
            top_n: DEFAULT_TOP_N,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads through `lookup`, which keeps
    /// tests away from the real process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("YOUTUBE_API_KEY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .context("YOUTUBE_API_KEY must be set (environment or .env file)")?;

        let mut config = Config::new(api_key);

        if let Some(base) = lookup("YOUTUBE_API_BASE").filter(|s| !s.trim().is_empty()) {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(addr) = lookup("BIND_ADDR").filter(|s| !s.trim().is_empty()) {
            config.bind_addr = addr.trim().to_string();
        }
        if let Some(raw) = lookup("MAX_COMMENTS") {
            config.max_comments = parse_positive(&raw, "MAX_COMMENTS")?;
        }
        if let Some(raw) = lookup("TOP_N") {
            config.top_n = parse_positive(&raw, "TOP_N")?;
        }
        if let Some(raw) = lookup("HTTP_TIMEOUT_SECS") {
            let secs = parse_positive(&raw, "HTTP_TIMEOUT_SECS")?;
            config.http_timeout = Duration::from_secs(secs as u64);
        }

        Ok(config)
    }
}

fn parse_positive(raw: &str, name: &str) -> Result<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a positive integer, got {:?}", name, raw))?;
    if value == 0 {
        anyhow::bail!("{} must be greater than zero", name);
    }
    Ok(value)
}
