use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Lines that make up one estimated page.
pub const DEFAULT_LINES_PER_PAGE: usize = 50;
/// Percentage of required skills a resume must match to be eligible.
pub const DEFAULT_THRESHOLD_PERCENT: u32 = 60;
/// Characters of context captured on each side of a skill match.
pub const DEFAULT_CONTEXT_RADIUS: usize = 30;
/// Pause between successive semantic judge calls.
pub const DEFAULT_JUDGE_DELAY_MS: u64 = 500;
const DEFAULT_MAX_UPLOAD_MB: usize = 25;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Judge credential. `None` means the semantic judge is unavailable.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub screening: ScreeningConfig,
}

/// Tunables consumed by the screening core.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningConfig {
    pub lines_per_page: usize,
    pub threshold_percent: u32,
    pub context_radius: usize,
    pub judge_delay: Duration,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            lines_per_page: DEFAULT_LINES_PER_PAGE,
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
            context_radius: DEFAULT_CONTEXT_RADIUS,
            judge_delay: Duration::from_millis(DEFAULT_JUDGE_DELAY_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let screening = ScreeningConfig {
            lines_per_page: env_or("LINES_PER_PAGE", DEFAULT_LINES_PER_PAGE)?,
            threshold_percent: env_or("ELIGIBILITY_THRESHOLD", DEFAULT_THRESHOLD_PERCENT)?,
            context_radius: env_or("CONTEXT_RADIUS", DEFAULT_CONTEXT_RADIUS)?,
            judge_delay: Duration::from_millis(env_or("JUDGE_DELAY_MS", DEFAULT_JUDGE_DELAY_MS)?),
        };
        screening.validate()?;

        let max_upload_mb: usize = env_or("MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB)?;

        Ok(Config {
            anthropic_api_key: non_blank(std::env::var("ANTHROPIC_API_KEY").ok()),
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            screening,
        })
    }
}

impl ScreeningConfig {
    pub fn validate(&self) -> Result<()> {
        if self.lines_per_page == 0 {
            bail!("LINES_PER_PAGE must be at least 1");
        }
        if self.threshold_percent > 100 {
            bail!(
                "ELIGIBILITY_THRESHOLD must be between 0 and 100, got {}",
                self.threshold_percent
            );
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_or(key, std::env::var(key).ok(), default)
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_blank(raw) {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{value}'")),
        None => Ok(default),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
