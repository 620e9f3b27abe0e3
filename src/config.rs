//! Configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before use. The
//! reference tables (personal domains, blocked patterns) are fixed and live in
//! [`crate::domain::reference_data`]; only numeric thresholds and paths are
//! configurable here.
//!
//! ## Optional Variables
//!
//! - `EMAIL_AGENT_LLM_RETRIES` - Attempts per retried call (default: 3, range 1-10)
//! - `EMAIL_AGENT_LLM_RETRY_DELAY` - Base backoff delay in seconds (default: 1.0, max 60)
//! - `EMAIL_AGENT_MAX_PAGE_CONTENT` - Max chars of fetched page passed on (default: 4000)
//! - `EMAIL_AGENT_MAX_EMAIL_PREVIEW` - Max chars of an email preview (default: 2000)
//! - `EMAIL_AGENT_MAX_BODY_PREVIEW` - Max chars of a body snippet (default: 200)
//! - `EMAIL_AGENT_ENV_FILE` - Flag file path (default: `.env`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! Values that fail to parse fall back to their defaults.

use crate::application::retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, RetryPolicy};
use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration for the email agent's utilities.
#[derive(Debug, Clone)]
pub struct Config {
    /// Attempts per call wrapped in the backoff executor.
    pub retry_attempts: u32,
    /// Base delay in seconds; doubled after each failed attempt.
    pub retry_delay_secs: f64,
    pub max_page_content: usize,
    pub max_email_preview: usize,
    pub max_body_preview: usize,
    /// File that persistent setup flags (e.g. `LINKED_GMAIL`) are written to.
    pub env_file: PathBuf,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retry_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_secs: DEFAULT_BASE_DELAY.as_secs_f64(),
            max_page_content: 4000,
            max_email_preview: 2000,
            max_body_preview: 200,
            env_file: PathBuf::from(".env"),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            retry_attempts: parse_var("EMAIL_AGENT_LLM_RETRIES", defaults.retry_attempts),
            retry_delay_secs: parse_var("EMAIL_AGENT_LLM_RETRY_DELAY", defaults.retry_delay_secs),
            max_page_content: parse_var("EMAIL_AGENT_MAX_PAGE_CONTENT", defaults.max_page_content),
            max_email_preview: parse_var(
                "EMAIL_AGENT_MAX_EMAIL_PREVIEW",
                defaults.max_email_preview,
            ),
            max_body_preview: parse_var("EMAIL_AGENT_MAX_BODY_PREVIEW", defaults.max_body_preview),
            env_file: env::var("EMAIL_AGENT_ENV_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.env_file),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `retry_attempts` is outside 1-10
    /// - `retry_delay_secs` is negative, not finite, or above 60
    /// - any content limit is zero
    /// - `env_file` is empty
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.retry_attempts == 0 || self.retry_attempts > 10 {
            anyhow::bail!(
                "EMAIL_AGENT_LLM_RETRIES must be between 1 and 10, got {}",
                self.retry_attempts
            );
        }

        if !self.retry_delay_secs.is_finite()
            || self.retry_delay_secs < 0.0
            || self.retry_delay_secs > 60.0
        {
            anyhow::bail!(
                "EMAIL_AGENT_LLM_RETRY_DELAY must be between 0 and 60 seconds, got {}",
                self.retry_delay_secs
            );
        }

        for (name, value) in [
            ("EMAIL_AGENT_MAX_PAGE_CONTENT", self.max_page_content),
            ("EMAIL_AGENT_MAX_EMAIL_PREVIEW", self.max_email_preview),
            ("EMAIL_AGENT_MAX_BODY_PREVIEW", self.max_body_preview),
        ] {
            if value == 0 {
                anyhow::bail!("{name} must be greater than 0");
            }
        }

        if self.env_file.as_os_str().is_empty() {
            anyhow::bail!("EMAIL_AGENT_ENV_FILE must not be empty");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Process-wide default retry policy.
    ///
    /// An out-of-range delay falls back to the built-in default rather than
    /// panicking; [`Config::validate`] reports it.
    pub fn retry_policy(&self) -> RetryPolicy {
        let base_delay =
            Duration::try_from_secs_f64(self.retry_delay_secs).unwrap_or(DEFAULT_BASE_DELAY);
        RetryPolicy::new(self.retry_attempts, base_delay)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!(
            "  Retries: {} attempts, base delay {}s",
            self.retry_attempts,
            self.retry_delay_secs
        );
        tracing::info!(
            "  Content limits: page={}, email preview={}, body preview={}",
            self.max_page_content,
            self.max_email_preview,
            self.max_body_preview
        );
        tracing::info!("  Env file: {}", self.env_file.display());
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
