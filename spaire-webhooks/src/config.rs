//! Configuration for webhook verification and decoding

use crate::error::ConfigError;
use std::time::Duration;

/// Prefix of the environment variables read by [`WebhookConfig::from_env`]
pub const ENV_PREFIX: &str = "SPAIRE_WEBHOOK";

/// Default timestamp tolerance (5 minutes)
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

/// How unknown fields in a payload are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Unknown fields are ignored
    #[default]
    Lenient,

    /// Unknown fields are a schema violation
    Strict,
}

/// Configuration for the webhook receiver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Maximum distance between the signed timestamp and the current time
    pub timestamp_tolerance: Duration,

    /// Treatment of unknown payload fields
    pub decode_mode: DecodeMode,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            timestamp_tolerance: DEFAULT_TOLERANCE,
            decode_mode: DecodeMode::Lenient,
        }
    }
}

impl WebhookConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> WebhookConfigBuilder {
        WebhookConfigBuilder::new()
    }

    /// Load configuration from the process environment
    ///
    /// - `SPAIRE_WEBHOOK_TOLERANCE_SECS`: timestamp tolerance in seconds
    /// - `SPAIRE_WEBHOOK_STRICT`: `true`/`false` (also `1`/`0`, `yes`/`no`, `on`/`off`)
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        let key = env_key("TOLERANCE_SECS");
        if let Some(value) = lookup(&key) {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue { key, value })?;
            builder = builder.timestamp_tolerance_secs(secs);
        }

        let key = env_key("STRICT");
        if let Some(value) = lookup(&key) {
            let strict = parse_flag(&value).ok_or(ConfigError::InvalidValue { key, value })?;
            builder = builder.strict(strict);
        }

        Ok(builder.build())
    }
}

/// Builder for WebhookConfig
#[derive(Debug, Clone, Default)]
pub struct WebhookConfigBuilder {
    config: WebhookConfig,
}

impl WebhookConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: WebhookConfig::default(),
        }
    }

    /// Set the timestamp tolerance
    pub fn timestamp_tolerance(mut self, tolerance: Duration) -> Self {
        self.config.timestamp_tolerance = tolerance;
        self
    }

    /// Set the timestamp tolerance in seconds
    pub fn timestamp_tolerance_secs(mut self, secs: u64) -> Self {
        self.config.timestamp_tolerance = Duration::from_secs(secs);
        self
    }

    /// Reject unknown payload fields when `true`
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.decode_mode = if strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        };
        self
    }

    /// Set the decode mode
    pub fn decode_mode(mut self, mode: DecodeMode) -> Self {
        self.config.decode_mode = mode;
        self
    }

    /// Build the configuration
    pub fn build(self) -> WebhookConfig {
        self.config
    }
}

fn env_key(name: &str) -> String {
    format!("{}_{}", ENV_PREFIX, name)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
