use std::time::Duration;

use anyhow::{Context, Result};

/// Default Groq model used for all generative evaluations.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Explicit configuration for the model gateway. Passed to the gateway
/// constructor — no process-wide implicit state.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub model: String,
    /// Wall-clock bound on a single backend round-trip. A hung call surfaces
    /// as an upstream error rather than blocking the request forever.
    pub timeout: Duration,
    pub max_tokens: u32,
}

impl GatewayConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut gateway = GatewayConfig::new(require_env("GROQ_API_KEY")?);
        if let Ok(model) = std::env::var("GROQ_MODEL") {
            gateway.model = model;
        }
        if let Ok(secs) = std::env::var("GROQ_TIMEOUT_SECS") {
            gateway.timeout = Duration::from_secs(
                secs.parse::<u64>()
                    .context("GROQ_TIMEOUT_SECS must be a number of seconds")?,
            );
        }
        if let Ok(tokens) = std::env::var("GROQ_MAX_TOKENS") {
            gateway.max_tokens = tokens
                .parse::<u32>()
                .context("GROQ_MAX_TOKENS must be a positive integer")?;
        }

        Ok(Config {
            gateway,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
