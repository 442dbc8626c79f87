use anyhow::{Context, Result};

/// Application configuration loaded from environment variables once at startup.
///
/// In development mode both collaborators (question generation/scoring and
/// call placement) are replaced by deterministic stand-ins, so the LLM,
/// Vonage, and S3 variables are only required when `DEVELOPMENT_MODE` is off.
#[derive(Debug, Clone)]
pub struct Config {
    pub development_mode: bool,
    pub api_key: String,
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Allowed outbound E.164 numbers. Empty = no restriction.
    pub outbound_whitelist: Vec<String>,
    /// Present only outside development mode.
    pub live: Option<LiveConfig>,
}

/// Credentials and endpoints for the live collaborators.
#[derive(Debug, Clone)]
pub struct LiveConfig {
    pub anthropic_api_key: String,
    pub vonage_application_id: String,
    pub vonage_private_key_path: String,
    pub vonage_from_number: String,
    /// Base URL the telephony provider uses to reach our voice webhooks.
    pub public_base_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let development_mode = std::env::var("DEVELOPMENT_MODE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let live = if development_mode {
            None
        } else {
            Some(LiveConfig {
                anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
                vonage_application_id: require_env("VONAGE_APPLICATION_ID")?,
                vonage_private_key_path: require_env("VONAGE_PRIVATE_KEY_PATH")?,
                vonage_from_number: require_env("VONAGE_FROM_NUMBER")?,
                public_base_url: require_env("PUBLIC_BASE_URL")?,
                s3_bucket: require_env("S3_BUCKET")?,
                s3_endpoint: require_env("S3_ENDPOINT")?,
                aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
                aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            })
        };

        Ok(Config {
            development_mode,
            api_key: require_env("API_KEY")?,
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            outbound_whitelist: std::env::var("OUTBOUND_WHITELIST")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect(),
            live,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
