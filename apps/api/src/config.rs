use anyhow::{Context, Result};

pub const AI_GATEWAY_KEY_VAR: &str = "LOVABLE_API_KEY";
pub const DATA_SERVICE_URL_VAR: &str = "SUPABASE_URL";
pub const DATA_SERVICE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

const DEFAULT_AI_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";

/// Application configuration loaded from environment variables.
///
/// Credentials are optional at startup: the endpoints that need them fail
/// per request with a configuration error instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub ai_gateway_url: String,
    pub ai_gateway_api_key: Option<String>,
    pub data_service_url: Option<String>,
    pub data_service_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            ai_gateway_url: get("AI_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_AI_GATEWAY_URL.to_string()),
            ai_gateway_api_key: get(AI_GATEWAY_KEY_VAR),
            data_service_url: get(DATA_SERVICE_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_string()),
            data_service_key: get(DATA_SERVICE_KEY_VAR),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
