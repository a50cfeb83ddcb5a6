use anyhow::{Context, Result};
use serde_json::Value;

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::scraper::DEFAULT_ACTOR_ID;

/// Application configuration loaded from environment variables.
/// Nothing is required at startup: a missing OpenAI key only fails the
/// requests that do not bring their own.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub llm_temperature: f32,
    pub apify_api_token: Option<String>,
    pub apify_actor_id: String,
    /// LinkedIn session cookies handed to the scraper actor as-is.
    pub linkedin_cookies: Option<Value>,
    /// In-memory sessions when unset.
    pub redis_url: Option<String>,
    pub agent_cache_capacity: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_model: env_or("OPENAI_MODEL", DEFAULT_MODEL),
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            llm_temperature: env_or("LLM_TEMPERATURE", &DEFAULT_TEMPERATURE.to_string())
                .parse::<f32>()
                .context("LLM_TEMPERATURE must be a number")?,
            apify_api_token: optional_env("APIFY_API_TOKEN"),
            apify_actor_id: env_or("APIFY_ACTOR_ID", DEFAULT_ACTOR_ID),
            linkedin_cookies: optional_env("LINKEDIN_COOKIES")
                .map(|raw| serde_json::from_str::<Value>(&raw))
                .transpose()
                .context("LINKEDIN_COOKIES must be valid JSON")?,
            redis_url: optional_env("REDIS_URL"),
            agent_cache_capacity: env_or("AGENT_CACHE_CAPACITY", "32")
                .parse::<usize>()
                .context("AGENT_CACHE_CAPACITY must be a positive integer")?,
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Unset and blank are the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
