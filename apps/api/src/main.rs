mod agents;
mod config;
mod errors;
mod llm_client;
mod routes;
mod scraper;
mod session;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::agents::registry::{AgentRegistry, ModelFactory};
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::{ChatModel, LlmClient, LlmSettings};
use crate::routes::build_router;
use crate::scraper::ApifyProfileSource;
use crate::session::redis_store::RedisSessionStore;
use crate::session::{MemorySessionStore, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LinkedIn assistant v{}", env!("CARGO_PKG_VERSION"));

    // Session store: Redis when configured, otherwise process memory
    let sessions: Arc<dyn SessionStore> = match &config.redis_url {
        Some(url) => {
            let store = RedisSessionStore::connect(url).await?;
            Arc::new(store)
        }
        None => {
            info!("REDIS_URL not set; sessions are kept in memory");
            Arc::new(MemorySessionStore::new())
        }
    };

    // Profile scraper
    let profiles = Arc::new(ApifyProfileSource::new(
        config.apify_api_token.clone(),
        config.apify_actor_id.clone(),
        config.linkedin_cookies.clone(),
    )?);
    if config.apify_api_token.is_none() {
        info!("APIFY_API_TOKEN not set; profile scraping is disabled");
    }

    // One LLM client per credential
    let settings = LlmSettings {
        base_url: config.openai_base_url.clone(),
        model: config.openai_model.clone(),
        temperature: config.llm_temperature,
    };
    info!("LLM settings: model {} at {}", settings.model, settings.base_url);
    let factory: ModelFactory =
        Arc::new(move |api_key: &str| -> Result<Arc<dyn ChatModel>, AppError> {
            let client = LlmClient::new(api_key.to_string(), settings.clone())
                .map_err(|e| AppError::Llm(format!("Failed to build LLM client: {e}")))?;
            let model: Arc<dyn ChatModel> = Arc::new(client);
            Ok(model)
        });
    let agents = Arc::new(AgentRegistry::new(
        factory,
        Arc::clone(&sessions),
        config.openai_api_key.clone(),
        config.agent_cache_capacity,
    ));

    let state = AppState {
        agents,
        sessions,
        profiles,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
