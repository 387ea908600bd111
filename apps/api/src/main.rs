mod assistant;
mod config;
mod errors;
mod listings;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::relay::ChatRelay;
use crate::config::{Config, AI_GATEWAY_KEY_VAR, DATA_SERVICE_KEY_VAR, DATA_SERVICE_URL_VAR};
use crate::listings::store::{ListingStore, RestListingStore};
use crate::llm_client::{CompletionClient, GatewayClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values, not missing credentials)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Assistant API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize data service store
    let listings: Option<Arc<dyn ListingStore>> =
        match (&config.data_service_url, &config.data_service_key) {
            (Some(url), Some(key)) => {
                info!("Data service store initialized ({url})");
                Some(Arc::new(RestListingStore::new(url, key)?) as Arc<dyn ListingStore>)
            }
            _ => {
                warn!(
                    "{DATA_SERVICE_URL_VAR} / {DATA_SERVICE_KEY_VAR} not set; listing endpoints will fail"
                );
                None
            }
        };

    // Initialize completion gateway client
    let completions: Option<Arc<dyn CompletionClient>> = match &config.ai_gateway_api_key {
        Some(key) => {
            info!("AI gateway client initialized (model: {})", llm_client::MODEL);
            let client = GatewayClient::new(config.ai_gateway_url.clone(), key.clone())?;
            Some(Arc::new(client) as Arc<dyn CompletionClient>)
        }
        None => {
            warn!("{AI_GATEWAY_KEY_VAR} not set; chat assistant will fail");
            None
        }
    };

    // Build app state
    let state = AppState {
        relay: ChatRelay::new(listings.clone(), completions),
        listings,
        config: config.clone(),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
