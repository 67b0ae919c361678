// API Server Binary Entry Point
//
// Purpose: Start the Axum server answering enchantment queries
// Usage: cargo run --bin api_server

use anyhow::Context;
use bazaar_scraper::{create_router, AppState, Config};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "bazaar_scraper=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = Config::from_env().context("Invalid configuration")?;

    tracing::info!("Configuration:");
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  WIKI_BASE_URL: {}", config.wiki_base_url);
    tracing::info!("  LEXICON_PATH: {:?}", config.lexicon_path);
    tracing::info!("  ITEM_MATCH_THRESHOLD: {}", config.item_match_threshold);
    tracing::info!("  ENCHANTMENT_MATCH_THRESHOLD: {}", config.enchantment_match_threshold);
    tracing::info!("  FETCH_TIMEOUT_SECS: {:?}", config.fetch_timeout.map(|d| d.as_secs()));

    let state = AppState::new(&config)?;
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Bazaar scraper API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
