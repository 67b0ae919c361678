// Axum API Server Module
//
// Purpose: HTTP surface for the chat bot
// - GET /bazaar?q=<item> <enchantment>  → 200 text/plain answer
// - GET /health                         → 200 JSON status
//
// Domain failures (item not found, no match) are normal text answers, never
// non-200 statuses.

use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::sync::Arc;

use crate::alerts::{AlertSink, LogAlertSink, WebhookAlertSink, DEFAULT_WEBHOOK_TIMEOUT};
use crate::config::Config;
use crate::handler::{QueryHandler, Thresholds};
use crate::wiki::{HttpFetcher, WikiSite};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<QueryHandler>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        tracing::info!("Loading alias and emoji tables...");
        let lexicon = Arc::new(config.load_lexicon()?);
        tracing::info!(
            "Loaded {} aliases, {} emojis",
            lexicon.alias_count(),
            lexicon.emoji_count()
        );

        let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout)?);

        let alerts: Arc<dyn AlertSink> = match &config.alert_webhook_url {
            Some(url) => {
                tracing::info!("Alerts go to webhook");
                let timeout = config.fetch_timeout.unwrap_or(DEFAULT_WEBHOOK_TIMEOUT);
                Arc::new(WebhookAlertSink::new(url.clone(), timeout)?)
            }
            None => {
                tracing::info!("No ALERT_WEBHOOK_URL set, alerts are only logged");
                Arc::new(LogAlertSink)
            }
        };

        let handler = QueryHandler::new(
            fetcher,
            WikiSite::new(&config.wiki_base_url),
            lexicon,
            alerts,
            Thresholds {
                item: config.item_match_threshold,
                enchantment: config.enchantment_match_threshold,
            },
        );

        Ok(Self::from_handler(handler))
    }

    pub fn from_handler(handler: QueryHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/bazaar", get(bazaar))
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// First `q` value of the query string. Repeated or unknown keys are ignored
/// so that every request still gets a text answer.
fn query_param(raw: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(raw?.as_bytes())
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
}

async fn bazaar(State(state): State<AppState>, RawQuery(raw): RawQuery) -> String {
    let q = query_param(raw.as_deref());
    tracing::info!("Bazaar query: {:?}", q);
    state.handler.answer(q.as_deref()).await
}
