//! Bazaar enchantment lookup
//!
//! Answers "what does enchantment X do on item Y" by reading The Bazaar wiki.
//!
//! - `utils/`: name normalization, page slugs, alias and emoji tables
//! - `matcher`: Sørensen–Dice fuzzy matching
//! - `wiki/`: page fetching, index crawling, item resolution, enchantment extraction
//! - `query`, `handler`, `error`: request parsing, orchestration, user-facing outcomes
//! - `alerts`: best-effort operator notifications
//! - `api_server`: axum HTTP surface (api feature)

pub mod utils;
pub mod matcher;
pub mod wiki;
pub mod query;
pub mod error;
pub mod alerts;
pub mod handler;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use utils::{normalize, page_slug, Lexicon};
pub use matcher::{find_best_match, MatchError, MatchResult};
pub use wiki::{EnchantmentEntry, PageContent, PageFetcher, WikiPageRef, WikiSite};
pub use query::Query;
pub use error::QueryError;
pub use alerts::{AlertSink, LogAlertSink};
pub use handler::{QueryHandler, Thresholds};
pub use config::Config;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
