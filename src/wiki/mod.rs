//! Wiki access: page fetching, index crawling, item resolution, extraction
//!
//! Layout:
//! - `crawler`: walks `Special:AllPages` into a flat list of page refs
//! - `resolver`: direct slug lookup with fuzzy fallback over the crawled index
//! - `extractor`: pulls the owning character and enchantment table from a page
//! - `client`: reqwest-backed `PageFetcher` (api feature)
//!
//! Parsed documents (`scraper::Html`) are not `Send`, so every parse happens in a
//! plain function between awaits and only owned data crosses an `.await`.

pub mod crawler;
pub mod extractor;
pub mod resolver;

#[cfg(feature = "api")]
pub mod client;

use async_trait::async_trait;
use thiserror::Error;

pub use crawler::{crawl_all_titles, CrawlError};
pub use extractor::{extract_page, EnchantmentEntry, ExtractError, PageContent};
pub use resolver::{ItemPageResolver, ResolveError, ResolvedPage};

#[cfg(feature = "api")]
pub use client::HttpFetcher;

/// A page listed in the wiki index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPageRef {
    /// Display title as shown in the index
    pub title: String,
    /// Path below `/wiki/`, already URL-encoded by the wiki
    pub path: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Raw document transport
///
/// Implementations fail on unreachable hosts, non-2xx statuses and timeouts.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// URL layout of the wiki
#[derive(Debug, Clone)]
pub struct WikiSite {
    base_url: String,
}

impl WikiSite {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a page given its (already encoded) path below `/wiki/`
    pub fn page_url(&self, path: &str) -> String {
        format!("{}/wiki/{}", self.base_url, path)
    }

    /// First page of the all-pages index
    pub fn index_url(&self) -> String {
        self.page_url("Special:AllPages")
    }
}
