//! Item Page Resolver
//!
//! Turns a user-typed item name into a fetched wiki page:
//! 1. Direct: fetch `/wiki/<slug>` built from the name as typed
//! 2. Fallback (direct fetch failed): crawl the index, fuzzy-match normalized
//!    titles, fetch the best page if it clears the threshold
//!
//! Neither path is retried. The crawl runs again on every fallback.

use rustc_hash::FxHashSet;
use std::sync::Arc;
use thiserror::Error;

use super::crawler::crawl_all_titles;
use super::{FetchError, PageFetcher, WikiPageRef, WikiSite};
use crate::matcher::find_best_match;
use crate::utils::{normalize, page_slug};

pub const DEFAULT_ITEM_MATCH_THRESHOLD: f64 = 0.4;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no wiki page matches \"{item}\"")]
    NotFound { item: String },

    #[error("matched wiki page \"{title}\" could not be fetched")]
    MatchedPageUnavailable {
        title: String,
        #[source]
        source: FetchError,
    },
}

/// A fetched item page
#[derive(Debug, Clone)]
pub struct ResolvedPage {
    /// Display title: the name as typed on a direct hit, the wiki's title on fallback
    pub title: String,
    pub url: String,
    pub body: Vec<u8>,
}

pub struct ItemPageResolver {
    fetcher: Arc<dyn PageFetcher>,
    site: WikiSite,
    threshold: f64,
}

impl ItemPageResolver {
    pub fn new(fetcher: Arc<dyn PageFetcher>, site: WikiSite, threshold: f64) -> Self {
        Self {
            fetcher,
            site,
            threshold,
        }
    }

    pub async fn resolve(&self, item_name: &str) -> Result<ResolvedPage, ResolveError> {
        let url = self.site.page_url(&page_slug(item_name));

        match self.fetcher.fetch(&url).await {
            Ok(body) => {
                tracing::debug!("Direct hit for \"{}\" at {}", item_name, url);
                Ok(ResolvedPage {
                    title: item_name.to_string(),
                    url,
                    body,
                })
            }
            Err(e) => {
                tracing::info!("Direct lookup failed ({}), trying fuzzy title match", e);
                self.resolve_fuzzy(item_name).await
            }
        }
    }

    async fn resolve_fuzzy(&self, item_name: &str) -> Result<ResolvedPage, ResolveError> {
        let not_found = || ResolveError::NotFound {
            item: item_name.to_string(),
        };

        let refs = match crawl_all_titles(self.fetcher.as_ref(), &self.site.index_url()).await {
            Ok(refs) => refs,
            Err(e) => {
                tracing::warn!("Fuzzy item lookup failed: {}", e);
                return Err(not_found());
            }
        };

        let (keys, pages) = dedup_by_normalized_title(refs);
        let query = normalize(item_name);

        let best = find_best_match(&query, &keys).map_err(|_| not_found())?;
        let page = &pages[best.index];
        tracing::debug!(
            "Best title match for \"{}\": \"{}\" (score {:.3})",
            item_name,
            page.title,
            best.score
        );

        if best.score < self.threshold {
            return Err(not_found());
        }

        let url = self.site.page_url(&page.path);
        let body = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|source| ResolveError::MatchedPageUnavailable {
                title: page.title.clone(),
                source,
            })?;

        Ok(ResolvedPage {
            title: page.title.clone(),
            url,
            body,
        })
    }
}

/// Keep the first page for each normalized title, preserving discovery order
fn dedup_by_normalized_title(refs: Vec<WikiPageRef>) -> (Vec<String>, Vec<WikiPageRef>) {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut keys = Vec::with_capacity(refs.len());
    let mut pages = Vec::with_capacity(refs.len());

    for page in refs {
        let key = normalize(&page.title);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        keys.push(key);
        pages.push(page);
    }

    (keys, pages)
}
