//! Query Handler
//!
//! Answers one `!bazaar <item> <enchantment>` request:
//! parse → resolve item page → extract enchantments → match → format.
//!
//! Every path ends in a text answer. Early exits are `QueryError`s whose
//! `Display` is the answer; the ones that need operator attention also go to
//! the alert sink exactly once.

use std::sync::Arc;

use crate::alerts::AlertSink;
use crate::error::QueryError;
use crate::matcher::find_best_match;
use crate::query::Query;
use crate::utils::Lexicon;
use crate::wiki::{
    extract_page, EnchantmentEntry, ItemPageResolver, PageContent, PageFetcher, ResolveError,
    WikiSite,
};

pub const DEFAULT_ENCHANTMENT_MATCH_THRESHOLD: f64 = 0.5;

/// Joins entries in a `list` answer
pub const LIST_SEPARATOR: &str = " | ";

/// Match thresholds in [0, 1]
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub item: f64,
    pub enchantment: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            item: crate::wiki::resolver::DEFAULT_ITEM_MATCH_THRESHOLD,
            enchantment: DEFAULT_ENCHANTMENT_MATCH_THRESHOLD,
        }
    }
}

pub struct QueryHandler {
    resolver: ItemPageResolver,
    lexicon: Arc<Lexicon>,
    alerts: Arc<dyn AlertSink>,
    enchantment_threshold: f64,
}

impl QueryHandler {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        site: WikiSite,
        lexicon: Arc<Lexicon>,
        alerts: Arc<dyn AlertSink>,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            resolver: ItemPageResolver::new(fetcher, site, thresholds.item),
            lexicon,
            alerts,
            enchantment_threshold: thresholds.enchantment,
        }
    }

    /// Answer a raw `q` parameter
    pub async fn answer(&self, raw: Option<&str>) -> String {
        match self.try_answer(raw).await {
            Ok(answer) => answer,
            Err(e) => {
                if let Some(alert) = e.alert(raw.unwrap_or_default()) {
                    self.alerts.notify(&alert).await;
                }
                e.to_string()
            }
        }
    }

    async fn try_answer(&self, raw: Option<&str>) -> Result<String, QueryError> {
        let query = Query::parse(raw, &self.lexicon)?;
        tracing::debug!("Parsed query: {:?}", query);

        let page = self.resolver.resolve(&query.item_name).await.map_err(|e| {
            tracing::warn!("{}", e);
            match e {
                ResolveError::NotFound { .. } => QueryError::PageNotFound {
                    item: query.item_name.clone(),
                },
                ResolveError::MatchedPageUnavailable { title, .. } => {
                    QueryError::MatchedPageUnavailable { title }
                }
            }
        })?;

        let item = page.title;
        if page.body.is_empty() {
            tracing::error!("No data returned from wiki page {}", page.url);
            return Err(QueryError::EmptyPage { item });
        }

        let content = extract_page(&page.body).map_err(|e| {
            tracing::error!("Scraper error on {}: {}", page.url, e);
            QueryError::LayoutChanged
        })?;

        if query.wants_list() {
            return self.format_list(&item, &content);
        }

        let entry = self.match_enchantment(&item, &query.enchantment, &content.entries)?;
        Ok(format!(
            "{} ✚ {}{} = {} | This item belongs to {}.",
            item,
            entry.name,
            self.lexicon.emoji(&entry.name),
            entry.effect,
            content.character
        ))
    }

    fn match_enchantment<'a>(
        &self,
        item: &str,
        enchantment: &str,
        entries: &'a [EnchantmentEntry],
    ) -> Result<&'a EnchantmentEntry, QueryError> {
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

        let best = find_best_match(enchantment, &names).map_err(|_| {
            QueryError::NoEnchantmentsListed {
                item: item.to_string(),
            }
        })?;
        tracing::debug!(
            "Best enchantment match for \"{}\": \"{}\" (score {:.3})",
            enchantment,
            best.candidate,
            best.score
        );

        if best.score < self.enchantment_threshold {
            return Err(QueryError::EnchantmentNotMatched {
                enchantment: enchantment.to_string(),
                item: item.to_string(),
            });
        }

        Ok(&entries[best.index])
    }

    fn format_list(&self, item: &str, content: &PageContent) -> Result<String, QueryError> {
        if content.entries.is_empty() {
            return Err(QueryError::NoEnchantmentsListed {
                item: item.to_string(),
            });
        }

        let mut parts: Vec<String> = content
            .entries
            .iter()
            .map(|e| format!("{}{} = {}", e.name, self.lexicon.emoji(&e.name), e.effect))
            .collect();
        parts.push(format!("This item belongs to {}.", content.character));

        Ok(format!("{}: {}", item, parts.join(LIST_SEPARATOR)))
    }
}
