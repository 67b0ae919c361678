//! Request outcomes that end a query early
//!
//! Every variant is terminal for the request and none is retried. `Display` is
//! the sentence sent back to the user; `alert` says whether operators hear
//! about it too.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Please specify an item and enchantment.")]
    MissingQuery,

    #[error("Format: !bazaar [item] [enchantment]")]
    MalformedQuery,

    #[error("Item \"{item}\" not found on the wiki. Please double-check the spelling or if the item exists.")]
    PageNotFound { item: String },

    #[error("Could not find \"{title}\" in The Bazaar Wiki. Please check the spelling.")]
    MatchedPageUnavailable { title: String },

    #[error("Failed to load data for {item}.")]
    EmptyPage { item: String },

    #[error("{item} does not have any enchantments listed.")]
    NoEnchantmentsListed { item: String },

    #[error("\"{enchantment}\" is not an enchantment available on \"{item}\".")]
    EnchantmentNotMatched { enchantment: String, item: String },

    #[error("The Bazaar Wiki may be down or has changed layout. Don't worry, we have been alerted and are working on a fix. Please try again later.")]
    LayoutChanged,
}

impl QueryError {
    /// Operator alert for this outcome, if it warrants one
    pub fn alert(&self, raw_query: &str) -> Option<String> {
        match self {
            QueryError::PageNotFound { item } => Some(format!(
                "❗ Bazaar Scraper: Item not found — \"{}\" requested via query \"{}\"",
                item, raw_query
            )),
            QueryError::MatchedPageUnavailable { title } => Some(format!(
                "❗ Bazaar Scraper: Fuzzy match failed for \"{}\" (query: \"{}\")",
                title, raw_query
            )),
            QueryError::LayoutChanged => Some(format!(
                "🚨 Bazaar Scraper Alert: Wiki layout may have changed or the site is down. User query: \"{}\"",
                raw_query
            )),
            _ => None,
        }
    }
}
