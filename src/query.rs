//! Free-text query parsing
//!
//! "<item words...> <enchantment>": the last whitespace-delimited token is the
//! enchantment, everything before it is the item name.

use crate::error::QueryError;
use crate::utils::Lexicon;

/// Keyword that asks for every enchantment on the item
pub const LIST_KEYWORD: &str = "list";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub item_name: String,
    /// Lowercased token, replaced by its canonical name when it is a known alias
    pub enchantment: String,
}

impl Query {
    pub fn parse(raw: Option<&str>, lexicon: &Lexicon) -> Result<Self, QueryError> {
        let raw = raw.map(str::trim).unwrap_or("");
        if raw.is_empty() {
            return Err(QueryError::MissingQuery);
        }

        let mut tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(QueryError::MalformedQuery);
        }

        let token = tokens.pop().unwrap_or_default().to_lowercase();
        let enchantment = lexicon.resolve_alias(&token);

        Ok(Self {
            item_name: tokens.join(" "),
            enchantment,
        })
    }

    pub fn wants_list(&self) -> bool {
        self.enchantment.eq_ignore_ascii_case(LIST_KEYWORD)
    }
}
