//! Enchantment Lookup Tables
//!
//! Synonym and decoration tables for enchantment names.
//!
//! - Aliases: informal chat words ("crit", "fire") → canonical enchantment names
//! - Emojis: canonical enchantment name → decoration appended in responses
//!
//! The embedded tables are the defaults. A JSON file with the same shape can
//! replace them at startup (`LEXICON_PATH`). Either way the `Lexicon` is built
//! once and only read afterwards.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// ============================================================================
// EMBEDDED TABLES
// ============================================================================

static ALIASES: &[(&str, &str)] = &[
    ("invincible", "Radiant"),
    ("crit", "Deadly"),
    ("fast", "Turbo"),
    ("haste", "Turbo"),
    ("poison", "Toxic"),
    ("shield", "Shielded"),
    ("fire", "Fiery"),
    ("burn", "Fiery"),
    ("ice", "Icy"),
    ("freeze", "Icy"),
    ("cold", "Icy"),
    ("gold", "Golden"),
    ("health", "Restorative"),
    ("heal", "Restorative"),
    ("slow", "Heavy"),
    ("damage", "Obsidian"),
];

static EMOJIS: &[(&str, &str)] = &[
    ("Turbo", "⚡"),
    ("Toxic", "☠️"),
    ("Shielded", "🛡️"),
    ("Fiery", "🔥"),
    ("Deadly", "🎯"),
    ("Icy", "❄️"),
    ("Golden", "🥇"),
    ("Restorative", "💚"),
    ("Heavy", "⏳"),
    ("Radiant", "⛔"),
    ("Obsidian", "🗡️"),
];

/// On-disk shape of a lexicon override file
#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    aliases: HashMap<String, String>,
    #[serde(default)]
    emojis: HashMap<String, String>,
}

/// Immutable alias + emoji tables
///
/// Keys are stored lowercased so both lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct Lexicon {
    aliases: FxHashMap<String, String>,
    emojis: FxHashMap<String, String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::from_pairs(
            ALIASES.iter().map(|(k, v)| (k.to_string(), v.to_string())),
            EMOJIS.iter().map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }
}

impl Lexicon {
    fn from_pairs(
        aliases: impl IntoIterator<Item = (String, String)>,
        emojis: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            aliases: aliases
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
            emojis: emojis
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        }
    }

    /// Load a lexicon from a JSON file: `{ "aliases": {..}, "emojis": {..} }`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file: {:?}", path))?;

        let file: LexiconFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse lexicon JSON: {:?}", path))?;

        Ok(Self::from_pairs(file.aliases, file.emojis))
    }

    /// Map an informal token to its canonical enchantment name.
    ///
    /// Unknown tokens come back unchanged.
    pub fn resolve_alias(&self, token: &str) -> String {
        self.aliases
            .get(&token.to_lowercase())
            .cloned()
            .unwrap_or_else(|| token.to_string())
    }

    /// Decoration for an enchantment name, or "" when there is none
    pub fn emoji(&self, enchantment: &str) -> &str {
        self.emojis
            .get(&enchantment.to_lowercase())
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    pub fn emoji_count(&self) -> usize {
        self.emojis.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_alias() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.resolve_alias("crit"), "Deadly");
        assert_eq!(lexicon.resolve_alias("CRIT"), "Deadly");
        assert_eq!(lexicon.resolve_alias("haste"), "Turbo");
        assert_eq!(lexicon.resolve_alias("burn"), "Fiery");
        assert_eq!(lexicon.resolve_alias("unknown_word"), "unknown_word");
    }

    #[test]
    fn test_emoji_lookup() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.emoji("Toxic"), "☠️");
        assert_eq!(lexicon.emoji("toxic"), "☠️");
        assert_eq!(lexicon.emoji("Shiny"), "");
    }

    #[test]
    fn test_every_alias_target_has_an_emoji() {
        let lexicon = Lexicon::default();
        for (alias, _) in ALIASES {
            let canonical = lexicon.resolve_alias(alias);
            assert!(!lexicon.emoji(&canonical).is_empty(), "no emoji for {}", canonical);
        }
    }

    #[test]
    fn test_load_from_json() {
        let path = std::env::temp_dir().join(format!("lexicon_{}.json", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            write!(file, r#"{{"aliases": {{"Zap": "Shocking"}}, "emojis": {{"Shocking": "⚡"}}}}"#)
                .unwrap();
        }

        let lexicon = Lexicon::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(lexicon.resolve_alias("zap"), "Shocking");
        assert_eq!(lexicon.resolve_alias("crit"), "crit");
        assert_eq!(lexicon.emoji("shocking"), "⚡");
        assert_eq!(lexicon.alias_count(), 1);
        assert_eq!(lexicon.emoji_count(), 1);
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(Lexicon::load(Path::new("/nonexistent/lexicon.json")).is_err());
    }
}
