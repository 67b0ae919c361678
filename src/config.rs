//! Service configuration from environment variables
//!
//! | Variable                      | Default                     |
//! |-------------------------------|-----------------------------|
//! | `PORT`                        | 3000                        |
//! | `WIKI_BASE_URL`               | https://thebazaar.wiki.gg   |
//! | `ALERT_WEBHOOK_URL`           | unset (alerts only logged)  |
//! | `LEXICON_PATH`                | unset (embedded tables)     |
//! | `ITEM_MATCH_THRESHOLD`        | 0.4                         |
//! | `ENCHANTMENT_MATCH_THRESHOLD` | 0.5                         |
//! | `FETCH_TIMEOUT_SECS`          | unset (transport default)   |

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::handler::DEFAULT_ENCHANTMENT_MATCH_THRESHOLD;
use crate::utils::Lexicon;
use crate::wiki::resolver::DEFAULT_ITEM_MATCH_THRESHOLD;

pub const DEFAULT_WIKI_BASE_URL: &str = "https://thebazaar.wiki.gg";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub wiki_base_url: String,
    pub alert_webhook_url: Option<String>,
    pub lexicon_path: Option<PathBuf>,
    pub item_match_threshold: f64,
    pub enchantment_match_threshold: f64,
    pub fetch_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            wiki_base_url: DEFAULT_WIKI_BASE_URL.to_string(),
            alert_webhook_url: None,
            lexicon_path: None,
            item_match_threshold: DEFAULT_ITEM_MATCH_THRESHOLD,
            enchantment_match_threshold: DEFAULT_ENCHANTMENT_MATCH_THRESHOLD,
            fetch_timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let config = Self {
            port: parse_or(&get, "PORT", defaults.port)?,
            wiki_base_url: get("WIKI_BASE_URL").unwrap_or(defaults.wiki_base_url),
            alert_webhook_url: get("ALERT_WEBHOOK_URL"),
            lexicon_path: get("LEXICON_PATH").map(PathBuf::from),
            item_match_threshold: parse_or(&get, "ITEM_MATCH_THRESHOLD", defaults.item_match_threshold)?,
            enchantment_match_threshold: parse_or(
                &get,
                "ENCHANTMENT_MATCH_THRESHOLD",
                defaults.enchantment_match_threshold,
            )?,
            fetch_timeout: get("FETCH_TIMEOUT_SECS")
                .map(|v| {
                    v.parse::<u64>()
                        .with_context(|| format!("FETCH_TIMEOUT_SECS is not a number: {}", v))
                })
                .transpose()?
                .map(Duration::from_secs),
        };

        for (name, value) in [
            ("ITEM_MATCH_THRESHOLD", config.item_match_threshold),
            ("ENCHANTMENT_MATCH_THRESHOLD", config.enchantment_match_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("{} must be between 0 and 1, got {}", name, value);
            }
        }

        Ok(config)
    }

    /// Alias/emoji tables: the override file if configured, else the embedded ones
    pub fn load_lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon_path {
            Some(path) => Lexicon::load(path),
            None => Ok(Lexicon::default()),
        }
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(v) => v
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value: {}", key, v)),
        None => Ok(default),
    }
}
