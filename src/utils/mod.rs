//! Utility modules for enchantment lookup
//!
//! Contains the small pure helpers shared by the resolver and handler:
//! - Normalization: comparison keys and page slugs
//! - Lookup tables: alias and emoji tables

pub mod normalization;
pub mod lookup_tables;

// Re-export commonly used types
pub use normalization::{normalize, page_slug};
pub use lookup_tables::Lexicon;
