//! Name Normalization Utilities
//!
//! Builds comparison keys and URL slugs from free-text names.
//!
//! Comparison keys are lossy (case-folded, punctuation stripped) and are only
//! ever used for matching. Display strings are carried separately and never
//! pass through `normalize`.

/// Lowercase `s` and drop every character outside `[a-z0-9]`.
///
/// "Fire-Breathing Dragon!!" and "FIRE BREATHING DRAGON" both become
/// "firebreathingdragon".
pub fn normalize(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Build a wiki page slug from a display title.
///
/// Trims, collapses whitespace runs to a single `_`, then percent-encodes.
/// Dashes, digits and apostrophes survive as the wiki expects them.
pub fn page_slug(title: &str) -> String {
    let joined = title.split_whitespace().collect::<Vec<_>>().join("_");
    urlencoding::encode(&joined).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("Fire-Breathing Dragon!!"), "firebreathingdragon");
        assert_eq!(normalize("FIRE BREATHING DRAGON"), "firebreathingdragon");
        assert_eq!(
            normalize("Fire-Breathing Dragon!!"),
            normalize("FIRE BREATHING DRAGON")
        );
    }

    #[test]
    fn test_normalize_keeps_digits() {
        assert_eq!(normalize("Cannon 2.0"), "cannon20");
        assert_eq!(normalize("  "), "");
        assert_eq!(normalize("Café"), "caf");
    }

    #[test]
    fn test_page_slug() {
        assert_eq!(page_slug("Rusty Knife"), "Rusty_Knife");
        assert_eq!(page_slug("  Rusty    Knife \t"), "Rusty_Knife");
        assert_eq!(page_slug("Fire-Breathing Dragon"), "Fire-Breathing_Dragon");
        assert_eq!(page_slug("Pirate's Hook"), "Pirate%27s_Hook");
        assert_eq!(page_slug("Salt & Pepper"), "Salt_%26_Pepper");
    }
}
