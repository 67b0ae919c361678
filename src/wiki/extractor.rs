//! Enchantment Extractor
//!
//! Reads an item page and returns who owns the item and which enchantments it
//! lists. Wiki item pages carry:
//! - an infobox `<aside>` whose `<h3>` "Collection" heading is followed by the
//!   character name
//! - a `<table>` captioned "Enchantments" with `name | effect` rows
//!
//! A missing character panel is tolerated and reads as "Unknown". A missing
//! enchantment table is an error: every item page has one, even when it has no
//! rows, so its absence means the page layout is not what we expect.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

pub const UNKNOWN_CHARACTER: &str = "Unknown";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("page body is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("invalid selector '{css}': {message}")]
    Selector { css: String, message: String },

    #[error("no table captioned \"enchantment\" on page")]
    MissingTable,
}

/// One enchantment row, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnchantmentEntry {
    pub name: String,
    pub effect: String,
}

/// Everything read from one item page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub character: String,
    pub entries: Vec<EnchantmentEntry>,
}

pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        css: css.to_string(),
        message: format!("{:?}", e),
    })
}

pub(crate) fn decode(body: &[u8]) -> Result<&str, ExtractError> {
    Ok(std::str::from_utf8(body)?)
}

pub(crate) fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Extract character and enchantments from a raw page body
pub fn extract_page(body: &[u8]) -> Result<PageContent, ExtractError> {
    let doc = Html::parse_document(decode(body)?);

    let character = find_character(&doc)?.unwrap_or_else(|| UNKNOWN_CHARACTER.to_string());
    let entries = find_enchantments(&doc)?;

    Ok(PageContent { character, entries })
}

/// Text of the element right after the first "collection" heading in a side panel
fn find_character(doc: &Html) -> Result<Option<String>, ExtractError> {
    let aside_sel = selector("aside")?;
    let heading_sel = selector("h3")?;

    for aside in doc.select(&aside_sel) {
        for heading in aside.select(&heading_sel) {
            if !element_text(&heading).to_lowercase().contains("collection") {
                continue;
            }

            let next = heading.next_siblings().find_map(ElementRef::wrap);
            if let Some(next) = next {
                let name = element_text(&next);
                if !name.is_empty() {
                    return Ok(Some(name));
                }
            }
        }
    }

    Ok(None)
}

/// Rows of the first table captioned "enchantment"
fn find_enchantments(doc: &Html) -> Result<Vec<EnchantmentEntry>, ExtractError> {
    let table_sel = selector("table")?;
    let caption_sel = selector("caption")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    for table in doc.select(&table_sel) {
        let caption: String = table
            .select(&caption_sel)
            .map(|c| c.text().collect::<String>())
            .collect();
        if !caption.to_lowercase().contains("enchantment") {
            continue;
        }

        let entries = table
            .select(&row_sel)
            .filter_map(|row| {
                let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
                if cells.len() < 2 {
                    return None;
                }
                Some(EnchantmentEntry {
                    name: element_text(&cells[0]),
                    effect: element_text(&cells[1]),
                })
            })
            .collect();

        return Ok(entries);
    }

    Err(ExtractError::MissingTable)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM_PAGE: &str = r#"
        <html><body>
        <aside class="portable-infobox">
            <h2>Rusty Knife</h2>
            <section>
                <h3>Size</h3><div>Small</div>
                <h3>Collection</h3>
                <div> Pygmalien </div>
            </section>
        </aside>
        <table class="wikitable">
            <caption>Tiers</caption>
            <tr><td>Bronze</td><td>3 damage</td></tr>
        </table>
        <table class="wikitable">
            <caption>Enchantments</caption>
            <tr><th>Name</th><th>Effect</th></tr>
            <tr><td> Toxic </td><td>Deals 3 extra damage</td></tr>
            <tr><td>Fiery</td><td>Burn 4</td></tr>
            <tr><td>orphan cell</td></tr>
        </table>
        <table>
            <caption>More Enchantments</caption>
            <tr><td>Icy</td><td>Freeze</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_extracts_character_and_first_table() {
        let content = extract_page(ITEM_PAGE.as_bytes()).unwrap();
        assert_eq!(content.character, "Pygmalien");
        assert_eq!(
            content.entries,
            vec![
                EnchantmentEntry { name: "Toxic".into(), effect: "Deals 3 extra damage".into() },
                EnchantmentEntry { name: "Fiery".into(), effect: "Burn 4".into() },
            ]
        );
    }

    const EMPTY_TABLE: &str = "<table><caption>Enchantments</caption></table>";

    #[test]
    fn test_missing_panel_reads_as_unknown() {
        let content = extract_page(EMPTY_TABLE.as_bytes()).unwrap();
        assert_eq!(content.character, UNKNOWN_CHARACTER);
        assert!(content.entries.is_empty());
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let err = extract_page(b"<html><body><p>Nothing here</p></body></html>").unwrap_err();
        assert!(matches!(err, ExtractError::MissingTable));
    }

    #[test]
    fn test_renamed_caption_is_missing_table() {
        let html = r#"
            <aside><h3>Collection</h3><div>Pygmalien</div></aside>
            <table><caption>Upgrades</caption><tr><td>Toxic</td><td>Deals 3 extra damage</td></tr></table>
        "#;
        let err = extract_page(html.as_bytes()).unwrap_err();
        assert!(matches!(err, ExtractError::MissingTable));
    }

    #[test]
    fn test_collection_heading_with_empty_sibling_is_skipped() {
        let html = format!(
            r#"
            <aside><h3>Collection</h3><div>  </div></aside>
            <aside><h3>COLLECTIONS</h3><span>Vanessa</span></aside>
            <aside><h3>Collection</h3><span>Dooley</span></aside>
            {}
        "#,
            EMPTY_TABLE
        );
        let content = extract_page(html.as_bytes()).unwrap();
        assert_eq!(content.character, "Vanessa");
    }

    #[test]
    fn test_heading_outside_aside_is_ignored() {
        let html = format!("<h3>Collection</h3><div>Mak</div>{}", EMPTY_TABLE);
        let content = extract_page(html.as_bytes()).unwrap();
        assert_eq!(content.character, UNKNOWN_CHARACTER);
    }

    #[test]
    fn test_empty_enchantment_table() {
        let html = "<table><caption>Enchantments</caption><tr><th>Name</th></tr></table>";
        let content = extract_page(html.as_bytes()).unwrap();
        assert!(content.entries.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let err = extract_page(&[0x3c, 0xff, 0xfe, 0x3e]).unwrap_err();
        assert!(matches!(err, ExtractError::Encoding(_)));
    }
}
