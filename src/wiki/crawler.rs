//! Wiki Index Crawler
//!
//! Walks `Special:AllPages` page by page and collects every listed title.
//!
//! Pagination is followed iteratively with a visited set, so a "next" link that
//! points back to an earlier page ends the walk instead of looping. Only the
//! first index page is mandatory: a later page that fails to load or decode is
//! logged and the titles gathered so far are returned.

use rustc_hash::FxHashSet;
use scraper::Html;
use std::collections::VecDeque;
use thiserror::Error;
use url::Url;

use super::extractor::{decode, element_text, selector, ExtractError};
use super::{FetchError, PageFetcher, WikiPageRef};

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid index URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to fetch index page {url}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to read index page {url}")]
    Parse {
        url: String,
        #[source]
        source: ExtractError,
    },

    #[error("no pages found in wiki index")]
    NoTitles,
}

/// Titles and pagination link found on one index page
#[derive(Debug, Default)]
struct IndexPage {
    refs: Vec<WikiPageRef>,
    next: Option<Url>,
}

/// Crawl the whole index starting at `start_url`.
///
/// Titles come back in discovery order. An empty result is reported as
/// `CrawlError::NoTitles`.
pub async fn crawl_all_titles(
    fetcher: &dyn PageFetcher,
    start_url: &str,
) -> Result<Vec<WikiPageRef>, CrawlError> {
    let start = Url::parse(start_url).map_err(|source| CrawlError::InvalidUrl {
        url: start_url.to_string(),
        source,
    })?;

    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut queue: VecDeque<Url> = VecDeque::from([start]);
    let mut refs: Vec<WikiPageRef> = Vec::new();
    let mut pages = 0usize;

    while let Some(url) = queue.pop_front() {
        if !visited.insert(url.as_str().to_string()) {
            tracing::debug!("Index page {} already visited", url);
            continue;
        }

        let page = match fetch_index_page(fetcher, &url).await {
            Ok(page) => page,
            Err(e) if pages == 0 => return Err(e),
            Err(e) => {
                tracing::warn!("Stopping crawl branch at {}: {}", url, e);
                continue;
            }
        };

        pages += 1;
        tracing::debug!("Index page {} listed {} titles", url, page.refs.len());
        refs.extend(page.refs);

        if let Some(next) = page.next {
            queue.push_back(next);
        }
    }

    tracing::info!("Crawled {} index pages, {} titles", pages, refs.len());

    if refs.is_empty() {
        return Err(CrawlError::NoTitles);
    }
    Ok(refs)
}

async fn fetch_index_page(fetcher: &dyn PageFetcher, url: &Url) -> Result<IndexPage, CrawlError> {
    let body = fetcher
        .fetch(url.as_str())
        .await
        .map_err(|source| CrawlError::Fetch {
            url: url.to_string(),
            source,
        })?;

    parse_index_page(&body, url).map_err(|source| CrawlError::Parse {
        url: url.to_string(),
        source,
    })
}

fn parse_index_page(body: &[u8], page_url: &Url) -> Result<IndexPage, ExtractError> {
    let doc = Html::parse_document(decode(body)?);
    let link_sel = selector("#mw-content-text li a")?;
    let next_sel = selector(r#"a[href*="Special:AllPages?from="]"#)?;

    let refs = doc
        .select(&link_sel)
        .filter_map(|link| {
            let title = element_text(&link);
            let href = link.value().attr("href")?;
            let (_, path) = href.split_once("/wiki/")?;
            if title.is_empty() || path.is_empty() {
                return None;
            }
            Some(WikiPageRef {
                title,
                path: path.to_string(),
            })
        })
        .collect();

    // The index repeats its nav links above and below the list; the last one wins
    let next = doc
        .select(&next_sel)
        .last()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| page_url.join(href).ok());

    Ok(IndexPage { refs, next })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const BASE: &str = "https://wiki.test";

    /// Serves fixed bodies by URL and records every request
    struct MapFetcher {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl MapFetcher {
        fn new(pages: Vec<(String, String)>) -> Self {
            Self {
                pages: pages.into_iter().collect(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PageFetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .map(|body| body.as_bytes().to_vec())
                .ok_or_else(|| FetchError::Status { url: url.to_string(), status: 404 })
        }
    }

    fn index_page(titles: &[&str], next_from: Option<&str>) -> String {
        let items: String = titles
            .iter()
            .map(|t| format!(r#"<li><a href="/wiki/{}">{}</a></li>"#, t.replace(' ', "_"), t))
            .collect();
        let nav = next_from
            .map(|from| {
                format!(r#"<a href="/wiki/Special:AllPages?from={}">Next page ({})</a>"#, from, from)
            })
            .unwrap_or_default();
        format!(
            r#"<html><body>{nav}<div id="mw-content-text"><ul>{items}</ul></div>{nav}</body></html>"#
        )
    }

    fn start_url() -> String {
        format!("{}/wiki/Special:AllPages", BASE)
    }

    #[tokio::test]
    async fn test_follows_pagination_in_order() {
        let fetcher = MapFetcher::new(vec![
            (start_url(), index_page(&["Apple", "Boomerang"], Some("Cannon"))),
            (
                format!("{}/wiki/Special:AllPages?from=Cannon", BASE),
                index_page(&["Cannon", "Rusty Knife"], None),
            ),
        ]);

        let refs = crawl_all_titles(&fetcher, &start_url()).await.unwrap();
        let titles: Vec<&str> = refs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "Boomerang", "Cannon", "Rusty Knife"]);
        assert_eq!(refs[3].path, "Rusty_Knife");
        assert_eq!(fetcher.request_count(), 2);
    }

    #[tokio::test]
    async fn test_cyclic_next_link_terminates() {
        let second = format!("{}/wiki/Special:AllPages?from=Cannon", BASE);
        let fetcher = MapFetcher::new(vec![
            (start_url(), index_page(&["Apple"], Some("Cannon"))),
            // Points back at itself
            (second, index_page(&["Cannon"], Some("Cannon"))),
        ]);

        let refs = crawl_all_titles(&fetcher, &start_url()).await.unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(fetcher.request_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_later_page_keeps_partial_results() {
        let fetcher = MapFetcher::new(vec![(start_url(), index_page(&["Apple", "Boomerang"], Some("Zzz")))]);

        let refs = crawl_all_titles(&fetcher, &start_url()).await.unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(fetcher.request_count(), 2);
    }

    #[tokio::test]
    async fn test_root_failure_propagates() {
        let fetcher = MapFetcher::new(Vec::new());
        let err = crawl_all_titles(&fetcher, &start_url()).await.unwrap_err();
        assert!(matches!(err, CrawlError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_empty_index_is_no_titles() {
        let fetcher = MapFetcher::new(vec![(start_url(), index_page(&[], None))]);
        let err = crawl_all_titles(&fetcher, &start_url()).await.unwrap_err();
        assert!(matches!(err, CrawlError::NoTitles));
    }

    #[test]
    fn test_links_outside_content_and_non_wiki_links_are_skipped() {
        let html = r#"
            <ul><li><a href="/wiki/Sidebar">Sidebar</a></li></ul>
            <div id="mw-content-text"><ul>
                <li><a href="/wiki/Rusty_Knife">  Rusty Knife </a></li>
                <li><a href="https://example.com/other">External</a></li>
                <li><a href="/wiki/Empty_Title"> </a></li>
                <li><a>No href</a></li>
            </ul></div>
        "#;
        let url = Url::parse(&start_url()).unwrap();
        let page = parse_index_page(html.as_bytes(), &url).unwrap();
        assert_eq!(
            page.refs,
            vec![WikiPageRef { title: "Rusty Knife".into(), path: "Rusty_Knife".into() }]
        );
        assert!(page.next.is_none());
    }

    #[test]
    fn test_next_link_uses_last_match() {
        let html = r#"
            <a href="/wiki/Special:AllPages?from=Aaa">Previous page</a>
            <a href="/wiki/Special:AllPages?from=Mmm">Next page (Mmm)</a>
        "#;
        let url = Url::parse(&start_url()).unwrap();
        let page = parse_index_page(html.as_bytes(), &url).unwrap();
        assert_eq!(
            page.next.unwrap().as_str(),
            "https://wiki.test/wiki/Special:AllPages?from=Mmm"
        );
    }
}
