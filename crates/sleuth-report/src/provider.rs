//! Search provider seam and the built-in page provider.

use crate::error::Result;
use crate::hit::Hit;
use async_trait::async_trait;
use sleuth_extract::{page_title, visible_text};
use sleuth_fetch::FetchSession;

/// Number of visible-text characters kept as a page hit's snippet.
const SNIPPET_CHARS: usize = 200;

/// Placeholder substituted with the URL-encoded query in page URLs.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Source of hits for a query.
///
/// Providers fetch through the shared session so rate limiting and caching
/// apply across all of them.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Name recorded as the `engine` of produced hits.
    fn name(&self) -> &str;

    /// Return at most `limit` hits for `query`.
    async fn search(&self, query: &str, limit: usize, session: &FetchSession) -> Result<Vec<Hit>>;
}

/// Turns a fixed list of pages into hits.
///
/// A URL containing `{query}` is a template: the placeholder is replaced with
/// the URL-encoded query, so one entry can stand for a search page. Pages
/// that do not answer with a 2xx status are skipped.
#[derive(Debug, Clone, Default)]
pub struct PageProvider {
    urls: Vec<String>,
}

impl PageProvider {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    fn expand(url: &str, query: &str) -> String {
        if url.contains(QUERY_PLACEHOLDER) {
            let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
            url.replace(QUERY_PLACEHOLDER, &encoded)
        } else {
            url.to_string()
        }
    }

    fn page_hit(&self, url: String, body: String) -> Hit {
        let text = visible_text(&body);
        let snippet: String = text.chars().take(SNIPPET_CHARS).collect();

        let mut hit = Hit::new(self.name())
            .with_link(url)
            .with_snippet(snippet)
            .with_raw(body);
        hit.title = page_title(&hit.raw);
        hit
    }
}

#[async_trait]
impl SearchProvider for PageProvider {
    fn name(&self) -> &str {
        "page"
    }

    async fn search(&self, query: &str, limit: usize, session: &FetchSession) -> Result<Vec<Hit>> {
        let mut hits = Vec::new();

        for template in self.urls.iter().take(limit) {
            let url = Self::expand(template, query);
            let result = session.get(&url).await;

            if !result.is_success() {
                tracing::warn!("Skipping {url}: status {:?}", result.status_code);
                continue;
            }

            let body = result.body.unwrap_or_default();
            hits.push(self.page_hit(url, body));
        }

        tracing::debug!("Page provider produced {} hits for {query}", hits.len());
        Ok(hits)
    }
}
