use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use immoscan_core::AppConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use scraper::{Html, Selector};

use super::{NavigationResult, RenderContext};
use crate::error::ScraperError;
use crate::normalize::resolve_url;

static NEXT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "a[rel~='next'], a.next, .pagination a.next, a[aria-label*='Suivant'], a[title*='Suivant']",
    )
    .expect("valid selector")
});

/// [`RenderContext`] over plain HTTP fetches.
///
/// Static HTML has no lazy loading, so scrolling is a no-op. Following the
/// "next page" link appends the fetched document to the current content,
/// which keeps every visited page available to a single extraction pass.
pub struct HttpRenderContext {
    client: Client,
    /// Final URL of the last `navigate`.
    base_url: Option<String>,
    /// Final URL of the last document appended.
    last_url: Option<String>,
    documents: Vec<String>,
    visited: HashSet<String>,
}

impl HttpRenderContext {
    /// Creates a context whose requests carry `user_agent` and
    /// `accept_language`, each bounded by `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidHeader`] if `accept_language` is not a
    /// valid header value, or [`ScraperError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        user_agent: &str,
        accept_language: &str,
        timeout_secs: u64,
    ) -> Result<Self, ScraperError> {
        let language =
            HeaderValue::from_str(accept_language).map_err(|_| ScraperError::InvalidHeader {
                name: "Accept-Language",
                value: accept_language.to_owned(),
            })?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, language);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: None,
            last_url: None,
            documents: Vec::new(),
            visited: HashSet::new(),
        })
    }

    /// # Errors
    ///
    /// See [`HttpRenderContext::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.user_agent,
            &config.accept_language,
            config.navigation_timeout_secs,
        )
    }

    /// Number of documents loaded for the current target.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.documents.len()
    }

    async fn fetch(&self, url: &str) -> Result<(u16, String, String), ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        let final_url = response.url().to_string();
        let body = response.text().await?;
        Ok((status.as_u16(), final_url, body))
    }

    /// Unvisited target of the last document's "next page" link.
    fn next_href(&self) -> Option<String> {
        let last = self.documents.last()?;
        let base = self.last_url.as_deref()?;
        let document = Html::parse_document(last);
        document
            .select(&NEXT_SELECTOR)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty() && !href.starts_with('#'))
            .map(|href| resolve_url(href, base))
            .find(|url| url.starts_with("http") && !self.visited.contains(url))
    }
}

#[async_trait]
impl RenderContext for HttpRenderContext {
    async fn navigate(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> Result<NavigationResult, ScraperError> {
        self.documents.clear();
        self.visited.clear();
        self.base_url = None;
        self.last_url = None;

        let started = Instant::now();
        let (status, final_url, body) = tokio::time::timeout(timeout, self.fetch(url))
            .await
            .map_err(|_| ScraperError::NavigationTimeout {
                url: url.to_owned(),
                timeout_secs: timeout.as_secs(),
            })??;

        self.visited.insert(url.to_owned());
        self.visited.insert(final_url.clone());
        self.documents.push(body);
        self.base_url = Some(final_url.clone());
        self.last_url = Some(final_url.clone());

        Ok(NavigationResult {
            final_url,
            status,
            load_time_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }

    async fn wait_for_selector(&mut self, selector: &str, _timeout: Duration) -> bool {
        let Ok(selector) = Selector::parse(selector) else {
            tracing::debug!(selector, "invalid wait selector");
            return false;
        };
        self.documents
            .iter()
            .any(|doc| Html::parse_document(doc).select(&selector).next().is_some())
    }

    async fn content(&self) -> Result<String, ScraperError> {
        if self.documents.is_empty() {
            return Err(ScraperError::NoPage);
        }
        Ok(self.documents.join("\n"))
    }

    fn current_url(&self) -> Option<String> {
        self.base_url.clone()
    }

    async fn has_next_control(&self) -> bool {
        self.next_href().is_some()
    }

    async fn click_next(&mut self) -> Result<(), ScraperError> {
        let next = self
            .next_href()
            .ok_or_else(|| ScraperError::Navigation {
                url: self.last_url.clone().unwrap_or_default(),
                reason: "no next-page control".to_owned(),
            })?;

        let (_, final_url, body) = self.fetch(&next).await?;
        self.visited.insert(next.clone());
        self.visited.insert(final_url.clone());
        self.documents.push(body);
        self.last_url = Some(final_url);

        tracing::debug!(url = %next, pages = self.documents.len(), "followed next-page link");
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), ScraperError> {
        Ok(())
    }

    async fn growth_signal(&self) -> Result<u64, ScraperError> {
        let bytes: usize = self.documents.iter().map(String::len).sum();
        Ok(u64::try_from(bytes).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with(url: &str, html: &str) -> HttpRenderContext {
        let mut ctx = HttpRenderContext::new("immoscan-test", "fr-FR,fr;q=0.9", 5).unwrap();
        ctx.documents.push(html.to_owned());
        ctx.visited.insert(url.to_owned());
        ctx.base_url = Some(url.to_owned());
        ctx.last_url = Some(url.to_owned());
        ctx
    }

    #[test]
    fn next_href_resolves_rel_next() {
        let ctx = context_with(
            "https://www.pap.fr/annonce/locations",
            r#"<html><body><a rel="next" href="/annonce/locations-2">Suivant</a></body></html>"#,
        );
        assert_eq!(
            ctx.next_href().as_deref(),
            Some("https://www.pap.fr/annonce/locations-2")
        );
    }

    #[test]
    fn next_href_matches_french_label() {
        let ctx = context_with(
            "https://x.example/list",
            r#"<a aria-label="Page Suivante" href="?page=2">›</a>"#,
        );
        assert_eq!(
            ctx.next_href().as_deref(),
            Some("https://x.example/list?page=2")
        );
    }

    #[test]
    fn next_href_skips_visited_pages() {
        let ctx = context_with(
            "https://x.example/list",
            r#"<a rel="next" href="/list">1</a>"#,
        );
        assert!(ctx.next_href().is_none());
    }

    #[test]
    fn next_href_none_without_control() {
        let ctx = context_with("https://x.example/list", "<p>fin</p>");
        assert!(ctx.next_href().is_none());
    }

    #[test]
    fn invalid_accept_language_is_rejected() {
        let err = HttpRenderContext::new("ua", "fr\nFR", 5).err().unwrap();
        assert!(matches!(err, ScraperError::InvalidHeader { .. }));
    }

    #[tokio::test]
    async fn content_without_navigation_is_no_page() {
        let ctx = HttpRenderContext::new("ua", "fr-FR", 5).unwrap();
        assert!(matches!(ctx.content().await, Err(ScraperError::NoPage)));
        assert_eq!(ctx.growth_signal().await.unwrap(), 0);
    }
}
