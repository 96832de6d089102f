//! Rendering-engine abstraction.
//!
//! The crawl pipeline never talks to a browser or HTTP client directly. It
//! drives one [`RenderContext`], which owns the current page: navigation,
//! content snapshots, and the "next page" and scroll actions the
//! [`crate::exhaust::PageExhauster`] uses to load more listings.

pub mod http;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ScraperError;

pub use http::HttpRenderContext;

/// Result of navigating to a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationResult {
    /// The final URL after any redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Time taken to load the page in milliseconds.
    pub load_time_ms: u64,
}

/// A single page context, reused across every target of a run.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Load `url`, replacing the current page.
    async fn navigate(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> Result<NavigationResult, ScraperError>;

    /// Wait up to `timeout` for `selector` to match. Never an error: `false`
    /// means the page is used as-is.
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> bool;

    /// The current page as HTML.
    async fn content(&self) -> Result<String, ScraperError>;

    /// URL of the current page, used as the base for relative links.
    fn current_url(&self) -> Option<String>;

    /// Whether a "next page" control is present.
    async fn has_next_control(&self) -> bool;

    /// Activate the "next page" control.
    async fn click_next(&mut self) -> Result<(), ScraperError>;

    /// Scroll to the bottom of the page to trigger lazy loading.
    async fn scroll_to_bottom(&mut self) -> Result<(), ScraperError>;

    /// Monotonic measure of loaded content (document height, byte length).
    async fn growth_signal(&self) -> Result<u64, ScraperError>;

    /// Wait a fixed interval for the page to settle.
    async fn settle(&mut self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
