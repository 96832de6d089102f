//! Per-host listing extraction.
//!
//! Adapters differ only in three selectors: the listing container to wait
//! for, the listing elements to enumerate, and an optional dedicated address
//! element. Everything else (link resolution, text parsing, location
//! precedence) is shared in [`extract_candidates`].

pub mod bienici;
pub mod entreparticuliers;
mod extract;
pub mod generic;
pub mod leboncoin;
pub mod logic_immo;
pub mod pap;
pub mod registry;
pub mod seloger;

use std::time::Duration;

use async_trait::async_trait;
use immoscan_core::{AppConfig, ListingCandidate, PriceLocale, SearchTarget};

use crate::error::ScraperError;
use crate::render::RenderContext;

pub use bienici::BienIciAdapter;
pub use entreparticuliers::EntreParticuliersAdapter;
pub use extract::extract_candidates;
pub use generic::GenericAdapter;
pub use leboncoin::LeboncoinAdapter;
pub use logic_immo::LogicImmoAdapter;
pub use pap::PapAdapter;
pub use registry::AdapterRegistry;
pub use seloger::SeLogerAdapter;

/// Element types that typically host list items. Used by the generic
/// adapter, and by any adapter whose own selector matches nothing.
pub const STRUCTURAL_SELECTOR: &str = "article, li, div";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Bound on the listing-container wait.
    pub wait_timeout: Duration,
    /// Locale for `price_display`.
    pub locale: PriceLocale,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            wait_timeout: Duration::from_millis(8000),
            locale: PriceLocale::default(),
        }
    }
}

impl ExtractOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            wait_timeout: config.wait_timeout(),
            locale: config.price_locale,
        }
    }
}

/// Turns a rendered listing page into raw candidates.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Registry key: lower-cased host without `www.`.
    fn host(&self) -> &'static str;

    /// Listing container to wait for before extracting.
    fn wait_selector(&self) -> Option<&'static str>;

    /// CSS selector enumerating listing elements.
    fn item_selector(&self) -> &'static str;

    /// Dedicated address element inside a listing, if the site has one.
    fn address_selector(&self) -> Option<&'static str> {
        None
    }

    /// `true` when the adapter has no site selector and always uses the
    /// broad structural set.
    fn is_structural(&self) -> bool {
        false
    }

    /// `source_host` recorded on candidates extracted from `target_url`.
    fn source_host(&self, _target_url: &str) -> String {
        self.host().to_owned()
    }

    /// Wait (best-effort) for the listing container, then extract every
    /// listing element in the current page.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] only if the page content cannot be read.
    /// Individual elements that fail are skipped.
    async fn extract(
        &self,
        page: &mut dyn RenderContext,
        target: &SearchTarget,
        options: &ExtractOptions,
    ) -> Result<Vec<ListingCandidate>, ScraperError> {
        if let Some(selector) = self.wait_selector() {
            if !page.wait_for_selector(selector, options.wait_timeout).await {
                tracing::debug!(
                    host = self.host(),
                    selector,
                    "listing container not found, extracting current page"
                );
            }
        }
        let html = page.content().await?;
        let base_url = page
            .current_url()
            .unwrap_or_else(|| target.url().to_owned());
        Ok(extract_candidates(
            self,
            &html,
            &base_url,
            target,
            options.locale,
        ))
    }
}
