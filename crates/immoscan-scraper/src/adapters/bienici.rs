//! bienici.com result lists. Cards render as `<article>` inside a
//! `results-list` container whose test id varies between builds.

use super::SiteAdapter;

#[derive(Debug, Default, Clone, Copy)]
pub struct BienIciAdapter;

impl SiteAdapter for BienIciAdapter {
    fn host(&self) -> &'static str {
        "bienici.com"
    }

    fn wait_selector(&self) -> Option<&'static str> {
        Some("[data-testid='results-list'] article, [data-testid='result-list'] article")
    }

    fn item_selector(&self) -> &'static str {
        "[data-testid='results-list'] article, [data-testid='result-list'] article, article"
    }

    fn address_selector(&self) -> Option<&'static str> {
        Some("[data-testid='address'], [class*='Address'], [class*='address']")
    }
}
