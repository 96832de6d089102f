//! seloger.com explore cards.

use super::SiteAdapter;

#[derive(Debug, Default, Clone, Copy)]
pub struct SeLogerAdapter;

impl SiteAdapter for SeLogerAdapter {
    fn host(&self) -> &'static str {
        "seloger.com"
    }

    fn wait_selector(&self) -> Option<&'static str> {
        Some("[data-testid='sl.explore.card-container']")
    }

    fn item_selector(&self) -> &'static str {
        "[data-testid='sl.explore.card-container'], article"
    }

    fn address_selector(&self) -> Option<&'static str> {
        Some("[data-testid='sl.explore.card-address']")
    }
}
