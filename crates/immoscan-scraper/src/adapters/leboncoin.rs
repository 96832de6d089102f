//! leboncoin.fr ad cards.

use super::SiteAdapter;

#[derive(Debug, Default, Clone, Copy)]
pub struct LeboncoinAdapter;

impl SiteAdapter for LeboncoinAdapter {
    fn host(&self) -> &'static str {
        "leboncoin.fr"
    }

    fn wait_selector(&self) -> Option<&'static str> {
        Some("[data-qa-id='aditem_container']")
    }

    fn item_selector(&self) -> &'static str {
        "[data-qa-id='aditem_container'], article"
    }

    fn address_selector(&self) -> Option<&'static str> {
        Some("[data-test-id='adcard-location'], [aria-label*='Située']")
    }
}
