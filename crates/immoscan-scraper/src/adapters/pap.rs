//! pap.fr search lists.

use super::SiteAdapter;

#[derive(Debug, Default, Clone, Copy)]
pub struct PapAdapter;

impl SiteAdapter for PapAdapter {
    fn host(&self) -> &'static str {
        "pap.fr"
    }

    fn wait_selector(&self) -> Option<&'static str> {
        Some(".search-list-item-alt")
    }

    fn item_selector(&self) -> &'static str {
        ".search-list-item-alt, .search-list-item"
    }

    fn address_selector(&self) -> Option<&'static str> {
        Some(".item-description .h1, .item-title .h1")
    }
}
