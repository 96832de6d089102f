//! logic-immo.com search pages.

use super::SiteAdapter;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogicImmoAdapter;

impl SiteAdapter for LogicImmoAdapter {
    fn host(&self) -> &'static str {
        "logic-immo.com"
    }

    fn wait_selector(&self) -> Option<&'static str> {
        Some("article a[href*='/detail-'], article a[href]")
    }

    fn item_selector(&self) -> &'static str {
        "article, li"
    }
}
