//! entreparticuliers.com search pages.
//!
//! Search URLs carry the searched place in `q` ("Bouloc 31620"), which
//! backs up listings whose text has no location.

use super::SiteAdapter;

#[derive(Debug, Default, Clone, Copy)]
pub struct EntreParticuliersAdapter;

impl SiteAdapter for EntreParticuliersAdapter {
    fn host(&self) -> &'static str {
        "entreparticuliers.com"
    }

    fn wait_selector(&self) -> Option<&'static str> {
        Some("article a[href], li a[href], .annonce a[href]")
    }

    fn item_selector(&self) -> &'static str {
        "article, li, .annonce, .search-result, .result"
    }
}
