//! Fallback for hosts without a dedicated adapter.

use super::{SiteAdapter, STRUCTURAL_SELECTOR};
use crate::normalize::host_key;

#[derive(Debug, Default, Clone, Copy)]
pub struct GenericAdapter;

impl SiteAdapter for GenericAdapter {
    fn host(&self) -> &'static str {
        "generic"
    }

    fn wait_selector(&self) -> Option<&'static str> {
        None
    }

    fn item_selector(&self) -> &'static str {
        STRUCTURAL_SELECTOR
    }

    fn is_structural(&self) -> bool {
        true
    }

    /// The target's own host, since "generic" says nothing about the source.
    fn source_host(&self, target_url: &str) -> String {
        host_key(target_url).unwrap_or_else(|| self.host().to_owned())
    }
}
