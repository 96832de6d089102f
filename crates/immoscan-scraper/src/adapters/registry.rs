//! Host → adapter dispatch.

use std::collections::HashMap;

use super::{
    BienIciAdapter, EntreParticuliersAdapter, GenericAdapter, LeboncoinAdapter,
    LogicImmoAdapter, PapAdapter, SeLogerAdapter, SiteAdapter,
};
use crate::normalize::host_key;

/// Exact-host lookup table with a generic fallback.
///
/// Hosts are compared after lower-casing and removing a leading `www.`; there
/// is no suffix or fuzzy matching, so `m.leboncoin.fr` resolves to the generic
/// adapter.
pub struct AdapterRegistry {
    adapters: HashMap<&'static str, Box<dyn SiteAdapter>>,
    generic: GenericAdapter,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::with_default_adapters()
    }
}

impl AdapterRegistry {
    /// A registry with only the generic fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            adapters: HashMap::new(),
            generic: GenericAdapter,
        }
    }

    /// A registry with every built-in site adapter.
    #[must_use]
    pub fn with_default_adapters() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(BienIciAdapter));
        registry.register(Box::new(LogicImmoAdapter));
        registry.register(Box::new(EntreParticuliersAdapter));
        registry.register(Box::new(LeboncoinAdapter));
        registry.register(Box::new(SeLogerAdapter));
        registry.register(Box::new(PapAdapter));
        registry
    }

    /// Adds `adapter` under its host, returning any adapter it replaces.
    pub fn register(&mut self, adapter: Box<dyn SiteAdapter>) -> Option<Box<dyn SiteAdapter>> {
        self.adapters.insert(adapter.host(), adapter)
    }

    /// The adapter registered for `url`'s host, or the generic adapter.
    #[must_use]
    pub fn resolve(&self, url: &str) -> &dyn SiteAdapter {
        let registered = host_key(url).and_then(|host| self.adapters.get(host.as_str()));
        match registered {
            Some(adapter) => adapter.as_ref(),
            None => &self.generic,
        }
    }

    /// Registered hosts, sorted.
    #[must_use]
    pub fn hosts(&self) -> Vec<&'static str> {
        let mut hosts: Vec<&'static str> = self.adapters.keys().copied().collect();
        hosts.sort_unstable();
        hosts
    }
}
