pub mod app_config;
pub mod catalog;
pub mod config;
pub mod criteria;
pub mod listing;
pub mod targets;

pub use app_config::AppConfig;
pub use catalog::{load_commune_catalog, load_entry_urls, CommuneCatalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{DedupStrategy, FilterCriteria};
pub use listing::{ListingCandidate, LocationHint, PriceLocale};
pub use targets::{build_search_targets, default_search_templates, SearchTarget, SearchTemplate};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read entry URL list {path}: {source}")]
    EntryListIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read commune catalog {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse commune catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    /// `true` when the error is a missing file rather than an unreadable one.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::EntryListIo { source, .. } | ConfigError::CatalogIo { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}
