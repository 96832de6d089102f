use std::path::PathBuf;
use std::time::Duration;

use crate::criteria::{DedupStrategy, FilterCriteria};
use crate::listing::PriceLocale;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub links_path: PathBuf,
    pub communes_path: PathBuf,
    pub output_path: PathBuf,
    pub user_agent: String,
    pub accept_language: String,
    pub navigation_timeout_secs: u64,
    pub wait_timeout_ms: u64,
    pub max_drive_iterations: usize,
    pub initial_settle_ms: u64,
    pub next_settle_ms: u64,
    pub scroll_settle_ms: u64,
    pub criteria: FilterCriteria,
    pub dedup_strategy: DedupStrategy,
    pub price_locale: PriceLocale,
}

impl AppConfig {
    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }
}
