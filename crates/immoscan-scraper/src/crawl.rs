//! Sequential crawl over every search target of a run.
//!
//! One [`RenderContext`] is reused for all targets. Each target goes through
//! navigate → exhaust → resolve adapter → extract → filter; any failure skips
//! that target only. Deduplication and ordering run once at the end.

use std::time::Duration;

use chrono::NaiveDate;
use immoscan_core::{AppConfig, DedupStrategy, FilterCriteria, ListingCandidate, SearchTarget};

use crate::adapters::{AdapterRegistry, ExtractOptions};
use crate::dedup::Deduplicator;
use crate::error::ScraperError;
use crate::exhaust::{ExhaustConfig, PageExhauster};
use crate::filter::FilterPolicy;
use crate::order::sort_candidates;
use crate::render::RenderContext;

/// Everything a run needs besides the page and the targets.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub navigation_timeout: Duration,
    pub exhaust: ExhaustConfig,
    pub extract: ExtractOptions,
    pub criteria: FilterCriteria,
    pub dedup_strategy: DedupStrategy,
    /// Reference date for relative recency hints.
    pub today: NaiveDate,
}

impl CrawlSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig, today: NaiveDate) -> Self {
        Self {
            navigation_timeout: config.navigation_timeout(),
            exhaust: ExhaustConfig::from_app_config(config),
            extract: ExtractOptions::from_app_config(config),
            criteria: config.criteria.clone(),
            dedup_strategy: config.dedup_strategy,
            today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetStatus {
    Ok { extracted: usize, accepted: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOutcome {
    pub url: String,
    /// Host key of the adapter that handled the target.
    pub adapter: &'static str,
    pub status: TargetStatus,
}

/// Result of one run: the final candidates plus per-target bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Accepted, deduplicated, sorted.
    pub candidates: Vec<ListingCandidate>,
    pub outcomes: Vec<TargetOutcome>,
    /// Candidates extracted before filtering.
    pub raw_count: usize,
    pub rejected_count: usize,
    pub duplicate_count: usize,
}

impl CrawlReport {
    #[must_use]
    pub fn failed_targets(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TargetStatus::Failed { .. }))
            .count()
    }

    /// `true` when at least one target was attempted and none succeeded.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.failed_targets() == self.outcomes.len()
    }
}

pub struct CrawlOrchestrator {
    registry: AdapterRegistry,
    settings: CrawlSettings,
}

impl CrawlOrchestrator {
    #[must_use]
    pub fn new(registry: AdapterRegistry, settings: CrawlSettings) -> Self {
        Self { registry, settings }
    }

    #[must_use]
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    #[must_use]
    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Visit every target in order and return the merged result.
    ///
    /// Never fails as a whole: a target whose navigation or extraction fails
    /// is recorded as [`TargetStatus::Failed`] and contributes nothing.
    pub async fn run(&self, page: &mut dyn RenderContext, targets: &[SearchTarget]) -> CrawlReport {
        let policy = FilterPolicy::new(self.settings.criteria.clone());
        let mut exhauster = PageExhauster::new(self.settings.exhaust);
        let mut report = CrawlReport::default();
        let mut accepted = Vec::new();

        for (index, target) in targets.iter().enumerate() {
            let url = target.url();
            let adapter = self.registry.resolve(url).host();
            tracing::info!(url, adapter, target = index + 1, total = targets.len(), "crawling target");

            let status = match self.crawl_target(page, target, &mut exhauster).await {
                Ok(raw) => {
                    let extracted = raw.len();
                    let before = accepted.len();
                    for candidate in raw {
                        match policy.evaluate(&candidate) {
                            None => accepted.push(candidate),
                            Some(reason) => {
                                tracing::debug!(url = %candidate.url, %reason, "candidate rejected");
                                report.rejected_count += 1;
                            }
                        }
                    }
                    report.raw_count += extracted;
                    let kept = accepted.len() - before;
                    tracing::info!(url, extracted, accepted = kept, "target done");
                    TargetStatus::Ok {
                        extracted,
                        accepted: kept,
                    }
                }
                Err(e) => {
                    tracing::warn!(url, error = %e, "target failed, skipping");
                    TargetStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            report.outcomes.push(TargetOutcome {
                url: url.to_owned(),
                adapter,
                status,
            });
        }

        let before_dedup = accepted.len();
        let mut candidates = Deduplicator::new(self.settings.dedup_strategy).dedupe(accepted);
        report.duplicate_count = before_dedup - candidates.len();
        sort_candidates(&mut candidates, self.settings.today);
        report.candidates = candidates;

        if report.all_failed() {
            tracing::warn!(targets = report.outcomes.len(), "every target failed");
        }
        tracing::info!(
            targets = report.outcomes.len(),
            failed = report.failed_targets(),
            raw = report.raw_count,
            rejected = report.rejected_count,
            duplicates = report.duplicate_count,
            kept = report.candidates.len(),
            strategy = %self.settings.dedup_strategy,
            "crawl complete"
        );
        report
    }

    async fn crawl_target(
        &self,
        page: &mut dyn RenderContext,
        target: &SearchTarget,
        exhauster: &mut PageExhauster,
    ) -> Result<Vec<ListingCandidate>, ScraperError> {
        let navigation = page
            .navigate(target.url(), self.settings.navigation_timeout)
            .await?;
        tracing::debug!(
            url = %navigation.final_url,
            status = navigation.status,
            load_time_ms = navigation.load_time_ms,
            "navigated"
        );

        exhauster.run(page).await;

        let adapter = self.registry.resolve(target.url());
        adapter.extract(page, target, &self.settings.extract).await
    }
}
