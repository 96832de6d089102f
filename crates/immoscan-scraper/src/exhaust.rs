//! Drives a rendered page through pagination and lazy loading until no new
//! content appears or the iteration bound is hit.
//!
//! ```text
//! Settling ──► Driving { 1 } ──► Driving { 2 } ──► … ──► Exhausted
//!                   │ no growth / action failed / bound reached ▲
//!                   └────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use immoscan_core::AppConfig;

use crate::error::ScraperError;
use crate::render::RenderContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustState {
    Settling,
    Driving { iteration: usize },
    Exhausted,
}

/// Why driving stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustReason {
    NoGrowth,
    IterationLimit,
    /// A click or scroll failed; treated as no growth.
    ActionFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExhaustReport {
    pub iterations: usize,
    pub next_clicks: usize,
    pub scrolls: usize,
    pub reason: ExhaustReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustConfig {
    pub initial_settle: Duration,
    pub next_settle: Duration,
    pub scroll_settle: Duration,
    pub max_iterations: usize,
}

impl Default for ExhaustConfig {
    fn default() -> Self {
        Self {
            initial_settle: Duration::from_millis(1500),
            next_settle: Duration::from_millis(1200),
            scroll_settle: Duration::from_millis(600),
            max_iterations: 10,
        }
    }
}

impl ExhaustConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            initial_settle: Duration::from_millis(config.initial_settle_ms),
            next_settle: Duration::from_millis(config.next_settle_ms),
            scroll_settle: Duration::from_millis(config.scroll_settle_ms),
            max_iterations: config.max_drive_iterations,
        }
    }
}

/// Bounded page-exhaustion controller. One instance is reused per target.
#[derive(Debug)]
pub struct PageExhauster {
    config: ExhaustConfig,
    state: ExhaustState,
}

impl PageExhauster {
    #[must_use]
    pub fn new(config: ExhaustConfig) -> Self {
        Self {
            config,
            state: ExhaustState::Settling,
        }
    }

    #[must_use]
    pub fn state(&self) -> ExhaustState {
        self.state
    }

    /// Settle, then alternate "next page" clicks and scrolls until the growth
    /// signal stops increasing. Never fails: a failing action ends the drive.
    pub async fn run(&mut self, page: &mut dyn RenderContext) -> ExhaustReport {
        self.state = ExhaustState::Settling;
        page.settle(self.config.initial_settle).await;

        let mut report = ExhaustReport {
            iterations: 0,
            next_clicks: 0,
            scrolls: 0,
            reason: ExhaustReason::IterationLimit,
        };

        while report.iterations < self.config.max_iterations {
            report.iterations += 1;
            self.state = ExhaustState::Driving {
                iteration: report.iterations,
            };

            match self.drive_once(page, &mut report).await {
                Ok(true) => {}
                Ok(false) => {
                    report.reason = ExhaustReason::NoGrowth;
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        iteration = report.iterations,
                        error = %e,
                        "page action failed, treating as exhausted"
                    );
                    report.reason = ExhaustReason::ActionFailed;
                    break;
                }
            }
        }

        self.state = ExhaustState::Exhausted;
        tracing::debug!(
            iterations = report.iterations,
            next_clicks = report.next_clicks,
            scrolls = report.scrolls,
            reason = ?report.reason,
            "page exhausted"
        );
        report
    }

    /// One drive action. Returns whether the page grew.
    async fn drive_once(
        &self,
        page: &mut dyn RenderContext,
        report: &mut ExhaustReport,
    ) -> Result<bool, ScraperError> {
        let before = page.growth_signal().await?;

        if page.has_next_control().await {
            page.click_next().await?;
            report.next_clicks += 1;
            page.settle(self.config.next_settle).await;
        } else {
            page.scroll_to_bottom().await?;
            report.scrolls += 1;
            page.settle(self.config.scroll_settle).await;
        }

        let after = page.growth_signal().await?;
        Ok(after > before)
    }
}
