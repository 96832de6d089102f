pub mod adapters;
pub mod crawl;
pub mod dedup;
pub mod error;
pub mod exhaust;
pub mod filter;
pub mod normalize;
pub mod order;
pub mod output;
pub mod parse;
pub mod render;

#[cfg(test)]
pub(crate) mod testing;

pub use adapters::{AdapterRegistry, ExtractOptions, SiteAdapter};
pub use crawl::{CrawlOrchestrator, CrawlReport, CrawlSettings, TargetOutcome, TargetStatus};
pub use dedup::{canonical_key, dedupe, Deduplicator};
pub use error::ScraperError;
pub use exhaust::{ExhaustConfig, ExhaustReason, ExhaustReport, ExhaustState, PageExhauster};
pub use filter::{FilterPolicy, Rejection};
pub use order::sort_candidates;
pub use output::{read_candidates, write_candidates};
pub use render::{HttpRenderContext, NavigationResult, RenderContext};
