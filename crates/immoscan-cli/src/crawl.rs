use std::path::PathBuf;

use anyhow::Context;
use immoscan_core::{AppConfig, DedupStrategy};
use immoscan_scraper::{
    write_candidates, AdapterRegistry, CrawlOrchestrator, CrawlReport, CrawlSettings,
    HttpRenderContext, TargetStatus,
};

use crate::targets::{print_targets, resolve_targets};

/// Flags of the `crawl` subcommand; `None` falls back to the config.
#[derive(Debug, Default)]
pub(crate) struct CrawlArgs {
    pub links: Option<PathBuf>,
    pub communes: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub dedup: Option<DedupStrategy>,
    pub dry_run: bool,
}

pub(crate) async fn run_crawl(config: &AppConfig, args: CrawlArgs) -> anyhow::Result<()> {
    let links = args.links.unwrap_or_else(|| config.links_path.clone());
    let communes = args.communes.unwrap_or_else(|| config.communes_path.clone());
    let output = args.output.unwrap_or_else(|| config.output_path.clone());

    let targets = resolve_targets(config, &links, &communes)?;
    let registry = AdapterRegistry::default();

    if args.dry_run {
        println!("dry-run: {} target(s) would be crawled", targets.len());
        print_targets(&registry, &targets);
        return Ok(());
    }

    let mut settings = CrawlSettings::from_app_config(config, chrono::Local::now().date_naive());
    if let Some(strategy) = args.dedup {
        settings.dedup_strategy = strategy;
    }

    let mut page = HttpRenderContext::from_config(config)
        .context("failed to build HTTP render context")?;
    let orchestrator = CrawlOrchestrator::new(registry, settings);
    let report = orchestrator.run(&mut page, &targets).await;

    write_candidates(&output, &report.candidates)
        .with_context(|| format!("failed to write results to {}", output.display()))?;

    print_summary(&report, &output.display().to_string());
    Ok(())
}

fn print_summary(report: &CrawlReport, output: &str) {
    for outcome in &report.outcomes {
        match &outcome.status {
            TargetStatus::Ok {
                extracted,
                accepted,
            } => println!(
                "  ok      {:<22} {extracted:>4} extracted {accepted:>4} kept  {}",
                outcome.adapter, outcome.url
            ),
            TargetStatus::Failed { reason } => println!(
                "  failed  {:<22} {}: {reason}",
                outcome.adapter, outcome.url
            ),
        }
    }
    println!(
        "crawl complete: {} target(s), {} failed, {} extracted, {} rejected, {} duplicate(s), {} written to {output}",
        report.outcomes.len(),
        report.failed_targets(),
        report.raw_count,
        report.rejected_count,
        report.duplicate_count,
        report.candidates.len(),
    );
}
