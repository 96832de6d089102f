use std::path::Path;

use anyhow::Context;
use immoscan_core::{
    build_search_targets, default_search_templates, load_commune_catalog, load_entry_urls,
    AppConfig, SearchTarget,
};
use immoscan_scraper::AdapterRegistry;

/// Build the run's ordered target list from the two input files.
///
/// A missing entry-URL list degrades to a catalog-only run. Any other input
/// failure is fatal.
pub(crate) fn resolve_targets(
    config: &AppConfig,
    links: &Path,
    communes: &Path,
) -> anyhow::Result<Vec<SearchTarget>> {
    let entry_urls = match load_entry_urls(links) {
        Ok(urls) => urls,
        Err(e) if e.is_not_found() => {
            tracing::warn!(path = %links.display(), "entry URL list not found, using catalog only");
            Vec::new()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to load entry URLs from {}", links.display()))
        }
    };

    let catalog = load_commune_catalog(communes)
        .with_context(|| format!("failed to load commune catalog from {}", communes.display()))?;

    let targets = build_search_targets(
        &entry_urls,
        &catalog,
        &default_search_templates(),
        &config.criteria,
    );
    tracing::info!(
        entry_urls = entry_urls.len(),
        postal_codes = catalog.len(),
        targets = targets.len(),
        "resolved search targets"
    );
    Ok(targets)
}

pub(crate) fn print_targets(registry: &AdapterRegistry, targets: &[SearchTarget]) {
    for (index, target) in targets.iter().enumerate() {
        let adapter = registry.resolve(target.url()).host();
        let origin = match target {
            SearchTarget::Entry { .. } => "entry",
            SearchTarget::Synthesized { .. } => "catalog",
        };
        println!("{:>3}  {origin:<7}  {adapter:<22}  {}", index + 1, target.url());
    }
    println!("{} target(s)", targets.len());
}

pub(crate) fn run_targets(config: &AppConfig, links: &Path, communes: &Path) -> anyhow::Result<()> {
    let targets = resolve_targets(config, links, communes)?;
    print_targets(&AdapterRegistry::default(), &targets);
    Ok(())
}
