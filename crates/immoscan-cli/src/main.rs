mod crawl;
mod export;
mod targets;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use immoscan_core::DedupStrategy;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "immoscan")]
#[command(about = "Aggregate rental listings from property sites into one deduplicated dataset")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl every search target and write the result document
    Crawl {
        /// Entry-URL list (defaults to IMMOSCAN_LINKS_PATH)
        #[arg(long)]
        links: Option<PathBuf>,

        /// Postal code → communes catalog (defaults to IMMOSCAN_COMMUNES_PATH)
        #[arg(long)]
        communes: Option<PathBuf>,

        /// Result document (defaults to IMMOSCAN_OUTPUT_PATH)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Duplicate key: `url` or `fingerprint`
        #[arg(long)]
        dedup: Option<DedupStrategy>,

        /// Print the targets that would be visited and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Render the result document as CSV and a flat HTML list
    Export {
        /// Result document (defaults to IMMOSCAN_OUTPUT_PATH)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Directory for annonces.csv and annonces_flat.html (defaults to the
        /// input's directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// List resolved search targets and the adapter each one maps to
    Targets {
        #[arg(long)]
        links: Option<PathBuf>,

        #[arg(long)]
        communes: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = immoscan_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Crawl {
            links,
            communes,
            output,
            dedup,
            dry_run,
        } => {
            crawl::run_crawl(
                &config,
                crawl::CrawlArgs {
                    links,
                    communes,
                    output,
                    dedup,
                    dry_run,
                },
            )
            .await
        }
        Commands::Export { input, out_dir } => {
            let input = input.unwrap_or_else(|| config.output_path.clone());
            export::run_export(&input, out_dir.as_deref())
        }
        Commands::Targets { links, communes } => targets::run_targets(
            &config,
            &links.unwrap_or_else(|| config.links_path.clone()),
            &communes.unwrap_or_else(|| config.communes_path.clone()),
        ),
    }
}

#[cfg(test)]
mod tests;
