use super::*;

#[test]
fn parses_crawl_with_overrides() {
    let cli = Cli::try_parse_from([
        "immoscan",
        "crawl",
        "--links",
        "in/links.txt",
        "--dedup",
        "fingerprint",
        "--dry-run",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Crawl {
            links,
            communes,
            dedup,
            dry_run,
            ..
        } => {
            assert_eq!(links, Some(PathBuf::from("in/links.txt")));
            assert_eq!(communes, None);
            assert_eq!(dedup, Some(DedupStrategy::ContentFingerprint));
            assert!(dry_run);
        }
        other => panic!("expected crawl, got {other:?}"),
    }
}

#[test]
fn crawl_defaults_to_config_paths() {
    let cli = Cli::try_parse_from(["immoscan", "crawl"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Crawl {
            links: None,
            communes: None,
            output: None,
            dedup: None,
            dry_run: false,
        }
    ));
}

#[test]
fn rejects_unknown_dedup_strategy() {
    assert!(Cli::try_parse_from(["immoscan", "crawl", "--dedup", "title"]).is_err());
}

#[test]
fn parses_export_command() {
    let cli = Cli::try_parse_from(["immoscan", "export", "--out-dir", "out"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Export { input: None, out_dir: Some(ref dir) } if dir == &PathBuf::from("out")
    ));
}

#[test]
fn parses_targets_command() {
    let cli = Cli::try_parse_from(["immoscan", "targets"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Targets { .. }));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["immoscan"]).is_err());
}
