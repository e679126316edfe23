use clap::Parser;
use tracing::info;

use whitehouse_rss::cli::Cli;
use whitehouse_rss::config::Config;
use whitehouse_rss::errors::{FeedError, FeedResult};
use whitehouse_rss::logging::configure_logging;
use whitehouse_rss::services::{Pipeline, RunSummary};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let FeedError::Fetch(fetch) = &e {
            if fetch.status().is_some_and(|status| status.is_server_error()) {
                eprintln!("The source site is failing; the previous feed was left in place.");
            }
        }
        std::process::exit(1);
    }
}

fn run() -> FeedResult<()> {
    let cli = Cli::parse();
    configure_logging();

    // Environment first, then command-line overrides
    let mut config = Config::from_env()?;
    if let Some(url) = cli.url.as_deref() {
        config = config.with_source_url(url)?;
    }
    if let Some(output) = cli.output {
        config = config.with_output_path(output);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(secs)?;
    }
    if cli.self_url.is_some() {
        config = config.with_self_url(cli.self_url)?;
    }

    let pipeline = Pipeline::from_config(config)?;

    if cli.dry_run {
        let (xml, summary) = pipeline.render()?;
        println!("{}", xml);
        report(&summary);
        return Ok(());
    }

    let summary = pipeline.run()?;
    report(&summary);

    Ok(())
}

fn report(summary: &RunSummary) {
    if summary.is_empty_result() {
        info!("Wrote an empty feed; check whether the page layout changed.");
    }

    let degraded = summary.warnings.len() - usize::from(summary.is_empty_result());
    match &summary.output_path {
        Some(path) => info!(
            "Done! {} items written to {} ({} with fallback values)",
            summary.item_count,
            path.display(),
            degraded
        ),
        None => info!(
            "Dry run complete. Would write {} items ({} with fallback values)",
            summary.item_count, degraded
        ),
    }
}
