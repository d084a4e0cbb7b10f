#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use reposnap_cli::{SnapshotArgs, banner, format_report, init_logging};
use reposnap_collector::Collector;
use reposnap_config::CollectorConfig;
use reposnap_github::GitHubSource;

#[derive(Parser)]
#[command(name = "reposnap-collect")]
#[command(about = "Collect issue and commit snapshots of the configured repositories", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    snapshot: SnapshotArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = CollectorConfig::from_env().context("Failed to load configuration")?;
    if let Some(data_dir) = cli.snapshot.data_dir {
        config.snapshot = config.snapshot.with_data_dir(data_dir);
    }

    println!("{}", banner("GitHub API Data Collection"));

    let source = GitHubSource::new()
        .context("Failed to build HTTP client")?
        .with_token(config.token.clone())
        .with_base_url(config.base_url.clone());

    let collector = Collector::new(Arc::new(source), config);
    let report = collector
        .run()
        .await
        .context("Failed to write snapshot files")?;

    print!("{}", format_report(&report));

    Ok(())
}
