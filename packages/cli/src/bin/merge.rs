#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::Parser;
use reposnap_cli::{SnapshotArgs, banner, init_logging};
use reposnap_config::SnapshotConfig;
use reposnap_merger::Merger;

#[derive(Parser)]
#[command(name = "reposnap-merge")]
#[command(about = "Combine all snapshot files into a single JSON document", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    snapshot: SnapshotArgs,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = SnapshotConfig::from_env().context("Failed to load configuration")?;
    if let Some(data_dir) = cli.snapshot.data_dir {
        config = config.with_data_dir(data_dir);
    }

    println!("{}", banner("Combining All JSON Files into Single File"));

    let merger = Merger::new(&config);
    match merger.run().context("Failed to merge snapshot files")? {
        Some(path) => println!("Combined data written to {}", path.display()),
        None => println!("Nothing to combine in {}", config.data_dir.display()),
    }

    Ok(())
}
