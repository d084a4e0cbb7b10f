#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use reposnap_collector::{CollectionOutcome, CollectionReport};

const RULE_WIDTH: usize = 60;

/// Options shared by both binaries.
#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Snapshot directory [default: $REPOSNAP_DATA_DIR or data/raw]
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Logs at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[must_use]
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title}\n{rule}")
}

/// Human-readable end-of-run summary.
///
/// # Panics
///
/// * Never in practice; writing into a `String` does not fail
#[must_use]
pub fn format_report(report: &CollectionReport) -> String {
    let mut out = String::new();

    match &report.outcome {
        CollectionOutcome::Aborted { remaining } => {
            writeln!(
                out,
                "Collection not started: only {remaining} API requests remaining. Consider waiting."
            )
            .unwrap();
            return out;
        }
        CollectionOutcome::StoppedEarly { remaining, skipped } => {
            writeln!(
                out,
                "Stopped early with {remaining} API requests remaining; skipped:"
            )
            .unwrap();
            for repo in skipped {
                writeln!(out, "  - {repo}").unwrap();
            }
        }
        CollectionOutcome::Completed => {}
    }

    writeln!(out, "{}", banner("Data collection complete!")).unwrap();
    writeln!(out, "\nSummary (run {}):", report.run).unwrap();
    for summary in &report.summaries {
        writeln!(out, "\nRepository: {}", summary.repository).unwrap();
        writeln!(out, "  Issues collected: {}", summary.issues).unwrap();
        writeln!(out, "  Commits collected: {}", summary.commits).unwrap();
        if !summary.has_info {
            writeln!(out, "  Repository info: unavailable").unwrap();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use reposnap_collector::RepositorySummary;
    use reposnap_snapshot_models::RunTimestamp;

    fn report(outcome: CollectionOutcome) -> CollectionReport {
        CollectionReport {
            run: RunTimestamp::from_datetime(Local.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()),
            outcome,
            summaries: vec![RepositorySummary {
                repository: "numpy/numpy".parse().unwrap(),
                has_info: false,
                issues: 87,
                commits: 100,
            }],
            written: Vec::new(),
        }
    }

    #[test]
    fn test_format_completed_report() {
        let text = format_report(&report(CollectionOutcome::Completed));

        assert!(text.contains("Data collection complete!"));
        assert!(text.contains("Summary (run 20240601_100000):"));
        assert!(text.contains("Repository: numpy/numpy\n  Issues collected: 87\n  Commits collected: 100"));
        assert!(text.contains("Repository info: unavailable"));
        assert!(!text.contains("Stopped early"));
    }

    #[test]
    fn test_format_stopped_early_lists_skipped() {
        let text = format_report(&report(CollectionOutcome::StoppedEarly {
            remaining: 12,
            skipped: vec!["mlflow/mlflow".parse().unwrap()],
        }));

        assert!(text.starts_with("Stopped early with 12 API requests remaining; skipped:\n  - mlflow/mlflow\n"));
        assert!(text.contains("Issues collected: 87"));
    }

    #[test]
    fn test_format_aborted_report() {
        let text = format_report(&report(CollectionOutcome::Aborted { remaining: 3 }));

        assert!(text.contains("only 3 API requests remaining"));
        assert!(!text.contains("Summary"));
    }

    #[test]
    fn test_banner() {
        assert_eq!(banner("x"), format!("{0}\nx\n{0}", "=".repeat(60)));
    }
}
