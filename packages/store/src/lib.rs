#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Snapshot directory storage for `reposnap`.
//!
//! Both flows share one flat directory of JSON files. Every file a run
//! writes carries the run's timestamp, so runs never overwrite each other.

mod store;

pub use store::{
    SnapshotStore, SnapshotStoreError, combined_filename, merged_filename, repository_filename,
};
