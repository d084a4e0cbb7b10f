#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Merges every JSON file in the snapshot directory into one document keyed
//! by repository.

use std::path::PathBuf;

use reposnap_config::SnapshotConfig;
use reposnap_snapshot_models::{Document, MergedDocument, RepositoryIdentifier, RunTimestamp};
use reposnap_store::{SnapshotStore, SnapshotStoreError, merged_filename};

/// Errors that end a merge run.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error(transparent)]
    Store(#[from] SnapshotStoreError),
}

/// Fold `document` into `merged`: every known repository that appears as a
/// top-level key replaces whatever `merged` held for it, with its nested
/// `repository` field set to the identifier.
pub fn merge_document(merged: &mut MergedDocument, known: &[RepositoryIdentifier], document: &Document) {
    let Some(object) = document.as_object() else {
        return;
    };

    for repo in known {
        if let Some(value) = object.get(repo.as_str()) {
            let mut value = value.clone();
            if let Some(nested) = value.as_object_mut() {
                nested.insert(
                    "repository".to_string(),
                    Document::String(repo.to_string()),
                );
            }
            merged.insert(repo, value);
        }
    }
}

/// Merge `documents` in order; later documents win.
pub fn merge_documents<'a>(
    known: &[RepositoryIdentifier],
    documents: impl IntoIterator<Item = &'a Document>,
) -> MergedDocument {
    let mut merged = MergedDocument::new();
    for document in documents {
        merge_document(&mut merged, known, document);
    }
    merged
}

pub struct Merger {
    store: SnapshotStore,
    known: Vec<RepositoryIdentifier>,
}

impl Merger {
    #[must_use]
    pub fn new(config: &SnapshotConfig) -> Self {
        Self {
            store: SnapshotStore::new(config.data_dir.clone()),
            known: config.repositories.clone(),
        }
    }

    /// Merge the snapshot directory, labeling the output with the current
    /// time. Returns the written file, or `None` if there was nothing to
    /// merge.
    ///
    /// # Errors
    ///
    /// * If the directory cannot be listed
    /// * If the merged document cannot be written
    pub fn run(&self) -> Result<Option<PathBuf>, MergeError> {
        self.run_at(RunTimestamp::now())
    }

    /// Same as [`Merger::run`] with an explicit run label.
    ///
    /// # Errors
    ///
    /// * If the directory cannot be listed
    /// * If the merged document cannot be written
    pub fn run_at(&self, run: RunTimestamp) -> Result<Option<PathBuf>, MergeError> {
        let dir = self.store.dir();
        let Some(files) = self.store.json_files()? else {
            log::info!("No {} directory found. Exiting.", dir.display());
            return Ok(None);
        };
        if files.is_empty() {
            log::info!("No JSON files found in {}. Exiting.", dir.display());
            return Ok(None);
        }

        log::info!("Found {} JSON files:", files.len());
        for file in &files {
            log::info!("  - {}", file.display());
        }

        let mut merged = MergedDocument::new();
        let mut loaded = 0_usize;
        for file in &files {
            log::debug!("Reading {}...", file.display());
            match self.store.load(file) {
                Ok(document) => {
                    merge_document(&mut merged, &self.known, &document);
                    loaded += 1;
                }
                Err(e) => log::warn!("Skipping {}: {e}", file.display()),
            }
        }

        let path = self.store.save(&merged, &merged_filename(&run))?;
        log::info!(
            "Merged {loaded} of {} files into {} repositories",
            files.len(),
            merged.len()
        );
        Ok(Some(path))
    }
}
