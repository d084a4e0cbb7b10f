//! Flat-directory storage for snapshot files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use reposnap_snapshot_models::{Document, RepositoryIdentifier, RunTimestamp};
use serde::Serialize;

/// Errors that can occur when using the snapshot store.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotStoreError {
    /// Failed to create the snapshot directory.
    #[error("Failed to create snapshot directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read from storage.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write to storage.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse stored data.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize data.
    #[error("Failed to serialize data for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Per-repository snapshot filename, `{owner}_{name}_{ts}.json`.
#[must_use]
pub fn repository_filename(repo: &RepositoryIdentifier, run: &RunTimestamp) -> String {
    format!("{}_{run}.json", repo.file_stem())
}

/// Combined snapshot filename for a collection run.
#[must_use]
pub fn combined_filename(run: &RunTimestamp) -> String {
    format!("all_repos_{run}.json")
}

/// Merged document filename for a merge run.
#[must_use]
pub fn merged_filename(run: &RunTimestamp) -> String {
    format!("combined_data_{run}.json")
}

/// A directory of JSON snapshot files.
///
/// Storage layout:
/// ```text
/// {dir}/
/// ├── pandas-dev_pandas_{ts}.json    # one per repository per collection run
/// ├── all_repos_{ts}.json            # combined snapshot of a collection run
/// └── combined_data_{ts}.json        # output of a merge run
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` as indented JSON to `{dir}/{filename}`, replacing any
    /// existing file. Non-ASCII text is written as-is.
    ///
    /// # Errors
    ///
    /// * If the directory cannot be created
    /// * If the file cannot be written
    /// * If `data` fails to serialize
    pub fn save<T: Serialize + ?Sized>(
        &self,
        data: &T,
        filename: &str,
    ) -> Result<PathBuf, SnapshotStoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| SnapshotStoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(filename);
        let write_error = |source| SnapshotStoreError::Write {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data).map_err(|source| {
            SnapshotStoreError::Serialize {
                path: path.clone(),
                source,
            }
        })?;
        writer.flush().map_err(write_error)?;

        log::info!("Saved to {}", path.display());
        Ok(path)
    }

    /// All `*.json` files in the directory, in directory listing order.
    ///
    /// Returns `None` if the directory does not exist.
    ///
    /// # Errors
    ///
    /// * If the directory exists but cannot be listed
    pub fn json_files(&self) -> Result<Option<Vec<PathBuf>>, SnapshotStoreError> {
        if !self.dir.exists() {
            return Ok(None);
        }

        let read_error = |source| SnapshotStoreError::Read {
            path: self.dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }

        Ok(Some(files))
    }

    /// Parse a JSON file into an opaque document.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read or is not valid JSON
    pub fn load(&self, path: &Path) -> Result<Document, SnapshotStoreError> {
        let file = File::open(path).map_err(|source| SnapshotStoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SnapshotStoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
