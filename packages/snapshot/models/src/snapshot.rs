use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::{Document, RepositoryIdentifier};

/// One point-in-time capture of a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub repository: RepositoryIdentifier,
    #[serde(alias = "collected at")]
    pub collected_at: DateTime<Utc>,
    /// Repository metadata, `None` when it could not be fetched. A stored
    /// `null` reads back as `None`.
    pub info: Option<Document>,
    #[serde(default)]
    pub issues: Vec<Document>,
    #[serde(default)]
    pub commits: Vec<Document>,
}

impl RepositorySnapshot {
    #[must_use]
    pub fn new(repository: RepositoryIdentifier, collected_at: DateTime<Utc>) -> Self {
        Self {
            repository,
            collected_at,
            info: None,
            issues: Vec::new(),
            commits: Vec::new(),
        }
    }
}

/// Snapshots of every repository processed in one collection run,
/// keyed by identifier in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedSnapshot {
    entries: Vec<RepositorySnapshot>,
}

impl CombinedSnapshot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a snapshot, replacing any earlier one for the same repository.
    pub fn insert(&mut self, snapshot: RepositorySnapshot) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|s| s.repository == snapshot.repository)
        {
            *existing = snapshot;
        } else {
            self.entries.push(snapshot);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepositorySnapshot> {
        self.entries.iter()
    }
}

impl Serialize for CombinedSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for snapshot in &self.entries {
            map.serialize_entry(&snapshot.repository, snapshot)?;
        }
        map.end()
    }
}

/// Output of the merger: one document per known repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MergedDocument(serde_json::Map<String, Document>);

impl MergedDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `document` under `repository`. A later insert for the same
    /// repository replaces the earlier document.
    pub fn insert(&mut self, repository: &RepositoryIdentifier, document: Document) {
        self.0.insert(repository.to_string(), document);
    }

    #[must_use]
    pub fn get(&self, repository: &RepositoryIdentifier) -> Option<&Document> {
        self.0.get(repository.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
