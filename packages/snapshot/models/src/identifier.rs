use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors produced when parsing a repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The identifier is not of the form `owner/name`.
    #[error("Invalid repository identifier '{0}': expected 'owner/name'")]
    Malformed(String),
}

/// A repository on the API host, written `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryIdentifier {
    full_name: String,
    split: usize,
}

impl RepositoryIdentifier {
    /// # Errors
    ///
    /// * If `value` does not contain exactly one `/` with non-empty text on both sides
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let malformed = || IdentifierError::Malformed(value.to_string());

        let split = value.find('/').ok_or_else(malformed)?;
        let (owner, name) = (&value[..split], &value[split + 1..]);

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(malformed());
        }
        if value.chars().any(char::is_whitespace) {
            return Err(malformed());
        }

        Ok(Self {
            full_name: value.to_string(),
            split,
        })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.full_name[..self.split]
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.full_name[self.split + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full_name
    }

    /// Filesystem-safe form, `owner_name`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.full_name.replace('/', "_")
    }
}

impl fmt::Display for RepositoryIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

impl FromStr for RepositoryIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for RepositoryIdentifier {
    fn as_ref(&self) -> &str {
        &self.full_name
    }
}

impl Serialize for RepositoryIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.full_name)
    }
}

impl<'de> Deserialize<'de> for RepositoryIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
