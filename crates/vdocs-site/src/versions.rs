//! Version registry.
//!
//! Maps a product edition and documentation release line to the concrete
//! version string shown on generated pages (e.g. `gateway` + `3.0` ->
//! `3.0.x`).

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::GenerateError;
use crate::yaml::scalar_string;

/// One registry entry.
///
/// Registry files usually carry more keys per entry (release dates, labels);
/// only the three used for lookup are read. Entries missing any of them are
/// dropped when the registry is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionRecord {
    /// Product edition (e.g. "gateway", "ce").
    #[serde(deserialize_with = "scalar_string")]
    pub edition: String,
    /// Documentation release line (e.g. "3.0").
    #[serde(deserialize_with = "scalar_string")]
    pub release: String,
    /// Concrete version string (e.g. "3.0.x").
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,
}

/// Ordered, read-only list of version records.
///
/// Built once per generation run and passed by reference to everything that
/// needs a version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRegistry {
    records: Vec<VersionRecord>,
}

impl VersionRegistry {
    /// Create a registry from records, keeping their order.
    #[must_use]
    pub fn new(records: Vec<VersionRecord>) -> Self {
        Self { records }
    }

    /// Parse a registry from a YAML sequence of records.
    ///
    /// An empty document yields an empty registry. Entries that aren't
    /// complete records can never match a lookup and are skipped.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let entries: Vec<Value> = serde_yaml::from_str(content)?;
        let records = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_yaml::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!(index, error = %e, "Skipping incomplete version record");
                    None
                }
            })
            .collect();
        Ok(Self::new(records))
    }

    /// Resolve the version for an edition and release.
    ///
    /// The first matching record wins.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::VersionNotFound`] when no record matches.
    pub fn resolve(&self, edition: &str, release: &str) -> Result<&str, GenerateError> {
        self.records
            .iter()
            .find(|r| r.edition == edition && r.release == release)
            .map(|r| r.version.as_str())
            .ok_or_else(|| GenerateError::VersionNotFound {
                edition: edition.to_owned(),
                release: release.to_owned(),
            })
    }

    /// All records in registry order.
    #[must_use]
    pub fn records(&self) -> &[VersionRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
