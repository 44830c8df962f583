//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;

use glob::{MatchOptions, Pattern};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores file contents in memory keyed by project-relative path. Use the
/// builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use vdocs_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("src/gateway/index.md", "---\ntitle: Home\n---\n# Hello");
///
/// assert!(storage.exists("src/gateway/index.md"));
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: BTreeMap<String, String>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn list(&self, pattern: &str) -> Result<Vec<String>, StorageError> {
        let pattern = Pattern::new(pattern).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPattern)
                .with_backend(BACKEND)
                .with_source(e)
        })?;
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };

        // BTreeMap keys iterate in sorted order.
        Ok(self
            .files
            .keys()
            .filter(|path| pattern.matches_with(path, options))
            .cloned()
            .collect())
    }
}
