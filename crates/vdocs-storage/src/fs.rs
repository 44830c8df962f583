//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading project files from a local directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// All paths are resolved against the project root directory.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use vdocs_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("/srv/docs-site"));
/// let registry = storage.read("app/_data/kong_versions.yml")?;
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Project root directory.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Validate that a path doesn't escape the project directory.
    ///
    /// Rejects paths containing parent directory components (`..`) to prevent
    /// path traversal (e.g., `../../../etc/passwd`).
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let has_parent_dir = path.components().any(|c| matches!(c, Component::ParentDir));

        if has_parent_dir {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Convert an absolute path under the root back to a `/`-separated
    /// project-relative string.
    fn relative_string(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        let rel = Path::new(path);
        Self::validate_path(rel)?;
        let full_path = self.root.join(rel);
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        let rel = Path::new(path);
        Self::validate_path(rel).is_ok() && self.root.join(rel).is_file()
    }

    fn list(&self, pattern: &str) -> Result<Vec<String>, StorageError> {
        Self::validate_path(Path::new(pattern))?;

        // An empty root is the current directory; prefixing it would root
        // the pattern at `/`.
        let full_pattern = if self.root.as_os_str().is_empty() {
            pattern.to_owned()
        } else {
            format!("{}/{}", Pattern::escape(&self.root.to_string_lossy()), pattern)
        };
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };
        let entries = glob::glob_with(&full_pattern, options).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPattern)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    if let Some(rel) = self.relative_string(&path) {
                        paths.push(rel);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %e.path().display(), error = %e, "Skipping unreadable path");
                }
            }
        }
        paths.sort();

        tracing::debug!(pattern, matches = paths.len(), "Listed files");
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_project() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let data = temp_dir.path().join("app/_data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("kong_versions.yml"), "- edition: ce\n").unwrap();
        fs::write(data.join("docs_nav_gateway_3.0.x.yml"), "product: gateway\n").unwrap();
        fs::write(data.join("docs_nav_ce_2.8.x.yml"), "product: ce\n").unwrap();
        fs::create_dir_all(data.join("docs_nav_dir.yml")).unwrap();
        fs::create_dir_all(temp_dir.path().join("src/gateway")).unwrap();
        fs::write(temp_dir.path().join("src/gateway/index.md"), "---\n---\n").unwrap();
        temp_dir
    }

    #[test]
    fn test_read_existing_file() {
        let project = create_project();
        let storage = FsStorage::new(project.path().to_path_buf());

        let content = storage.read("app/_data/kong_versions.yml").unwrap();

        assert_eq!(content, "- edition: ce\n");
    }

    #[test]
    fn test_read_missing_file() {
        let project = create_project();
        let storage = FsStorage::new(project.path().to_path_buf());

        let err = storage.read("src/missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(err.path, Some(project.path().join("src/missing.md")));
    }

    #[test]
    fn test_read_rejects_parent_dir() {
        let project = create_project();
        let storage = FsStorage::new(project.path().to_path_buf());

        let err = storage.read("../etc/passwd").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_exists() {
        let project = create_project();
        let storage = FsStorage::new(project.path().to_path_buf());

        assert!(storage.exists("src/gateway/index.md"));
        assert!(!storage.exists("src/gateway.md"));
        assert!(!storage.exists("src/gateway"));
        assert!(!storage.exists("../src/gateway/index.md"));
    }

    #[test]
    fn test_list_sorted_files_only() {
        let project = create_project();
        let storage = FsStorage::new(project.path().to_path_buf());

        let navs = storage.list("app/_data/docs_nav_*.yml").unwrap();

        assert_eq!(
            navs,
            vec![
                "app/_data/docs_nav_ce_2.8.x.yml".to_owned(),
                "app/_data/docs_nav_gateway_3.0.x.yml".to_owned(),
            ]
        );
    }

    #[test]
    fn test_list_star_does_not_cross_directories() {
        let project = create_project();
        let storage = FsStorage::new(project.path().to_path_buf());

        assert!(storage.list("src/*.md").unwrap().is_empty());
        assert_eq!(
            storage.list("src/**/*.md").unwrap(),
            vec!["src/gateway/index.md".to_owned()]
        );
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent"));

        assert!(storage.list("app/_data/*.yml").unwrap().is_empty());
    }

    #[test]
    fn test_list_with_empty_root_uses_cwd() {
        // Tests run from the package directory.
        let expected = vec![
            "src/fs.rs".to_owned(),
            "src/lib.rs".to_owned(),
            "src/mock.rs".to_owned(),
            "src/storage.rs".to_owned(),
        ];

        assert_eq!(FsStorage::new(PathBuf::new()).list("src/*.rs").unwrap(), expected);
        assert_eq!(FsStorage::new(PathBuf::from(".")).list("src/*.rs").unwrap(), expected);
    }

    #[test]
    fn test_list_invalid_pattern() {
        let project = create_project();
        let storage = FsStorage::new(project.path().to_path_buf());

        let err = storage.list("app/_data/[.yml").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPattern);
    }
}
