//! Page materialization.
//!
//! [`PageMaterializer`] turns a [`PageRequest`] into a [`GeneratedPage`]:
//!
//! 1. Normalize the destination and pick the source name.
//! 2. Compute the output directory `{product}/{release}/{path}`.
//! 3. Resolve the source file, `{source_dir}/{src}.md` first, then
//!    `{source_dir}/{src}/index.md`.
//! 4. Split front matter and stamp `edit_link`, `release`, `version` and a
//!    default `layout`.

use std::sync::Arc;

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use vdocs_storage::Storage;

use crate::error::GenerateError;
use crate::front_matter::split_front_matter;
use crate::nav::PageRequest;

/// A page ready to be handed to a page sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPage {
    /// Output directory, relative to the site root (e.g. `gateway/3.0/install/`).
    pub output_dir: String,
    /// Page body, verbatim from the source document.
    pub body: String,
    /// Front matter with generation metadata stamped in.
    pub metadata: Mapping,
}

impl GeneratedPage {
    /// Look up a string metadata value.
    #[must_use]
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Render the page back into a front matter document.
    pub fn to_document(&self) -> Result<String, serde_yaml::Error> {
        let yaml = if self.metadata.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(&self.metadata)?
        };
        Ok(format!("---\n{yaml}---\n{}", self.body))
    }
}

/// Resolves page requests against a source tree.
pub struct PageMaterializer {
    storage: Arc<dyn Storage>,
    source_dir: String,
    default_layout: String,
}

impl PageMaterializer {
    /// Create a materializer reading sources from `source_dir` in `storage`.
    pub fn new(
        storage: Arc<dyn Storage>,
        source_dir: impl Into<String>,
        default_layout: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            source_dir: source_dir.into(),
            default_layout: default_layout.into(),
        }
    }

    /// Materialize one page.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::SourceNotFound`] if neither candidate exists,
    /// [`GenerateError::MalformedDocument`] if the source has no usable front
    /// matter, or [`GenerateError::Storage`] if the source can't be read.
    pub fn materialize(&self, request: &PageRequest) -> Result<GeneratedPage, GenerateError> {
        let dest = request
            .dest_url
            .strip_prefix('/')
            .unwrap_or(&request.dest_url);

        let src = request.src.as_deref().unwrap_or(dest);
        let src = src.strip_suffix('/').unwrap_or(src);

        let output_path = if src == "index" { "" } else { dest };
        let output_dir = format!("{}/{}/{output_path}", request.product, request.release);

        let source_name = match src.strip_prefix('/') {
            Some(rooted) => rooted.to_owned(),
            None => format!("{}/{src}", request.product),
        };
        let file = self.resolve_source(&source_name)?;

        let content = self
            .storage
            .read(&file)
            .map_err(|source| GenerateError::Storage {
                path: file.clone(),
                source,
            })?;
        let front_matter =
            split_front_matter(&content).map_err(|source| GenerateError::MalformedDocument {
                path: file.clone(),
                source,
            })?;

        let mut metadata = front_matter.metadata;
        metadata.insert("edit_link".into(), file.into());
        metadata.insert("release".into(), request.release.clone().into());
        metadata.insert("version".into(), request.version.clone().into());
        if !has_layout(&metadata) {
            metadata.insert("layout".into(), self.default_layout.clone().into());
        }

        tracing::debug!(output_dir = %output_dir, src = %source_name, "Materialized page");

        Ok(GeneratedPage {
            output_dir,
            body: front_matter.body,
            metadata,
        })
    }

    /// Pick the first existing candidate for a source name.
    fn resolve_source(&self, source_name: &str) -> Result<String, GenerateError> {
        let base = self.source_dir.trim_end_matches('/');
        let candidates = [
            format!("{base}/{source_name}.md"),
            format!("{base}/{source_name}/index.md"),
        ];

        if let Some(found) = candidates.iter().find(|c| self.storage.exists(c)) {
            return Ok(found.clone());
        }

        Err(GenerateError::SourceNotFound {
            src: source_name.to_owned(),
            candidates: candidates.into(),
        })
    }
}

/// Whether the document sets a usable layout (null and `false` don't count).
fn has_layout(metadata: &Mapping) -> bool {
    !matches!(
        metadata.get("layout"),
        None | Some(Value::Null | Value::Bool(false))
    )
}
