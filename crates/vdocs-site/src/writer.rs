//! Filesystem page sink.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::generator::{PageSink, SinkError};
use crate::page::GeneratedPage;

/// File name written inside each page's output directory.
const PAGE_FILENAME: &str = "index.md";

/// Writes each page to `{output_root}/{output_dir}/index.md` as a front
/// matter document.
///
/// Pages later in a run overwrite earlier pages with the same output
/// directory; each overwrite is logged.
#[derive(Debug)]
pub struct FsPageWriter {
    output_root: PathBuf,
    written: HashSet<String>,
}

impl FsPageWriter {
    /// Create a writer rooted at `output_root`.
    #[must_use]
    pub fn new(output_root: PathBuf) -> Self {
        Self {
            output_root,
            written: HashSet::new(),
        }
    }

    /// Number of distinct pages written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written.len()
    }

    /// Path of the file a page is written to.
    pub fn page_path(&self, output_dir: &str) -> Result<PathBuf, SinkError> {
        let dir = Path::new(output_dir);
        let escapes = dir
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(format!("output directory escapes the site root: {output_dir}").into());
        }
        Ok(self.output_root.join(dir).join(PAGE_FILENAME))
    }
}

impl PageSink for FsPageWriter {
    fn register(&mut self, page: GeneratedPage) -> Result<(), SinkError> {
        let path = self.page_path(&page.output_dir)?;
        let document = page.to_document()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, document)?;

        if !self.written.insert(page.output_dir) {
            tracing::warn!(path = %path.display(), "Overwrote page generated earlier in this run");
        }
        Ok(())
    }
}
