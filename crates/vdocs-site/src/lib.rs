//! Navigation-driven page generation for versioned documentation.
//!
//! Expands navigation documents (`docs_nav_*.yml`) into concrete pages: each
//! eligible navigation entry is backed by a markdown source, stamped with the
//! release and resolved version, and placed under `{product}/{release}/`.
//!
//! # Pipeline
//!
//! ```text
//! VersionRegistry ──┐
//!                   ├─> walk(NavTree) ─> PageRequest ─> PageMaterializer ─> PageSink
//! NavDocument ──────┘
//! ```
//!
//! - [`VersionRegistry`]: `(edition, release) -> version` lookup
//! - [`walk`]: eligibility rules and traversal order
//! - [`PageMaterializer`]: source resolution, front matter, metadata stamping
//! - [`Generator`]: drives a whole run over every navigation document
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use vdocs_site::{GeneratedPage, Generator, GeneratorConfig};
//! use vdocs_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from(".")));
//! let generator = Generator::new(storage, GeneratorConfig::default());
//!
//! let mut pages: Vec<GeneratedPage> = Vec::new();
//! let report = generator.run(&mut pages)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod front_matter;
mod generator;
mod nav;
mod page;
mod versions;
mod writer;
mod yaml;

pub use error::GenerateError;
pub use front_matter::{FrontMatter, FrontMatterError, split_front_matter};
pub use generator::{GenerationReport, Generator, GeneratorConfig, PageSink, SinkError};
pub use nav::{EligibilityPolicy, NavDocument, NavNode, NavTree, PageRequest, WalkContext, walk};
pub use page::{GeneratedPage, PageMaterializer};
pub use versions::{VersionRecord, VersionRegistry};
pub use writer::FsPageWriter;
