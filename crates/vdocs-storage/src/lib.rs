//! Storage abstraction for the vdocs page generator.
//!
//! This crate provides a [`Storage`] trait for reading project files (version
//! registry, navigation documents, markdown sources) independently of the
//! backend, so the generation pipeline can be tested without touching the
//! real filesystem.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `read()`, `exists()`, and `list()` methods
//! - [`FsStorage`] implementation rooted at a project directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use vdocs_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("."));
//! for nav in storage.list("app/_data/docs_nav_*.yml")? {
//!     let yaml = storage.read(&nav)?;
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
