//! Generation error type.

use vdocs_storage::StorageError;

use crate::front_matter::FrontMatterError;
use crate::generator::SinkError;

/// Error raised while generating pages.
///
/// Every variant is fatal to the run. Navigation documents that fail to parse
/// are skipped before they can produce one of these.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Version registry could not be read.
    #[error("Failed to read version registry {path}: {source}")]
    RegistryRead {
        path: String,
        #[source]
        source: StorageError,
    },

    /// Version registry is not a valid list of version records.
    #[error("Invalid version registry {path}: {source}")]
    RegistryParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Navigation documents could not be listed.
    #[error("Failed to list navigation documents: {0}")]
    NavDiscovery(#[source] StorageError),

    /// No registry record for the document's product and release.
    #[error("No version found for edition '{edition}' and release '{release}'")]
    VersionNotFound { edition: String, release: String },

    /// Neither candidate source file exists.
    #[error("Source not found for '{src}' (tried {})", .candidates.join(", "))]
    SourceNotFound { src: String, candidates: Vec<String> },

    /// Source file has no usable front matter block.
    #[error("Malformed document {path}: {source}")]
    MalformedDocument {
        path: String,
        #[source]
        source: FrontMatterError,
    },

    /// Storage read failure.
    #[error("Failed to read {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: StorageError,
    },

    /// The page sink rejected a page.
    #[error("Failed to register page {output_dir}: {source}")]
    Sink {
        output_dir: String,
        #[source]
        source: SinkError,
    },

    /// Failure while generating a specific navigation document.
    #[error("{nav}: {source}")]
    Document {
        nav: String,
        #[source]
        source: Box<GenerateError>,
    },
}

impl GenerateError {
    /// Innermost error, unwrapping navigation document context.
    #[must_use]
    pub fn root_cause(&self) -> &GenerateError {
        match self {
            Self::Document { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
