//! CLI error types.

use vdocs_config::ConfigError;
use vdocs_site::GenerateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
