//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod list;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use vdocs_config::{CliSettings, Config};
use vdocs_site::{EligibilityPolicy, GenerationReport, Generator, GeneratorConfig};
use vdocs_storage::FsStorage;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use list::ListArgs;

/// Arguments shared by every generation command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to configuration file (default: auto-discover vdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory, relative to the project (overrides config).
    #[arg(short, long)]
    source_dir: Option<String>,

    /// Let an explicit `generate: false` switch off entries in documents
    /// that assume generation (overrides config).
    #[arg(long, env = "VDOCS_STRICT_GENERATE")]
    strict_generate: bool,
}

impl GenerateArgs {
    /// Load configuration with these arguments applied.
    pub(crate) fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir,
            strict_generate: self.strict_generate.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config_path = ?config.config_path,
            project_dir = %config.paths_resolved.project_dir.display(),
            "Loaded configuration"
        );
        Ok(config)
    }
}

/// Build a generator reading from the configured project directory.
pub(crate) fn generator_from_config(config: &Config) -> Generator {
    let paths = &config.paths_resolved;
    let storage = Arc::new(FsStorage::new(paths.project_dir.clone()));
    let policy = if config.pages.strict_generate {
        EligibilityPolicy::Strict
    } else {
        EligibilityPolicy::Permissive
    };

    Generator::new(
        storage,
        GeneratorConfig {
            versions_file: paths.versions_file.clone(),
            nav_glob: paths.nav_glob.clone(),
            source_dir: paths.source_dir.clone(),
            layout: config.pages.layout.clone(),
            policy,
        },
    )
}

/// Print a one-line run summary, warning when documents failed to parse.
pub(crate) fn print_report(output: &Output, report: &GenerationReport) {
    output.info(&format!(
        "Navigation documents: {} processed, {} not generated",
        report.documents_processed, report.documents_not_generated
    ));
    if let Some(warning) = skipped_warning(report) {
        output.warning(&warning);
    }
}

/// Warning for documents skipped because they failed to parse.
///
/// Documents that are simply not generated are expected and never warned
/// about.
fn skipped_warning(report: &GenerationReport) -> Option<String> {
    (report.documents_skipped > 0).then(|| {
        format!(
            "{} navigation documents could not be parsed and were skipped (run with --verbose for details)",
            report.documents_skipped
        )
    })
}
