//! `build` command implementation.

use std::path::PathBuf;

use clap::Args;
use vdocs_site::FsPageWriter;

use super::{GenerateArgs, generator_from_config, print_report};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    generate: GenerateArgs,

    /// Output directory for generated pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or generation fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.generate.load_config(self.output_dir)?;
        let out_dir = config.paths_resolved.output_dir.clone();

        output.info(&format!(
            "Generating pages from {} into {}",
            config.paths_resolved.project_dir.display(),
            out_dir.display()
        ));

        let generator = generator_from_config(&config);
        let mut writer = FsPageWriter::new(out_dir.clone());
        let report = generator.run(&mut writer)?;

        print_report(&output, &report);
        output.success(&format!(
            "Wrote {} pages ({} generated) to {}",
            writer.written(),
            report.pages_generated,
            out_dir.display()
        ));
        Ok(())
    }
}
