//! `check` command implementation.

use clap::Args;
use vdocs_site::GeneratedPage;

use super::{GenerateArgs, generator_from_config, print_report};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    generate: GenerateArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Runs a full generation into memory so every lookup and source read is
    /// exercised, but writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or generation fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.generate.load_config(None)?;
        let generator = generator_from_config(&config);

        let mut pages: Vec<GeneratedPage> = Vec::new();
        let report = generator.run(&mut pages)?;

        print_report(&output, &report);
        output.success(&format!("OK: {} pages would be generated", pages.len()));
        Ok(())
    }
}
