//! `list` command implementation.

use clap::Args;
use vdocs_site::GeneratedPage;

use super::{GenerateArgs, generator_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    generate: GenerateArgs,

    /// Print pages as JSON (output directory, body and metadata).
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    /// Execute the list command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, generation or JSON
    /// serialization fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.generate.load_config(None)?;
        let generator = generator_from_config(&config);

        let mut pages: Vec<GeneratedPage> = Vec::new();
        generator.run(&mut pages)?;

        if self.json {
            output.print(&serde_json::to_string_pretty(&pages)?);
            return Ok(());
        }

        output.highlight(&format!("{} pages", pages.len()));
        for page in &pages {
            output.print(&format_row(page));
        }
        Ok(())
    }
}

/// One listing line: output directory, then the source it was edited from.
fn format_row(page: &GeneratedPage) -> String {
    match page.meta_str("edit_link") {
        Some(edit_link) => format!("{}\t{edit_link}", page.output_dir),
        None => page.output_dir.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_yaml::Mapping;

    use super::*;

    #[test]
    fn test_format_row_with_edit_link() {
        let mut metadata = Mapping::new();
        metadata.insert("edit_link".into(), "src/gateway/install.md".into());
        let page = GeneratedPage {
            output_dir: "gateway/3.0/install/".to_owned(),
            body: String::new(),
            metadata,
        };

        assert_eq!(
            format_row(&page),
            "gateway/3.0/install/\tsrc/gateway/install.md"
        );
    }

    #[test]
    fn test_format_row_without_edit_link() {
        let page = GeneratedPage {
            output_dir: "gateway/3.0/".to_owned(),
            body: String::new(),
            metadata: Mapping::new(),
        };

        assert_eq!(format_row(&page), "gateway/3.0/");
    }
}
