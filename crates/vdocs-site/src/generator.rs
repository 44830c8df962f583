//! Generation driver.
//!
//! [`Generator::run`] performs one full pass: load the version registry,
//! discover navigation documents, and push every generated page into a
//! [`PageSink`].
//!
//! Failure policy:
//! - registry read/parse errors abort the run;
//! - navigation documents without `generate: true` are counted and ignored;
//! - navigation documents that fail to parse are logged and skipped;
//! - a missing version, source file or front matter aborts the run, with the
//!   offending navigation document named in the error.

use std::sync::Arc;
use std::time::Instant;

use serde_yaml::Value;
use vdocs_storage::Storage;

use crate::error::GenerateError;
use crate::nav::{EligibilityPolicy, NavDocument, WalkContext, walk};
use crate::page::{GeneratedPage, PageMaterializer};
use crate::versions::VersionRegistry;

/// Error returned by a [`PageSink`].
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Receives generated pages. Ownership of each page passes to the sink.
pub trait PageSink {
    /// Register one page.
    fn register(&mut self, page: GeneratedPage) -> Result<(), SinkError>;
}

impl PageSink for Vec<GeneratedPage> {
    fn register(&mut self, page: GeneratedPage) -> Result<(), SinkError> {
        self.push(page);
        Ok(())
    }
}

/// Generator settings. Paths are relative to the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Version registry file.
    pub versions_file: String,
    /// Glob matching navigation documents.
    pub nav_glob: String,
    /// Source tree for markdown documents.
    pub source_dir: String,
    /// Layout for pages that don't declare one.
    pub layout: String,
    /// How node `generate` flags combine with document defaults.
    pub policy: EligibilityPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            versions_file: "app/_data/kong_versions.yml".to_owned(),
            nav_glob: "app/_data/docs_nav_*.yml".to_owned(),
            source_dir: "src".to_owned(),
            layout: "docs-v2".to_owned(),
            policy: EligibilityPolicy::default(),
        }
    }
}

/// Summary of a generation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    /// Navigation documents that produced pages (possibly zero).
    pub documents_processed: usize,
    /// Navigation documents without `generate: true`.
    pub documents_not_generated: usize,
    /// Navigation documents skipped because they failed to parse.
    pub documents_skipped: usize,
    /// Pages handed to the sink.
    pub pages_generated: usize,
}

/// Outcome of loading one navigation document.
enum NavLoad {
    Generate(NavDocument),
    NotGenerated,
    Invalid,
}

/// Drives a generation run over every navigation document.
pub struct Generator {
    storage: Arc<dyn Storage>,
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator reading from `storage`.
    pub fn new(storage: Arc<dyn Storage>, config: GeneratorConfig) -> Self {
        Self { storage, config }
    }

    /// Generator settings.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run a full generation pass.
    ///
    /// # Errors
    ///
    /// See the module documentation for which failures abort the run.
    pub fn run(&self, sink: &mut dyn PageSink) -> Result<GenerationReport, GenerateError> {
        let start = Instant::now();
        let registry = self.load_registry()?;
        let nav_paths = self
            .storage
            .list(&self.config.nav_glob)
            .map_err(GenerateError::NavDiscovery)?;

        tracing::debug!(
            versions = registry.len(),
            navigation_documents = nav_paths.len(),
            "Starting generation"
        );

        let materializer = PageMaterializer::new(
            Arc::clone(&self.storage),
            self.config.source_dir.clone(),
            self.config.layout.clone(),
        );

        let mut report = GenerationReport::default();
        for nav_path in &nav_paths {
            let doc = match self.load_navigation(nav_path)? {
                NavLoad::Generate(doc) => doc,
                NavLoad::NotGenerated => {
                    report.documents_not_generated += 1;
                    continue;
                }
                NavLoad::Invalid => {
                    report.documents_skipped += 1;
                    continue;
                }
            };

            let pages = self
                .generate_document(&doc, &registry, &materializer, sink)
                .map_err(|e| GenerateError::Document {
                    nav: nav_path.clone(),
                    source: Box::new(e),
                })?;

            tracing::info!(
                nav = %nav_path,
                product = %doc.product,
                release = %doc.release,
                pages,
                "Generated navigation document"
            );
            report.documents_processed += 1;
            report.pages_generated += pages;
        }

        tracing::info!(
            documents = report.documents_processed,
            not_generated = report.documents_not_generated,
            skipped = report.documents_skipped,
            pages = report.pages_generated,
            elapsed_ms = start.elapsed().as_millis(),
            "Generation complete"
        );

        Ok(report)
    }

    /// Read and parse the version registry.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::RegistryRead`] or
    /// [`GenerateError::RegistryParse`].
    pub fn load_registry(&self) -> Result<VersionRegistry, GenerateError> {
        let path = &self.config.versions_file;
        let content = self
            .storage
            .read(path)
            .map_err(|source| GenerateError::RegistryRead {
                path: path.clone(),
                source,
            })?;
        VersionRegistry::from_yaml(&content).map_err(|source| GenerateError::RegistryParse {
            path: path.clone(),
            source,
        })
    }

    /// Read a navigation document and classify it.
    fn load_navigation(&self, path: &str) -> Result<NavLoad, GenerateError> {
        let content = self
            .storage
            .read(path)
            .map_err(|source| GenerateError::Storage {
                path: path.to_owned(),
                source,
            })?;

        let value: Value = match serde_yaml::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(nav = %path, error = %e, "Skipping unparseable navigation document");
                return Ok(NavLoad::Invalid);
            }
        };

        if !value.is_mapping() {
            tracing::warn!(nav = %path, "Skipping navigation document that is not a mapping");
            return Ok(NavLoad::Invalid);
        }
        if value.get("generate").and_then(Value::as_bool) != Some(true) {
            tracing::debug!(nav = %path, "Skipping navigation document without generate: true");
            return Ok(NavLoad::NotGenerated);
        }

        match serde_yaml::from_value(value) {
            Ok(doc) => Ok(NavLoad::Generate(doc)),
            Err(e) => {
                tracing::warn!(nav = %path, error = %e, "Skipping malformed navigation document");
                Ok(NavLoad::Invalid)
            }
        }
    }

    /// Walk and materialize one document. Returns the number of pages.
    fn generate_document(
        &self,
        doc: &NavDocument,
        registry: &VersionRegistry,
        materializer: &PageMaterializer,
        sink: &mut dyn PageSink,
    ) -> Result<usize, GenerateError> {
        let version = registry.resolve(&doc.product, &doc.release)?;
        let Some(items) = &doc.items else {
            return Ok(0);
        };

        let ctx = WalkContext {
            product: &doc.product,
            release: &doc.release,
            version,
            assume_generated: doc.assume_generated(),
            policy: self.config.policy,
        };

        let requests = walk(items, &ctx);
        for request in &requests {
            let page = materializer.materialize(request)?;
            let output_dir = page.output_dir.clone();
            sink.register(page)
                .map_err(|source| GenerateError::Sink { output_dir, source })?;
        }

        Ok(requests.len())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vdocs_storage::MockStorage;

    use super::*;

    const REGISTRY: &str = r#"
- edition: gateway
  release: "3.0"
  version: 3.0.x
- edition: ce
  release: "2.8"
  version: 2.8.x
"#;

    fn generator(storage: MockStorage) -> Generator {
        Generator::new(Arc::new(storage), GeneratorConfig::default())
    }

    fn base() -> MockStorage {
        MockStorage::new()
            .with_file("app/_data/kong_versions.yml", REGISTRY)
            .with_file("src/gateway/index.md", "---\ntitle: Home\n---\n# Hello")
            .with_file("src/gateway/install.md", "---\ntitle: Install\n---\nInstall")
    }

    fn run(storage: MockStorage) -> Result<(GenerationReport, Vec<GeneratedPage>), GenerateError> {
        let mut pages = Vec::new();
        let report = generator(storage).run(&mut pages)?;
        Ok((report, pages))
    }

    #[test]
    fn test_run_single_document() {
        let storage = base().with_file(
            "app/_data/docs_nav_gateway_3.0.x.yml",
            "product: gateway\nrelease: \"3.0\"\ngenerate: true\nitems:\n  - url: /gateway/\n  - url: /install/\n",
        );

        let (report, pages) = run(storage).unwrap();

        assert_eq!(
            report,
            GenerationReport {
                documents_processed: 1,
                documents_not_generated: 0,
                documents_skipped: 0,
                pages_generated: 2,
            }
        );
        let dirs: Vec<_> = pages.iter().map(|p| p.output_dir.as_str()).collect();
        assert_eq!(dirs, vec!["gateway/3.0/", "gateway/3.0/install/"]);
    }

    #[test]
    fn test_run_skips_non_generated_documents() {
        let storage = base()
            .with_file(
                "app/_data/docs_nav_off.yml",
                "product: gateway\nrelease: \"3.0\"\ngenerate: false\nitems:\n  - url: /install/\n",
            )
            .with_file(
                "app/_data/docs_nav_absent.yml",
                "product: gateway\nrelease: \"3.0\"\nitems:\n  - url: /install/\n",
            );

        let (report, pages) = run(storage).unwrap();

        assert_eq!(report.documents_not_generated, 2);
        assert_eq!(report.documents_skipped, 0);
        assert!(pages.is_empty());
    }

    #[test]
    fn test_run_skips_unparseable_documents() {
        let storage = base()
            .with_file("app/_data/docs_nav_broken.yml", "product: [unclosed\n")
            .with_file("app/_data/docs_nav_list.yml", "- just\n- a list\n")
            .with_file("app/_data/docs_nav_no_product.yml", "generate: true\n")
            .with_file(
                "app/_data/docs_nav_ok.yml",
                "product: gateway\nrelease: \"3.0\"\ngenerate: true\nitems:\n  - url: /install/\n",
            );

        let (report, pages) = run(storage).unwrap();

        assert_eq!(report.documents_skipped, 3);
        assert_eq!(report.documents_not_generated, 0);
        assert_eq!(report.documents_processed, 1);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_run_ignores_files_outside_glob() {
        let storage = base().with_file(
            "app/_data/other_gateway.yml",
            "product: gateway\nrelease: \"3.0\"\ngenerate: true\nitems:\n  - url: /install/\n",
        );

        let (report, pages) = run(storage).unwrap();

        assert_eq!(report, GenerationReport::default());
        assert!(pages.is_empty());
    }

    #[test]
    fn test_run_version_not_found_aborts() {
        let storage = base().with_file(
            "app/_data/docs_nav_mesh.yml",
            "product: mesh\nrelease: \"1.0\"\ngenerate: true\nitems:\n  - url: /mesh/\n",
        );

        let err = run(storage).unwrap_err();

        assert!(err.to_string().starts_with("app/_data/docs_nav_mesh.yml: "));
        assert!(matches!(
            err.root_cause(),
            GenerateError::VersionNotFound { edition, release }
                if edition == "mesh" && release == "1.0"
        ));
    }

    #[test]
    fn test_run_missing_source_aborts() {
        let storage = base().with_file(
            "app/_data/docs_nav_gateway.yml",
            "product: gateway\nrelease: \"3.0\"\ngenerate: true\nitems:\n  - url: /nowhere/\n",
        );

        let err = run(storage).unwrap_err();

        assert!(matches!(
            err.root_cause(),
            GenerateError::SourceNotFound { .. }
        ));
    }

    #[test]
    fn test_run_missing_registry_is_fatal() {
        let storage = MockStorage::new();

        let err = run(storage).unwrap_err();

        assert!(matches!(err, GenerateError::RegistryRead { .. }));
    }

    #[test]
    fn test_run_invalid_registry_is_fatal() {
        let storage = MockStorage::new().with_file("app/_data/kong_versions.yml", "edition: ce\n");

        let err = run(storage).unwrap_err();

        assert!(matches!(err, GenerateError::RegistryParse { .. }));
    }

    #[test]
    fn test_run_document_without_items() {
        let storage = base().with_file(
            "app/_data/docs_nav_empty.yml",
            "product: gateway\nrelease: \"3.0\"\ngenerate: true\n",
        );

        let (report, pages) = run(storage).unwrap();

        assert_eq!(report.documents_processed, 1);
        assert!(pages.is_empty());
    }

    #[test]
    fn test_run_strict_policy() {
        let storage = base().with_file(
            "app/_data/docs_nav_gateway.yml",
            "product: gateway\nrelease: \"3.0\"\ngenerate: true\nitems:\n  - url: /gateway/\n  - url: /install/\n    generate: false\n",
        );
        let config = GeneratorConfig {
            policy: EligibilityPolicy::Strict,
            ..GeneratorConfig::default()
        };
        let generator = Generator::new(Arc::new(storage), config);

        let mut pages = Vec::new();
        generator.run(&mut pages).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].output_dir, "gateway/3.0/");
    }

    struct RejectingSink;

    impl PageSink for RejectingSink {
        fn register(&mut self, _page: GeneratedPage) -> Result<(), SinkError> {
            Err("disk full".into())
        }
    }

    #[test]
    fn test_run_sink_error_aborts() {
        let storage = base().with_file(
            "app/_data/docs_nav_gateway.yml",
            "product: gateway\nrelease: \"3.0\"\ngenerate: true\nitems:\n  - url: /gateway/\n",
        );

        let err = generator(storage).run(&mut RejectingSink).unwrap_err();

        assert!(matches!(
            err.root_cause(),
            GenerateError::Sink { output_dir, .. } if output_dir == "gateway/3.0/"
        ));
        assert!(err.to_string().contains("disk full"));
    }
}
