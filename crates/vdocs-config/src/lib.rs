//! Configuration management for vdocs.
//!
//! Parses `vdocs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Project-relative paths
//!
//! Source and data locations are kept as project-relative strings because
//! they are read through the storage layer (rooted at the project directory)
//! and appear verbatim in generated `edit_link` metadata. Only the output
//! directory is resolved to a filesystem path.
//!
//! ## Environment Variable Expansion
//!
//! Every `[paths]` value supports `${VAR}` and `${VAR:-default}`.

mod expand;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override source tree directory (project-relative).
    pub source_dir: Option<String>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override strict `generate` handling.
    pub strict_generate: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vdocs.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path configuration (raw strings from TOML).
    paths: PathsConfigRaw,
    /// Page generation configuration.
    pub pages: PagesConfig,

    /// Resolved path configuration (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Directory containing the config file.
///
/// A bare file name (`vdocs.toml`) has an empty parent, which means the
/// current directory.
fn config_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw path configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsConfigRaw {
    source_dir: Option<String>,
    data_dir: Option<String>,
    versions_file: Option<String>,
    nav_pattern: Option<String>,
    output_dir: Option<String>,
}

/// Resolved path configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Project root; all project-relative paths are read from here.
    pub project_dir: PathBuf,
    /// Source tree holding markdown documents (project-relative).
    pub source_dir: String,
    /// Version registry file (project-relative).
    pub versions_file: String,
    /// Glob matching navigation documents (project-relative).
    pub nav_glob: String,
    /// Directory generated pages are written to.
    pub output_dir: PathBuf,
}

/// Page generation configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PagesConfig {
    /// Layout stamped on pages that don't declare one.
    pub layout: String,
    /// When true, an explicit `generate: false` on a navigation entry
    /// suppresses it even in documents that assume generation.
    pub strict_generate: bool,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            layout: "docs-v2".to_owned(),
            strict_generate: false,
        }
    }
}

const DEFAULT_SOURCE_DIR: &str = "src";
const DEFAULT_DATA_DIR: &str = "app/_data";
const DEFAULT_VERSIONS_FILE: &str = "kong_versions.yml";
const DEFAULT_NAV_PATTERN: &str = "docs_nav_*.yml";
const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`paths.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a project-relative path that stays inside the project directory.
fn require_project_relative(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    let escapes = Path::new(value)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(ConfigError::Validation(format!(
            "{field} must be a relative path inside the project directory"
        )));
    }
    Ok(())
}

/// Join two project-relative path fragments with a single `/`.
fn join_relative(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        name.to_owned()
    } else {
        format!("{dir}/{name}")
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `vdocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.paths_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths_resolved.output_dir = self.paths_resolved.project_dir.join(output_dir);
        }
        if let Some(strict) = settings.strict_generate {
            self.pages.strict_generate = strict;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config rooted at the current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config rooted at the given project directory.
    fn default_with_base(base: &Path) -> Self {
        let data_dir = DEFAULT_DATA_DIR;
        Self {
            paths: PathsConfigRaw::default(),
            pages: PagesConfig::default(),
            paths_resolved: PathsConfig {
                project_dir: base.to_path_buf(),
                source_dir: DEFAULT_SOURCE_DIR.to_owned(),
                versions_file: join_relative(data_dir, DEFAULT_VERSIONS_FILE),
                nav_glob: join_relative(data_dir, DEFAULT_NAV_PATTERN),
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        config.resolve_paths(config_dir(path));
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = &self.paths_resolved;
        require_project_relative(&paths.source_dir, "paths.source_dir")?;
        require_project_relative(&paths.versions_file, "paths.versions_file")?;
        require_project_relative(&paths.nav_glob, "paths.nav_pattern")?;
        glob::Pattern::new(&paths.nav_glob).map_err(|e| {
            ConfigError::Validation(format!("paths.nav_pattern is not a valid glob: {e}"))
        })?;
        require_non_empty(&self.pages.layout, "pages.layout")?;
        Ok(())
    }

    /// Expand environment variable references in path strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let paths = &mut self.paths;
        for (value, field) in [
            (&mut paths.source_dir, "paths.source_dir"),
            (&mut paths.data_dir, "paths.data_dir"),
            (&mut paths.versions_file, "paths.versions_file"),
            (&mut paths.nav_pattern, "paths.nav_pattern"),
            (&mut paths.output_dir, "paths.output_dir"),
        ] {
            if let Some(raw) = value {
                *raw = expand::expand_env(raw, field)?;
            }
        }
        Ok(())
    }

    /// Resolve raw path strings against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let raw = &self.paths;
        let data_dir = raw.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR);

        self.paths_resolved = PathsConfig {
            project_dir: config_dir.to_path_buf(),
            source_dir: raw
                .source_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_SOURCE_DIR.to_owned()),
            versions_file: join_relative(
                data_dir,
                raw.versions_file.as_deref().unwrap_or(DEFAULT_VERSIONS_FILE),
            ),
            nav_glob: join_relative(
                data_dir,
                raw.nav_pattern.as_deref().unwrap_or(DEFAULT_NAV_PATTERN),
            ),
            output_dir: config_dir.join(raw.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)),
        };
    }
}
