//! Configuration management for excel-scaffold
//!
//! Configuration is layered with `figment`, from lowest to highest priority:
//!
//! 1. Hardcoded defaults (Laravel's conventional layout)
//! 2. `<root>/excel-scaffold.toml`
//! 3. An explicit file passed with `--config`
//! 4. Environment variables (`EXCEL_SCAFFOLD_` prefix, `__` between sections)
//!
//! # Example Configuration
//!
//! ```toml
//! # excel-scaffold.toml
//! [paths]
//! migrations_dir = "database/migrations"
//! web_routes = "routes/web.php"
//!
//! [namespaces]
//! models = "App\\Models"
//!
//! [generation]
//! timestamp_base = "2024_01_01_000000"
//! overwrite_requests = false
//! ```
//!
//! The same keys can be set from the environment, for example
//! `EXCEL_SCAFFOLD_PATHS__MODELS_DIR=src/Models`.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};

/// Name of the project-level configuration file
pub const CONFIG_FILE_NAME: &str = "excel-scaffold.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "EXCEL_SCAFFOLD_";

/// Output and input locations, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory receiving migration files
    pub migrations_dir: PathBuf,

    /// Directory receiving model classes
    pub models_dir: PathBuf,

    /// Base directory for controllers
    pub controllers_dir: PathBuf,

    /// Directory receiving form requests
    pub requests_dir: PathBuf,

    /// Route file used for API-mode directives
    pub api_routes: PathBuf,

    /// Route file used for web directives
    pub web_routes: PathBuf,

    /// Default schema spreadsheet
    pub schema_sheet: PathBuf,

    /// Controller-directive spreadsheet, written by the schema pass and
    /// read by the controller pass
    pub directive_sheet: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            migrations_dir: PathBuf::from("database/migrations"),
            models_dir: PathBuf::from("app/Models"),
            controllers_dir: PathBuf::from("app/Http/Controllers"),
            requests_dir: PathBuf::from("app/Http/Requests"),
            api_routes: PathBuf::from("routes/api.php"),
            web_routes: PathBuf::from("routes/web.php"),
            schema_sheet: PathBuf::from("storage/spreadsheets/migration_data.xlsx"),
            directive_sheet: PathBuf::from("storage/spreadsheets/controller_generator.xlsx"),
        }
    }
}

/// PHP namespaces of generated classes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceSettings {
    /// Namespace of model classes
    pub models: String,

    /// Base namespace of controllers
    pub controllers: String,

    /// Namespace of form requests
    pub requests: String,
}

impl Default for NamespaceSettings {
    fn default() -> Self {
        Self {
            models: "App\\Models".to_string(),
            controllers: "App\\Http\\Controllers".to_string(),
            requests: "App\\Http\\Requests".to_string(),
        }
    }
}

/// Generation behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Fixed first migration timestamp (`YYYY_MM_DD_HHMMSS`); the local
    /// clock is used when unset
    pub timestamp_base: Option<String>,

    /// Rewrite form requests that already exist
    pub overwrite_requests: bool,
}

/// Complete excel-scaffold configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScaffoldConfig {
    /// Project root every relative path resolves against
    #[serde(skip)]
    pub project_root: PathBuf,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathSettings,

    /// PHP namespaces
    #[serde(default)]
    pub namespaces: NamespaceSettings,

    /// Generation behaviour
    #[serde(default)]
    pub generation: GenerationSettings,
}

impl ScaffoldConfig {
    /// Load configuration for a project root
    ///
    /// # Errors
    ///
    /// Returns an error if `explicit` points at a missing file or any layer
    /// fails to deserialize.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(project_root.join(CONFIG_FILE_NAME)));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ScaffoldError::ConfigNotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        let mut config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;
        config.project_root = project_root.to_path_buf();

        tracing::debug!(root = %project_root.display(), "configuration loaded");
        Ok(config)
    }

    /// Defaults rooted at `project_root`, without reading files or environment
    #[must_use]
    pub fn for_root(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    /// Resolve a project-relative path
    #[must_use]
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.project_root.join(relative)
    }

    /// Default schema spreadsheet location
    #[must_use]
    pub fn schema_sheet(&self) -> PathBuf {
        self.resolve(&self.paths.schema_sheet)
    }

    /// Controller-directive spreadsheet location
    #[must_use]
    pub fn directive_sheet(&self) -> PathBuf {
        self.resolve(&self.paths.directive_sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_paths() {
        let paths = PathSettings::default();
        assert_eq!(paths.migrations_dir, PathBuf::from("database/migrations"));
        assert_eq!(paths.models_dir, PathBuf::from("app/Models"));
        assert_eq!(paths.api_routes, PathBuf::from("routes/api.php"));
        assert_eq!(
            paths.directive_sheet,
            PathBuf::from("storage/spreadsheets/controller_generator.xlsx")
        );
    }

    #[test]
    fn test_default_namespaces() {
        let namespaces = NamespaceSettings::default();
        assert_eq!(namespaces.models, "App\\Models");
        assert_eq!(namespaces.controllers, "App\\Http\\Controllers");
        assert_eq!(namespaces.requests, "App\\Http\\Requests");
    }

    #[test]
    fn test_load_project_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[paths]\nmodels_dir = \"src/Models\"\n\n[generation]\ntimestamp_base = \"2024_01_01_000000\"\n",
        )
        .unwrap();

        let config = ScaffoldConfig::load(dir.path(), None).unwrap();
        assert_eq!(config.paths.models_dir, PathBuf::from("src/Models"));
        assert_eq!(config.paths.web_routes, PathBuf::from("routes/web.php"));
        assert_eq!(
            config.generation.timestamp_base.as_deref(),
            Some("2024_01_01_000000")
        );
        assert_eq!(config.project_root, dir.path());
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[generation]\noverwrite_requests = false\n",
        )
        .unwrap();
        let explicit = dir.path().join("ci.toml");
        fs::write(&explicit, "[generation]\noverwrite_requests = true\n").unwrap();

        let config = ScaffoldConfig::load(dir.path(), Some(&explicit)).unwrap();
        assert!(config.generation.overwrite_requests);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let result = ScaffoldConfig::load(dir.path(), Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ScaffoldError::ConfigNotFound(_))));
    }

    #[test]
    fn test_resolve_against_root() {
        let config = ScaffoldConfig::for_root("/srv/app");
        assert_eq!(
            config.schema_sheet(),
            PathBuf::from("/srv/app/storage/spreadsheets/migration_data.xlsx")
        );
    }
}
