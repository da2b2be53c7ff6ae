//! Loading of operator settings and resource manifests.
//!
//! Settings come from a YAML file with environment variable overrides;
//! `Database` and `Table` manifests are read from YAML files or strings.

use crate::error::{ConfigError, Result, SchemaHeroError};
use crate::resources::{Database, Table};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

use super::settings::PlannerConfig;

/// Parser for settings files and resource manifests.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving relative paths.
    base_path: Option<std::path::PathBuf>,
}

impl ConfigParser {
    /// Creates a new parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads planner settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_settings(&self, path: impl AsRef<Path>) -> Result<PlannerConfig> {
        let path = self.resolve(path.as_ref());
        info!("Loading settings from: {}", path.display());
        let content = read_file(&path, "settings")?;
        parse_document(&content, "settings", Some(&path))
    }

    /// Loads planner settings and applies environment overrides.
    ///
    /// Recognized variables are `SCHEMAHERO_IMAGE`,
    /// `SCHEMAHERO_IMAGE_PULL_POLICY` and `SCHEMAHERO_SERVICE_ACCOUNT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an
    /// override holds an invalid value.
    pub fn load_settings_with_env(&self, path: Option<&Path>) -> Result<PlannerConfig> {
        let mut config = match path {
            Some(path) => self.load_settings(path)?,
            None => {
                debug!("No settings file given, using defaults");
                PlannerConfig::default()
            }
        };

        Self::apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Parses planner settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_settings(&self, content: &str) -> Result<PlannerConfig> {
        parse_document(content, "settings", None)
    }

    /// Loads a `Database` manifest from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_database(&self, path: impl AsRef<Path>) -> Result<Database> {
        let path = self.resolve(path.as_ref());
        let content = read_file(&path, "database")?;
        let database: Database = parse_document(&content, "database", Some(&path))?;
        debug!("Loaded database manifest: {}", database.metadata.name);
        Ok(database)
    }

    /// Parses a `Database` manifest from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_database(&self, content: &str) -> Result<Database> {
        parse_document(content, "database", None)
    }

    /// Loads a `Table` manifest from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_table(&self, path: impl AsRef<Path>) -> Result<Table> {
        let path = self.resolve(path.as_ref());
        let content = read_file(&path, "table")?;
        let table: Table = parse_document(&content, "table", Some(&path))?;
        debug!("Loaded table manifest: {}", table.metadata.name);
        Ok(table)
    }

    /// Parses a `Table` manifest from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_table(&self, content: &str) -> Result<Table> {
        parse_document(content, "table", None)
    }

    /// Applies environment variable overrides to the settings.
    fn apply_env_overrides(config: &mut PlannerConfig) -> Result<()> {
        if let Ok(image) = std::env::var("SCHEMAHERO_IMAGE") {
            debug!("Overriding image from environment");
            config.image = image;
        }

        if let Ok(policy) = std::env::var("SCHEMAHERO_IMAGE_PULL_POLICY") {
            debug!("Overriding image_pull_policy from environment");
            config.image_pull_policy = policy.parse().map_err(|message: String| {
                SchemaHeroError::Config(ConfigError::validation(
                    message,
                    "SCHEMAHERO_IMAGE_PULL_POLICY",
                ))
            })?;
        }

        if let Ok(account) = std::env::var("SCHEMAHERO_SERVICE_ACCOUNT") {
            debug!("Overriding service_account from environment");
            config.service_account = Some(account);
        }

        Ok(())
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| std::path::PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                SchemaHeroError::Config(ConfigError::ParseError {
                    what: "environment",
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }

    fn resolve(&self, path: &Path) -> std::path::PathBuf {
        match &self.base_path {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Default settings file names to search for.
pub const DEFAULT_SETTINGS_FILES: &[&str] = &["schemahero-plan.yaml", "schemahero-plan.yml"];

/// Finds the settings file in the given directory or its parents.
///
/// Returns `None` when no settings file exists; defaults apply in that case.
#[must_use]
pub fn find_settings_file(start_dir: impl AsRef<Path>) -> Option<std::path::PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_SETTINGS_FILES {
            let candidate = current.join(filename);
            if candidate.exists() {
                info!("Found settings file: {}", candidate.display());
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn read_file(path: &Path, what: &'static str) -> Result<String> {
    if !path.exists() {
        return Err(SchemaHeroError::Config(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        }));
    }

    std::fs::read_to_string(path).map_err(|e| {
        SchemaHeroError::Config(ConfigError::ParseError {
            what,
            message: format!("Failed to read file: {e}"),
            location: Some(path.display().to_string()),
        })
    })
}

fn parse_document<T: DeserializeOwned>(
    content: &str,
    what: &'static str,
    source: Option<&Path>,
) -> Result<T> {
    serde_yaml::from_str(content).map_err(|e| {
        SchemaHeroError::Config(ConfigError::ParseError {
            what,
            message: format!("YAML parse error: {e}"),
            location: source.map(|p| p.display().to_string()),
        })
    })
}
