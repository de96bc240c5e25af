//! Configuration management for tidy.
//!
//! Parses `tidy.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [convert]
//! stylesheet = "../style.css"
//! page_extension = "html"
//! dry_run = false
//! ```
//!
//! `convert.stylesheet` supports `${VAR}` and `${VAR:-default}` expansion.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tidy.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override stylesheet href.
    pub stylesheet: Option<String>,
    /// Override page extension.
    pub page_extension: Option<String>,
    /// Override dry-run flag.
    pub dry_run: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion settings.
    pub convert: ConvertConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[convert]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// `href` written in place of each page's style block.
    pub stylesheet: Option<String>,
    /// Extension of exported pages, without the leading dot.
    pub page_extension: String,
    /// Report renames without changing anything.
    pub dry_run: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            stylesheet: None,
            page_extension: "html".to_owned(),
            dry_run: false,
        }
    }
}

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
        /// Config field path (e.g., "`convert.stylesheet`").
        field: String,
        /// Error message (e.g., "${`CSS_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tidy.toml` in current directory and parents,
    /// falling back to defaults.
    ///
    /// CLI settings are applied after loading and take precedence over file
    /// values. The merged result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Stylesheet href, required for a conversion run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if neither the config file nor the
    /// CLI supplied one.
    pub fn require_stylesheet(&self) -> Result<&str, ConfigError> {
        self.convert.stylesheet.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "no stylesheet given: pass STYLESHEET or set convert.stylesheet".to_owned(),
            )
        })
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(stylesheet) = &settings.stylesheet {
            self.convert.stylesheet = Some(stylesheet.clone());
        }
        if let Some(page_extension) = &settings.page_extension {
            self.convert.page_extension.clone_from(page_extension);
        }
        if let Some(dry_run) = settings.dry_run {
            self.convert.dry_run = dry_run;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_paths()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ext = &self.convert.page_extension;
        if ext.is_empty() {
            return Err(ConfigError::Validation(
                "convert.page_extension cannot be empty".to_owned(),
            ));
        }
        if ext.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "convert.page_extension must not start with '.', use \"{}\"",
                ext.trim_start_matches('.')
            )));
        }

        if self.convert.stylesheet.as_deref() == Some("") {
            return Err(ConfigError::Validation(
                "convert.stylesheet cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand `~` and environment variable references in the stylesheet.
    fn expand_paths(&mut self) -> Result<(), ConfigError> {
        if let Some(ref stylesheet) = self.convert.stylesheet {
            self.convert.stylesheet = Some(expand::expand_path(stylesheet, "convert.stylesheet")?);
        }
        Ok(())
    }
}
