//! Configuration management for vmarkdown.
//!
//! Parses `vmarkdown.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! css = ["style.css"]
//! templates = ["page.html"]
//! toc_max_level = 6
//! embed_images = false
//! ```
//!
//! Relative paths resolve against the directory holding the config file.
//! Path entries support `${VAR}` and `${VAR:-default}` expansion.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliSettings {
    /// Override style sheets.
    pub css: Option<Vec<PathBuf>>,
    /// Override templates.
    pub templates: Option<Vec<PathBuf>>,
    /// Override table of contents depth.
    pub toc_max_level: Option<u8>,
    /// Override image embedding.
    pub embed_images: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vmarkdown.toml";

/// Deepest heading level a table of contents can hold.
const MAX_TOC_LEVEL: u8 = 6;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render configuration (paths are relative strings from TOML).
    render: RenderConfigRaw,

    /// Resolved render configuration (set after loading).
    #[serde(skip)]
    pub render_resolved: RenderConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw render configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RenderConfigRaw {
    css: Option<Vec<String>>,
    templates: Option<Vec<String>>,
    toc_max_level: Option<u8>,
    embed_images: Option<bool>,
}

/// Resolved render configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Style sheets, concatenated in order.
    pub css: Vec<PathBuf>,
    /// Templates with a `{body}` placeholder, applied in order.
    pub templates: Vec<PathBuf>,
    /// Deepest heading level listed in the table of contents.
    pub toc_max_level: u8,
    /// Whether images are inlined as data URIs.
    pub embed_images: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            css: Vec::new(),
            templates: Vec::new(),
            toc_max_level: MAX_TOC_LEVEL,
            embed_images: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
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
        /// Config field path (e.g., "`render.css`").
        field: String,
        /// Error message (e.g., "${`THEME_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `vmarkdown.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(css) = &settings.css {
            self.render_resolved.css.clone_from(css);
        }
        if let Some(templates) = &settings.templates {
            self.render_resolved.templates.clone_from(templates);
        }
        if let Some(toc_max_level) = settings.toc_max_level {
            self.render_resolved.toc_max_level = toc_max_level;
        }
        if let Some(embed_images) = settings.embed_images {
            self.render_resolved.embed_images = embed_images;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(current)
    }

    fn discover_config_from(mut current: PathBuf) -> Option<PathBuf> {
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.render_resolved.toc_max_level;
        if level == 0 || level > MAX_TOC_LEVEL {
            return Err(ConfigError::Validation(format!(
                "render.toc_max_level must be between 1 and {MAX_TOC_LEVEL}, got {level}"
            )));
        }
        Ok(())
    }

    /// Expand environment variables and resolve relative paths against the
    /// config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |paths: Option<&Vec<String>>, field: &str| -> Result<Vec<PathBuf>, ConfigError> {
            paths
                .into_iter()
                .flatten()
                .map(|p| expand::expand_env(p, field).map(|p| config_dir.join(p)))
                .collect()
        };

        self.render_resolved = RenderConfig {
            css: resolve(self.render.css.as_ref(), "render.css")?,
            templates: resolve(self.render.templates.as_ref(), "render.templates")?,
            toc_max_level: self.render.toc_max_level.unwrap_or(MAX_TOC_LEVEL),
            embed_images: self.render.embed_images.unwrap_or(false),
        };

        Ok(())
    }
}
