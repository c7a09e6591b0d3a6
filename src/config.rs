//! Configuration handling for glfast.
//! This module loads the extension and filename sets that drive the encoding
//! classifier. Configuration is always an explicit value passed to the
//! engine; nothing is read from global state.

use crate::constants::{
    CONFIG_FILES, DEFAULT_BASE64_EXTENSIONS, DEFAULT_TEMPLATE_EXTENSIONS, DEFAULT_TEMPLATE_FILES,
    DEFAULT_TEMPLATE_GROUP,
};
use crate::error::{Error, Result};
use indexmap::IndexSet;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub template: TemplateConfig,
}

/// Settings for template discovery and per-file classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Group on the repository host holding the template projects
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Extensions whose files are rendered as templates
    #[serde(default = "default_extensions")]
    pub extensions: IndexSet<String>,

    /// Extensions whose files are stored as base64
    #[serde(default = "default_base64_extensions")]
    pub base64_extensions: IndexSet<String>,

    /// File names rendered as templates regardless of extension
    #[serde(default = "default_files")]
    pub files: IndexSet<String>,
}

fn default_namespace() -> String {
    DEFAULT_TEMPLATE_GROUP.to_string()
}

fn default_extensions() -> IndexSet<String> {
    DEFAULT_TEMPLATE_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_base64_extensions() -> IndexSet<String> {
    DEFAULT_BASE64_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_files() -> IndexSet<String> {
    DEFAULT_TEMPLATE_FILES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            extensions: default_extensions(),
            base64_extensions: default_base64_extensions(),
            files: default_files(),
        }
    }
}

/// Lower-cases an extension and makes sure it starts with a dot.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

impl TemplateConfig {
    /// Returns a copy with every extension normalized.
    pub fn normalized(mut self) -> Self {
        self.extensions = self
            .extensions
            .iter()
            .map(|e| normalize_extension(e))
            .collect();
        self.base64_extensions = self
            .base64_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .collect();
        self
    }

    /// Extensions listed both as template and as base64 extensions.
    ///
    /// Such files classify as base64; callers may surface this as a warning.
    pub fn ambiguous_extensions(&self) -> Vec<&str> {
        self.base64_extensions
            .iter()
            .filter(|ext| self.extensions.contains(*ext))
            .map(String::as_str)
            .collect()
    }
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = match serde_json::from_str(content) {
        Ok(config) => config,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))?,
    };
    Ok(Config {
        template: config.template.normalized(),
    })
}

/// Loads configuration from an explicit path.
///
/// # Errors
/// * `Error::ConfigError` if the file does not exist or cannot be parsed
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigError(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Resolves the configuration to use.
///
/// An explicit path must exist. Without one, the first of [`CONFIG_FILES`]
/// found in `search_dir` is loaded, and the defaults apply when none exists.
pub fn get_config<P: AsRef<Path>>(explicit: Option<&Path>, search_dir: P) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    for file in CONFIG_FILES {
        let candidate = search_dir.as_ref().join(file);
        if candidate.is_file() {
            return load_config(candidate);
        }
    }
    let tried = CONFIG_FILES.join(", ");
    debug!("No configuration file found (tried: {tried}), using defaults");
    Ok(Config::default())
}
