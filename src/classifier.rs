//! Per-file encoding decision.

use crate::config::TemplateConfig;
use indexmap::IndexSet;
use log::warn;

/// How a file's bytes end up in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Passed through as UTF-8 text
    Text,
    /// Rendered through the content renderer
    Template,
    /// Stored as base64, never rendered
    Base64,
}

/// Classifies files by extension and base name.
///
/// Precedence: base64 extensions, then template extensions or template file
/// names, then plain text.
#[derive(Debug, Clone)]
pub struct Classifier {
    template_extensions: IndexSet<String>,
    base64_extensions: IndexSet<String>,
    template_files: IndexSet<String>,
}

/// Returns the lower-cased extension of the last path segment, dot included.
///
/// Dotfiles such as `.gitignore` are their own extension.
pub fn extension_of(path: &str) -> Option<String> {
    let file_name = file_name_of(path);
    file_name
        .rfind('.')
        .map(|idx| file_name[idx..].to_lowercase())
}

fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

impl Classifier {
    pub fn new(config: &TemplateConfig) -> Self {
        let config = config.clone().normalized();
        for ext in config.ambiguous_extensions() {
            warn!("Extension '{ext}' is both a template and a base64 extension, using base64");
        }
        Self {
            template_extensions: config.extensions,
            base64_extensions: config.base64_extensions,
            template_files: config.files,
        }
    }

    /// Classifies a `/`-separated path.
    pub fn classify(&self, path: &str) -> Classification {
        let ext = extension_of(path);
        if let Some(ext) = &ext {
            if self.base64_extensions.contains(ext) {
                return Classification::Base64;
            }
            if self.template_extensions.contains(ext) {
                return Classification::Template;
            }
        }
        if self.template_files.contains(file_name_of(path)) {
            return Classification::Template;
        }
        Classification::Text
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&TemplateConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("src/main.GO").as_deref(), Some(".go"));
        assert_eq!(extension_of("a.b/Makefile"), None);
        assert_eq!(extension_of(".gitignore").as_deref(), Some(".gitignore"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some(".gz"));
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of("deploy/Dockerfile"), "Dockerfile");
        assert_eq!(file_name_of("Dockerfile"), "Dockerfile");
    }
}
