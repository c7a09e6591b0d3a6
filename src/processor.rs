//! Tree walk that turns an unpacked template into a [`Manifest`].

use crate::classifier::{Classification, Classifier};
use crate::config::TemplateConfig;
use crate::constants::NO_PORT;
use crate::error::{Error, Result};
use crate::manifest::{Manifest, ManifestBuilder, MaterializedFile};
use crate::renamer::PathRenamer;
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Per-project values substituted into paths and templates.
///
/// Exposed to templates as `Name` and `Port`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateParameters {
    pub name: String,
    /// [`NO_PORT`] for templates without a listening port
    pub port: i64,
}

impl TemplateParameters {
    /// # Errors
    /// * `Error::InvalidParameters` if `name` is empty
    pub fn new(name: impl Into<String>, port: i64) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidParameters(
                "project name must not be empty".to_string(),
            ));
        }
        Ok(Self { name, port })
    }

    /// Parameters for a template that has no port.
    pub fn without_port(name: impl Into<String>) -> Result<Self> {
        Self::new(name, NO_PORT)
    }
}

/// Converts a path relative to the template root into a `/`-separated string.
fn relative_path(root: &Path, path: &Path) -> Result<String> {
    let invalid = || Error::InvalidPath {
        path: path.display().to_string(),
    };
    let relative = path.strip_prefix(root).map_err(|_| invalid())?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str().ok_or_else(&invalid))
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}

/// Drives renaming, classification and rendering over an unpacked tree.
pub struct Materializer<'a> {
    renderer: &'a dyn TemplateRenderer,
    classifier: Classifier,
    parameters: &'a TemplateParameters,
    renamer: PathRenamer,
}

impl<'a> Materializer<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        config: &TemplateConfig,
        parameters: &'a TemplateParameters,
    ) -> Self {
        Self {
            renderer,
            classifier: Classifier::new(config),
            parameters,
            renamer: PathRenamer::new(parameters),
        }
    }

    /// Builds the manifest entry for one regular file.
    ///
    /// `repository_path` is the already renamed path; `source` is the file
    /// on disk.
    pub fn process_file(&self, source: &Path, repository_path: String) -> Result<MaterializedFile> {
        let bytes = fs::read(source).map_err(|e| Error::ReadError {
            path: source.display().to_string(),
            source: e,
        })?;

        let file = match self.classifier.classify(&repository_path) {
            Classification::Base64 => MaterializedFile::base64(repository_path, &bytes),
            Classification::Template => {
                let content = String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
                    path: repository_path.clone(),
                })?;
                let rendered = self
                    .renderer
                    .render(&content, self.parameters)
                    .map_err(|e| Error::RenderError {
                        path: repository_path.clone(),
                        source: e,
                    })?;
                MaterializedFile::text(repository_path, rendered)
            }
            Classification::Text => match String::from_utf8(bytes) {
                Ok(content) => MaterializedFile::text(repository_path, content),
                Err(e) => {
                    warn!("'{repository_path}' is not valid UTF-8, storing it as base64");
                    MaterializedFile::base64(repository_path, e.as_bytes())
                }
            },
        };
        Ok(file)
    }

    /// Walks every entry below `root` and returns the complete manifest.
    ///
    /// Directories and symlinks contribute nothing. The first failing file
    /// aborts the walk and no manifest is returned.
    pub fn materialize<P: AsRef<Path>>(&self, root: P) -> Result<Manifest> {
        let root = root.as_ref();
        let mut builder = ManifestBuilder::new();

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::ReadError {
                path: e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = relative_path(root, entry.path())?;
            let repository_path = self.renamer.rename(&relative);
            debug!("Processing '{relative}' as '{repository_path}'");

            builder.insert(self.process_file(entry.path(), repository_path)?)?;
        }

        Ok(builder.finish())
    }
}

/// Materializes the tree below `root` with the default renderer.
pub fn materialize<P: AsRef<Path>>(
    root: P,
    parameters: &TemplateParameters,
    config: &TemplateConfig,
) -> Result<Manifest> {
    let renderer = MiniJinjaRenderer::new()?;
    Materializer::new(&renderer, config, parameters).materialize(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let root = PathBuf::from("/tmp/root");
        let path = root.join("src").join("main.go");
        assert_eq!(relative_path(&root, &path).unwrap(), "src/main.go");
    }

    #[test]
    fn test_relative_path_outside_root() {
        let result = relative_path(Path::new("/a"), Path::new("/b/c"));
        assert!(matches!(
            result,
            Err(Error::InvalidPath { path }) if path == "/b/c"
        ));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(matches!(
            TemplateParameters::new("", 80),
            Err(Error::InvalidParameters(_))
        ));
    }
}
