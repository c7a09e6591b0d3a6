//! The materialized file set and its commit payload.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Encoding tag understood by the repository host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Text,
    Base64,
}

/// One file of the generated repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedFile {
    /// `/`-separated path inside the destination repository
    pub repository_path: String,
    /// Text content, or base64 text when `encoding` is [`Encoding::Base64`]
    pub content: String,
    pub encoding: Encoding,
}

impl MaterializedFile {
    pub fn text(repository_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            repository_path: repository_path.into(),
            content: content.into(),
            encoding: Encoding::Text,
        }
    }

    pub fn base64(repository_path: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            repository_path: repository_path.into(),
            content: BASE64.encode(bytes),
            encoding: Encoding::Base64,
        }
    }

    /// Returns the raw bytes this file stands for.
    pub fn decoded(&self) -> Result<Vec<u8>> {
        match self.encoding {
            Encoding::Text => Ok(self.content.clone().into_bytes()),
            Encoding::Base64 => BASE64
                .decode(&self.content)
                .map_err(|source| Error::DecodeError {
                    path: self.repository_path.clone(),
                    source,
                }),
        }
    }
}

/// Action of a commit entry. Materialization only ever creates files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
}

/// A single file operation of a batched commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAction {
    pub action: Action,
    pub file_path: String,
    pub content: String,
    pub encoding: Encoding,
}

/// A batched, atomic commit against one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRequest {
    pub branch: String,
    pub commit_message: String,
    pub actions: Vec<CommitAction>,
}

/// Mapping from repository path to materialized file.
///
/// Only built through [`ManifestBuilder`]; read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    files: BTreeMap<String, MaterializedFile>,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, repository_path: &str) -> Option<&MaterializedFile> {
        self.files.get(repository_path)
    }

    /// Iterates files in repository path order.
    pub fn iter(&self) -> impl Iterator<Item = &MaterializedFile> {
        self.files.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Converts the manifest into `create` actions, sorted by path.
    pub fn into_commit_actions(self) -> Vec<CommitAction> {
        self.files
            .into_values()
            .map(|file| CommitAction {
                action: Action::Create,
                file_path: file.repository_path,
                content: file.content,
                encoding: file.encoding,
            })
            .collect()
    }

    /// Wraps the manifest in a single commit against `branch`.
    pub fn into_commit_request(
        self,
        branch: impl Into<String>,
        commit_message: impl Into<String>,
    ) -> CommitRequest {
        CommitRequest {
            branch: branch.into(),
            commit_message: commit_message.into(),
            actions: self.into_commit_actions(),
        }
    }

    /// Writes every file below `dir`, decoding base64 content to bytes.
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        for file in self.iter() {
            let target = dir.join(&file.repository_path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, file.decoded()?)?;
        }
        Ok(())
    }
}

impl IntoIterator for Manifest {
    type Item = MaterializedFile;
    type IntoIter = std::collections::btree_map::IntoValues<String, MaterializedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_values()
    }
}

/// Accumulates files during a walk and hands out the manifest only when the
/// walk completed.
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    files: BTreeMap<String, MaterializedFile>,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    ///
    /// # Errors
    /// * `Error::PathCollision` if a file with the same repository path was
    ///   already added
    pub fn insert(&mut self, file: MaterializedFile) -> Result<()> {
        if self.files.contains_key(&file.repository_path) {
            return Err(Error::PathCollision {
                path: file.repository_path,
            });
        }
        self.files.insert(file.repository_path.clone(), file);
        Ok(())
    }

    pub fn finish(self) -> Manifest {
        Manifest { files: self.files }
    }
}
