//! Unpacking of gzip-compressed tar archives.
//!
//! Archives come from an untrusted source, so every entry path is checked
//! before anything touches the disk: `..`, absolute paths and drive
//! prefixes are rejected outright.

use crate::constants::PAX_GLOBAL_HEADER;
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use log::{debug, warn};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use tar::{Archive, EntryType};

/// One directory or regular file read from the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Sanitized, `/`-separated path including the root segment
    pub path: String,
    pub is_directory: bool,
    /// Permission bits
    pub mode: u32,
    /// File content, empty for directories
    pub content: Vec<u8>,
}

fn extraction_error(e: io::Error) -> Error {
    Error::ExtractionError(e.to_string())
}

/// Normalizes an entry path, rejecting anything that could escape the
/// destination directory.
///
/// Returns `Ok(None)` for paths with no normal component such as `./`.
///
/// # Errors
/// * `Error::UnsafeArchivePath` for `..` components, absolute paths and
///   drive prefixes
pub fn sanitize_entry_path(raw: &str) -> Result<Option<PathBuf>> {
    let mut normalized = PathBuf::new();
    for component in Path::new(raw).components() {
        match component {
            Component::Normal(c) => normalized.push(c),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::UnsafeArchivePath {
                    path: raw.to_string(),
                });
            }
        }
    }
    if normalized.as_os_str().is_empty() {
        Ok(None)
    } else {
        Ok(Some(normalized))
    }
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(unix)]
fn create_dir(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    // owner needs rwx to populate the directory
    fs::DirBuilder::new()
        .recursive(true)
        .mode(mode | 0o700)
        .create(path)
}

#[cfg(not(unix))]
fn create_dir(path: &Path, _mode: u32) -> io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(unix)]
fn create_file(path: &Path, mode: u32) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode | 0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_file(path: &Path, _mode: u32) -> io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl ArchiveEntry {
    /// Writes the entry below `destination`.
    pub fn write_to(&self, destination: &Path) -> Result<()> {
        let target = destination.join(&self.path);
        if self.is_directory {
            return create_dir(&target, self.mode).map_err(extraction_error);
        }
        if let Some(parent) = target.parent() {
            create_dir(parent, 0o755).map_err(extraction_error)?;
        }
        let mut file = create_file(&target, self.mode).map_err(extraction_error)?;
        file.write_all(&self.content).map_err(extraction_error)
    }
}

/// Unpacks a `.tar.gz` byte stream into `destination` and returns the path
/// of the archive's top-level directory.
///
/// The root is the first segment of the first real entry; the global
/// metadata pseudo-entry is skipped. An archive without entries yields
/// `destination` itself.
///
/// # Errors
/// * `Error::ExtractionError` on malformed or truncated input and on local
///   write failures
/// * `Error::UnsafeArchivePath` if an entry would escape `destination`
pub fn extract<P: AsRef<Path>>(data: &[u8], destination: P) -> Result<PathBuf> {
    let destination = destination.as_ref();
    let mut archive = Archive::new(GzDecoder::new(data));
    let mut root_dir: Option<String> = None;

    for entry in archive.entries().map_err(extraction_error)? {
        let mut entry = entry.map_err(extraction_error)?;
        let entry_type = entry.header().entry_type();
        let raw_path = entry
            .path()
            .map_err(extraction_error)?
            .to_string_lossy()
            .into_owned();

        if entry_type == EntryType::XGlobalHeader || raw_path == PAX_GLOBAL_HEADER {
            debug!("Skipping global metadata entry '{raw_path}'");
            continue;
        }
        if !entry_type.is_dir() && !entry_type.is_file() {
            warn!("Skipping unsupported archive entry '{raw_path}' ({entry_type:?})");
            continue;
        }
        let Some(path) = sanitize_entry_path(&raw_path)? else {
            continue;
        };

        if root_dir.is_none() {
            root_dir = path
                .components()
                .next()
                .map(|c| c.as_os_str().to_string_lossy().into_owned());
        }

        let mode = entry.header().mode().map_err(extraction_error)? & 0o7777;
        let mut content = Vec::new();
        if entry_type.is_file() {
            entry.read_to_end(&mut content).map_err(extraction_error)?;
        }
        let archive_entry = ArchiveEntry {
            path: to_slash_path(&path),
            is_directory: entry_type.is_dir(),
            mode,
            content,
        };
        debug!("Extracting '{}'", archive_entry.path);
        archive_entry.write_to(destination)?;
    }

    Ok(match root_dir {
        Some(root) => destination.join(root),
        None => destination.to_path_buf(),
    })
}
