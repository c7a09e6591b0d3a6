//! Error handling for glfast.
//! Defines the error taxonomy and the result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Errors that can abort a materialization run or the scaffold workflow.
///
/// Every failure is fatal to the current run: nothing is retried and no
/// partial manifest is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Malformed or truncated gzip/tar framing, or a local write failure
    /// while unpacking the archive.
    #[error("Extraction error: {0}.")]
    ExtractionError(String),

    /// An archive entry would land outside the destination directory.
    #[error("Archive entry '{path}' escapes the destination directory.")]
    UnsafeArchivePath { path: String },

    /// Represents errors that occur during template processing
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// A template-classified file failed to parse or render.
    #[error("Failed to render '{path}': {source}.")]
    RenderError {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// A file discovered during the walk could not be read.
    #[error("Failed to read '{path}': {source}.")]
    ReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A template-classified file is not valid UTF-8.
    #[error("Template file '{path}' is not valid UTF-8.")]
    InvalidUtf8 { path: String },

    /// A walked path that cannot become a repository path: outside the
    /// template root or not valid UTF-8.
    #[error("Path '{path}' cannot be mapped into the repository.")]
    InvalidPath { path: String },

    /// Base64 content of a materialized file that does not decode.
    #[error("Invalid base64 content for '{path}': {source}.")]
    DecodeError {
        path: String,
        #[source]
        source: base64::DecodeError,
    },

    /// Two files renamed to the same repository path.
    #[error("Multiple files render to the repository path '{path}'.")]
    PathCollision { path: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Rejected template parameters (e.g. an empty project name).
    #[error("Invalid parameters: {0}.")]
    InvalidParameters(String),

    /// The project to create already exists on the repository host.
    #[error("Project '{project}' already exists, please use a different project name.")]
    ProjectExists { project: String },

    /// Failure reported by the repository host.
    #[error("Repository host error: {0}.")]
    HostError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: impl std::fmt::Display) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
