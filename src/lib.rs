//! glfast materializes parameterized project skeletons.
//! It unpacks a template archive, renames paths and renders file contents
//! for a new project, and produces a manifest ready to be committed to a
//! repository host in a single commit.

/// Archive extraction with path sanitization
pub mod archive;

/// Encoding classification (text, template or base64) per file
pub mod classifier;

/// Command-line interface module for the glfast binary
pub mod cli;

/// Configuration handling
/// Supports JSON and YAML formats (glfast.yaml, glfast.yml, glfast.json)
pub mod config;

/// Common constants
pub mod constants;

/// Translation of Go-style template actions into MiniJinja syntax
pub mod dialect;

/// Error types and handling
pub mod error;

/// Interface of the remote repository host
pub mod host;

/// Manifest of materialized files and commit payloads
pub mod manifest;

/// Naming transforms (Pascal case, camel case, part skipping)
pub mod naming;

/// Tree walk producing the manifest
pub mod processor;

/// Placeholder substitution in paths
pub mod renamer;

/// Template rendering of file contents
pub mod renderer;

/// Project creation workflow
pub mod scaffold;
