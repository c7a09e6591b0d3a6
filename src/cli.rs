//! Command-line interface implementation for glfast.
//! Provides argument parsing and help text formatting using clap.

use crate::constants::NO_PORT;
use crate::error::default_error_handler;
use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for glfast.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "glfast: materialize a project skeleton from a template archive",
    long_about = None
)]
pub struct Args {
    /// Path to the template archive (.tar.gz)
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Name of the new project
    #[arg(short, long)]
    pub name: String,

    /// Port for the application, omit for frontend templates
    #[arg(short, long, default_value_t = NO_PORT, allow_negative_numbers = true)]
    pub port: i64,

    /// Configuration file (default: glfast.yaml in the working directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the commit actions to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also write the materialized files into this directory
    #[arg(short, long, value_name = "DIR")]
    pub write_dir: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command used to print usage when required arguments are missing.
pub fn usage() -> clap::Command {
    Args::command().help_template(
        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
    )
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                if let Err(err) = usage().print_help() {
                    default_error_handler(format!("Failed to print usage: {err}"));
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
