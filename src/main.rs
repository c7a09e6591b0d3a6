//! glfast's main application entry point.
//! Parses arguments, materializes the template archive and emits the
//! resulting commit actions.

use anyhow::Context;
use glfast::{
    archive::extract,
    cli::{get_args, Args},
    config::get_config,
    error::default_error_handler,
    processor::{materialize, TemplateParameters},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();

    if let Err(err) = run(args) {
        default_error_handler(format!("{err:#}"));
    }
}

/// # Flow
/// 1. Resolves the configuration
/// 2. Unpacks the archive into a temporary directory
/// 3. Materializes the unpacked tree
/// 4. Writes the commit actions and, if requested, the files
fn run(args: Args) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve the working directory")?;
    let config = get_config(args.config.as_deref(), &cwd)?;
    let parameters = TemplateParameters::new(args.name, args.port)?;

    let archive = args.archive.display();
    let data = std::fs::read(&args.archive)
        .with_context(|| format!("failed to read archive {archive}"))?;
    let temp_dir = tempfile::Builder::new().prefix("template").tempdir()?;
    let root = extract(&data, temp_dir.path())?;
    let manifest = materialize(&root, &parameters, &config.template)?;

    if let Some(dir) = &args.write_dir {
        manifest.write_to(dir)?;
        eprintln!("Wrote {} files to {}", manifest.len(), dir.display());
    }

    let actions = serde_json::to_string_pretty(&manifest.into_commit_actions())?;
    match &args.output {
        Some(path) => std::fs::write(path, actions)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{actions}"),
    }
    Ok(())
}
