// Declare modules
pub mod cli;
pub mod config;
pub mod emitter;
pub mod error;
pub mod models;
pub mod reporter;
pub mod tsconfig;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use self::cli::Cli;
use self::config::resolve_config;
use self::emitter::ConfigEmitter;
use self::reporter::ConsoleReporter;
use self::tsconfig::default_entries;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Logging (RUST_LOG still takes precedence)
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();

    // 3. Resolve Configuration
    let config = resolve_config(&args)?;
    log::debug!("Base directory: {}", config.base_dir.display());

    // 4. Build Entries
    let entries =
        default_entries(&config.extra_files).context("Invalid output entries")?;

    // 5. Write Files
    let mut reporter = ConsoleReporter::stdout();
    let written = ConfigEmitter::emit(&config.base_dir, &entries, &mut reporter)
        .context(format!("Failed to scaffold {}", config.base_dir.display()))?;
    log::debug!("Wrote {} files", written);

    Ok(())
}
