//! moodtune - Main entry point
//!
//! Maps mood, energy and vibe slider values to ranked genre recommendations.
//! Results go to stdout; logs go to stderr.

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use moodtune_cli::cli::LONG_VERSION;
use moodtune_cli::{run, Cli};

fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing (RUST_LOG wins over --verbose)
    let default_filter = if cli.verbose {
        "moodtune=debug,moodtune_cli=debug,moodtune_engine=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("moodtune {}", LONG_VERSION);

    let output = run(&cli)?;
    println!("{}", output);
    Ok(())
}
