//! Command-line arguments and rule table selection

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use moodtune_engine::config::{load_config_file, resolve_config_path, CONFIG_ENV_VAR};
use moodtune_engine::presets::DEFAULT_PRESET;
use moodtune_engine::{FuzzyEngine, MoodInput};

/// Version line with build identification, e.g.
/// `0.1.0 (3f2a9c1e, release, built 2026-10-19)`
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MOODTUNE_BUILD_ID"),
    ")"
);

/// Command-line arguments for moodtune
#[derive(Parser, Debug)]
#[command(name = "moodtune")]
#[command(about = "Fuzzy mood-to-genre music recommendations")]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Rule table file (TOML); falls back to $MOODTUNE_CONFIG, then the user config file
    #[arg(long, global = true, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Built-in rule table to use instead of any configured file
    #[arg(long, global = true)]
    pub preset: Option<String>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank genres for a mood, energy and vibe setting
    Recommend {
        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Include the firing strength of every rule
        #[arg(long)]
        explain: bool,
    },

    /// Describe the dominant mood, energy and vibe terms
    Describe {
        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List built-in rule tables
    Presets,

    /// Load and validate a rule table file
    Validate {
        /// Rule table file (TOML)
        path: PathBuf,
    },

    /// Write a built-in rule table to a file for editing
    Export {
        /// Preset name
        preset: String,

        /// Destination file
        path: PathBuf,
    },
}

/// Slider values, 0-100; values outside the range are clamped
#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct InputArgs {
    /// Mood, sad (0) to happy (100)
    #[arg(allow_negative_numbers = true)]
    pub mood: i32,

    /// Energy, low (0) to high (100)
    #[arg(allow_negative_numbers = true)]
    pub energy: i32,

    /// Vibe, chill (0) to intense (100)
    #[arg(allow_negative_numbers = true)]
    pub vibe: i32,
}

impl InputArgs {
    pub fn to_input(self) -> MoodInput {
        MoodInput::new(self.mood as f64, self.energy as f64, self.vibe as f64)
    }
}

/// Build the engine for this invocation
///
/// Selection order:
/// 1. `--preset` (explicit built-in table)
/// 2. `--config`, then `$MOODTUNE_CONFIG`, then the user config file
/// 3. The default built-in preset
pub fn select_engine(cli: &Cli) -> Result<FuzzyEngine> {
    if let Some(name) = &cli.preset {
        return FuzzyEngine::from_preset(name)
            .with_context(|| format!("Failed to load preset '{}'", name));
    }

    match resolve_config_path(cli.config.as_deref(), CONFIG_ENV_VAR) {
        Some(path) => {
            let config = load_config_file(&path)
                .with_context(|| format!("Failed to read rule table {}", path.display()))?;
            FuzzyEngine::from_config(&config)
                .with_context(|| format!("Invalid rule table {}", path.display()))
        }
        None => {
            info!("No rule table file configured, using preset '{}'", DEFAULT_PRESET);
            FuzzyEngine::from_preset(DEFAULT_PRESET)
                .with_context(|| format!("Failed to load preset '{}'", DEFAULT_PRESET))
        }
    }
}
