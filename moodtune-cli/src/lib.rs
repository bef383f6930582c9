//! moodtune command-line front end
//!
//! Parses slider values, selects a rule table and renders the engine's
//! recommendations and mood description as text or JSON.

pub mod cli;
pub mod output;

use anyhow::{Context, Result};

use moodtune_engine::config::{load_config_file, write_config_file};
use moodtune_engine::{presets, FuzzyEngine};

pub use cli::{select_engine, Cli, Command, InputArgs};

/// Execute one command and return what should be printed on stdout
pub fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Recommend {
            input,
            json,
            explain,
        } => {
            let engine = select_engine(cli)?;
            let input = input.to_input();
            let recommendations = engine.recommend(input);
            let firings = explain.then(|| engine.explain(input));

            if *json {
                let report = output::RecommendReport {
                    rule_table: engine.name(),
                    input,
                    recommendations: &recommendations,
                    rules: firings.as_deref(),
                };
                return Ok(serde_json::to_string_pretty(&report)?);
            }

            let mut text = output::render_recommendations(&recommendations);
            if let Some(firings) = &firings {
                text.push_str("\n\n");
                text.push_str(&output::render_firings(firings));
            }
            Ok(text)
        }

        Command::Describe { input, json } => {
            let engine = select_engine(cli)?;
            let input = input.to_input();
            let state = engine.mood_state(input);

            if *json {
                let report = output::DescribeReport {
                    rule_table: engine.name(),
                    input,
                    state: &state,
                };
                return Ok(serde_json::to_string_pretty(&report)?);
            }
            Ok(output::render_mood_state(&state))
        }

        Command::Presets => {
            let lines = presets::names()
                .into_iter()
                .map(|name| {
                    let description = presets::load(name)
                        .ok()
                        .and_then(|c| c.description)
                        .unwrap_or_default();
                    let marker = if name == presets::DEFAULT_PRESET {
                        " (default)"
                    } else {
                        ""
                    };
                    format!("{}{}: {}", name, marker, description)
                })
                .collect::<Vec<_>>();
            Ok(lines.join("\n"))
        }

        Command::Validate { path } => {
            let config = load_config_file(path)
                .with_context(|| format!("Failed to read rule table {}", path.display()))?;
            let engine = FuzzyEngine::from_config(&config)
                .with_context(|| format!("Invalid rule table {}", path.display()))?;
            let rules = engine.rule_base();
            Ok(format!(
                "Rule table '{}' is valid: {} rules, {} categories",
                engine.name(),
                rules.rules().len(),
                rules.categories().len()
            ))
        }

        Command::Export { preset, path } => {
            let config = presets::load(preset)
                .with_context(|| format!("Failed to load preset '{}'", preset))?;
            write_config_file(&config, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(format!("Wrote preset '{}' to {}", config.name, path.display()))
        }
    }
}
