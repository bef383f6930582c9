//! Rule table configuration: TOML schema, file loading and path resolution
//!
//! A rule table is plain data:
//!
//! ```toml
//! name = "example"
//!
//! [dimensions.mood]
//! range = [0.0, 100.0]
//! domain = [0.0, 10.0]          # optional linear rescale
//! terms = [
//!     { name = "sad", shape = { triangular = [2.0, 4.0, 5.5] } },
//! ]
//!
//! [[categories]]
//! key = "jazz"
//! label = "Jazz"
//!
//! [[rules]]
//! mood = "sad"
//! energy = "low"
//! vibe = "chill"
//! category = "jazz"
//! weight = 0.8
//! ```
//!
//! Parsing only checks the schema. Semantic validation (shape ordering,
//! term references, weights) happens in `FuzzyEngine::from_config`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::membership::MembershipShape;
use crate::rules::{Category, Rule};
use crate::Result;

/// Environment variable naming a rule table file
pub const CONFIG_ENV_VAR: &str = "MOODTUNE_CONFIG";

/// File name of the per-user rule table under the platform config dir
pub const USER_CONFIG_FILE: &str = "rules.toml";

/// Complete rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub dimensions: DimensionsConfig,
    pub categories: Vec<Category>,
    pub rules: Vec<Rule>,
}

/// One entry per input dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionsConfig {
    pub mood: DimensionConfig,
    pub energy: DimensionConfig,
    pub vibe: DimensionConfig,
}

/// Raw range, optional evaluation domain and terms of one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionConfig {
    /// Inclusive raw input range
    pub range: [f64; 2],

    /// Evaluation domain the raw range is linearly mapped onto
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,

    /// Terms in declaration order (order decides dominant-term ties)
    pub terms: Vec<TermConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermConfig {
    pub name: String,
    pub shape: MembershipShape,
}

impl EngineConfig {
    /// Parse a rule table from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the rule table to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Load a rule table from a TOML file
pub fn load_config_file(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = EngineConfig::from_toml_str(&content)?;
    info!(
        "Loaded rule table '{}' from {} ({} rules)",
        config.name,
        path.display(),
        config.rules.len()
    );
    Ok(config)
}

/// Write a rule table atomically (temp file + rename)
pub fn write_config_file(config: &EngineConfig, path: &Path) -> Result<()> {
    let content = config.to_toml_string()?;

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&temp_path, content)?;
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!("Wrote rule table '{}' to {}", config.name, path.display());
    Ok(())
}

/// Resolve which rule table file to load, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. Per-user config file, if it exists
///
/// Returns `None` when none applies; the caller then falls back to a
/// built-in preset.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        debug!("Rule table from command line: {}", path.display());
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            debug!("Rule table from {}: {}", env_var_name, path);
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Per-user config file
    if let Some(path) = user_config_path() {
        if path.exists() {
            debug!("Rule table from user config: {}", path.display());
            return Some(path);
        }
    }

    None
}

/// Platform location of the per-user rule table
///
/// `~/.config/moodtune/rules.toml` on Linux, the equivalent application
/// config directory elsewhere.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("moodtune").join(USER_CONFIG_FILE))
}
