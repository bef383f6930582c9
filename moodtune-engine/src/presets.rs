//! Built-in rule tables
//!
//! Shipped as TOML data and embedded at compile time:
//! - `classic`: three terms per dimension on the raw 0-100 scale, 19 rules
//! - `extended`: five mood and vibe terms on a 0-10 domain, 32 rules

use crate::config::EngineConfig;
use crate::{Error, Result};

/// Preset used when no rule table file is configured
pub const DEFAULT_PRESET: &str = "extended";

const PRESETS: &[(&str, &str)] = &[
    ("classic", include_str!("../presets/classic.toml")),
    ("extended", include_str!("../presets/extended.toml")),
];

/// Names of all built-in presets
pub fn names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _)| *name).collect()
}

/// TOML source of a preset
pub fn source(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, text)| *text)
}

/// Parse a built-in preset
pub fn load(name: &str) -> Result<EngineConfig> {
    let text = source(name).ok_or_else(|| {
        Error::NotFound(format!(
            "preset '{}' (available: {})",
            name,
            names().join(", ")
        ))
    })?;
    EngineConfig::from_toml_str(text)
}
