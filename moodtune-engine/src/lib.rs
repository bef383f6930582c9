//! # moodtune engine
//!
//! Fuzzy inference from three slider values (mood, energy, vibe) to ranked
//! music-genre recommendations:
//! - Membership shapes (triangular, trapezoidal)
//! - Linguistic variables with optional domain rescale
//! - Weighted min/max rule base
//! - Ranking and dominant-term mood description
//! - Rule tables as TOML data, with built-in presets
//!
//! ```
//! use moodtune_engine::{FuzzyEngine, MoodInput};
//!
//! let engine = FuzzyEngine::from_preset("extended").unwrap();
//! let input = MoodInput::new(75.0, 90.0, 90.0);
//!
//! let top = engine.top_recommendation(input).unwrap();
//! assert_eq!(top.category, "Hip Hop");
//! assert_eq!(top.strength_percent, 90);
//!
//! let state = engine.mood_state(input);
//! assert_eq!(
//!     state.description,
//!     "happy mood (1.00) with high energy (1.00) and party vibe (1.00)"
//! );
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod membership;
pub mod presets;
pub mod ranking;
pub mod rules;
pub mod variable;

pub use config::EngineConfig;
pub use engine::{FuzzyEngine, MoodInput};
pub use error::{Error, Result};
pub use membership::MembershipShape;
pub use ranking::{DominantTerm, MoodState, Recommendation};
pub use rules::{Category, CategoryStrengths, Rule, RuleFiring};
pub use variable::{Dimension, FuzzifiedInput, MembershipResult};
