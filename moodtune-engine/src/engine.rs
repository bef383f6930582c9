//! Fuzzy inference engine
//!
//! `FuzzyEngine` owns a validated rule table and exposes the two entry points
//! callers use: [`FuzzyEngine::recommend`] (ranked genres) and
//! [`FuzzyEngine::mood_state`] (dominant terms and description).
//!
//! The engine is immutable after construction and holds no per-call state,
//! so one instance can be shared across threads behind an `Arc`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{DimensionConfig, EngineConfig};
use crate::presets;
use crate::ranking::{self, MoodState, Recommendation};
use crate::rules::{CategoryStrengths, RuleBase, RuleFiring};
use crate::variable::{
    Dimension, DomainRescale, FuzzifiedInput, LinguisticVariable, MembershipResult, Term,
};
use crate::Result;

/// Raw slider values
///
/// Values outside a dimension's configured range are clamped into it; NaN
/// clamps to the range minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodInput {
    pub mood: f64,
    pub energy: f64,
    pub vibe: f64,
}

impl MoodInput {
    pub fn new(mood: f64, energy: f64, vibe: f64) -> Self {
        Self { mood, energy, vibe }
    }
}

/// Validated fuzzy inference engine
#[derive(Debug, Clone)]
pub struct FuzzyEngine {
    name: String,
    mood: LinguisticVariable,
    energy: LinguisticVariable,
    vibe: LinguisticVariable,
    rules: RuleBase,
}

impl FuzzyEngine {
    /// Validate a rule table and build the engine
    ///
    /// # Errors
    /// `Error::Config` for any malformed shape, range, term, category or
    /// rule. No engine is built from an invalid table.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let mood = build_variable(Dimension::Mood, &config.dimensions.mood)?;
        let energy = build_variable(Dimension::Energy, &config.dimensions.energy)?;
        let vibe = build_variable(Dimension::Vibe, &config.dimensions.vibe)?;

        let rules = RuleBase::new(
            config.rules.clone(),
            config.categories.clone(),
            &mood,
            &energy,
            &vibe,
        )?;

        info!(
            "Rule table '{}' ready: {}/{}/{} terms, {} categories, {} rules",
            config.name,
            mood.terms().len(),
            energy.terms().len(),
            vibe.terms().len(),
            rules.categories().len(),
            rules.rules().len()
        );

        Ok(Self {
            name: config.name.clone(),
            mood,
            energy,
            vibe,
            rules,
        })
    }

    /// Build the engine from a built-in preset
    pub fn from_preset(name: &str) -> Result<Self> {
        Self::from_config(&presets::load(name)?)
    }

    /// Rule table name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variable(&self, dimension: Dimension) -> &LinguisticVariable {
        match dimension {
            Dimension::Mood => &self.mood,
            Dimension::Energy => &self.energy,
            Dimension::Vibe => &self.vibe,
        }
    }

    pub fn rule_base(&self) -> &RuleBase {
        &self.rules
    }

    /// Clamp each value into its range and fuzzify it
    pub fn fuzzify(&self, input: MoodInput) -> FuzzifiedInput {
        FuzzifiedInput::new(
            self.fuzzify_one(&self.mood, input.mood),
            self.fuzzify_one(&self.energy, input.energy),
            self.fuzzify_one(&self.vibe, input.vibe),
        )
    }

    fn fuzzify_one(&self, variable: &LinguisticVariable, raw: f64) -> MembershipResult {
        let value = variable.clamp(raw);
        if value != raw {
            debug!(
                "{} input {} outside range {:?}, clamped to {}",
                variable.dimension(),
                raw,
                variable.range(),
                value
            );
        }
        variable.membership(value)
    }

    /// Category strengths for an input (before ranking)
    pub fn aggregate(&self, input: MoodInput) -> CategoryStrengths {
        self.rules.aggregate(&self.fuzzify(input))
    }

    /// Ranked genre recommendations, strongest first
    ///
    /// Empty when no rule fires with positive strength.
    pub fn recommend(&self, input: MoodInput) -> Vec<Recommendation> {
        let recommendations = ranking::rank(&self.aggregate(input));
        debug!(
            "{:?} -> {} recommendations, top {:?}",
            input,
            recommendations.len(),
            recommendations.first().map(|r| r.key.as_str())
        );
        recommendations
    }

    /// Strongest recommendation, the category handed to song lookup
    pub fn top_recommendation(&self, input: MoodInput) -> Option<Recommendation> {
        self.recommend(input).into_iter().next()
    }

    /// Dominant term of each dimension and a one-line description
    pub fn mood_state(&self, input: MoodInput) -> MoodState {
        ranking::describe(&self.fuzzify(input))
    }

    /// Firing strength of every rule, in table order
    pub fn explain(&self, input: MoodInput) -> Vec<RuleFiring> {
        self.rules.explain(&self.fuzzify(input))
    }
}

fn build_variable(dimension: Dimension, config: &DimensionConfig) -> Result<LinguisticVariable> {
    let range = (config.range[0], config.range[1]);
    let rescale = config
        .domain
        .map(|[lo, hi]| DomainRescale::new(range, (lo, hi)))
        .transpose()?;
    let terms = config
        .terms
        .iter()
        .map(|t| Term::new(t.name.clone(), t.shape))
        .collect();

    LinguisticVariable::new(dimension, range, rescale, terms)
}
