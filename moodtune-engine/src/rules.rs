//! Rule base and aggregation
//!
//! Each rule names one term per dimension and an output category:
//!
//! ```text
//! (mood term, energy term, vibe term) -> category, weight
//! ```
//!
//! Firing strength is `weight * min(mood, energy, vibe)` (fuzzy AND). Per
//! category the strongest firing rule wins (fuzzy OR). Term and category
//! names are checked once, when the rule base is built, so aggregation
//! cannot fail. Antecedent degrees are looked up by term name in the result
//! of the rule's own dimension.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::variable::{Dimension, FuzzifiedInput, LinguisticVariable};
use crate::{Error, Result};

/// Output category (a music genre)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    /// Key referenced by rules
    pub key: String,

    /// Human-readable display label
    pub label: String,
}

impl Category {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Weighted fuzzy rule as written in a rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    pub mood: String,
    pub energy: String,
    pub vibe: String,
    pub category: String,

    /// Scales the rule's maximum firing strength, in `(0, 1]`
    pub weight: f64,
}

impl Rule {
    pub fn new(mood: &str, energy: &str, vibe: &str, category: &str, weight: f64) -> Self {
        Self {
            mood: mood.to_string(),
            energy: energy.to_string(),
            vibe: vibe.to_string(),
            category: category.to_string(),
            weight,
        }
    }

    /// Term named by this rule for `dimension`
    pub fn term(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Mood => &self.mood,
            Dimension::Energy => &self.energy,
            Dimension::Vibe => &self.vibe,
        }
    }

    /// Mood, energy and vibe degrees of the referenced terms
    ///
    /// A term missing from the input (fuzzified by another rule table)
    /// has degree 0.
    fn antecedent_degrees(&self, input: &FuzzifiedInput) -> [f64; 3] {
        [Dimension::Mood, Dimension::Energy, Dimension::Vibe]
            .map(|d| input.get(d).get(self.term(d)).unwrap_or(0.0))
    }

    fn firing_strength(&self, degrees: [f64; 3]) -> f64 {
        self.weight * degrees[0].min(degrees[1]).min(degrees[2])
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} & {} & {} -> {} ({})",
            self.mood, self.energy, self.vibe, self.category, self.weight
        )
    }
}

/// Aggregated strength of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStrength {
    pub key: String,
    pub label: String,
    pub strength: f64,
}

/// Category -> strength mapping produced by [`RuleBase::aggregate`]
///
/// Holds only categories with strictly positive strength. Entries are in
/// aggregation order: each category's first appearance in the rule table.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategoryStrengths {
    pub entries: Vec<CategoryStrength>,
}

impl CategoryStrengths {
    /// Strength of the category with key `key`; absent categories are `None`
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.strength)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryStrength> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Firing detail of one rule, for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleFiring {
    /// Position of the rule in the table
    pub index: usize,
    pub rule: Rule,

    /// Mood, energy and vibe antecedent degrees
    pub degrees: [f64; 3],
    pub strength: f64,
}

/// Validated, immutable rule table
#[derive(Debug, Clone)]
pub struct RuleBase {
    categories: Vec<Category>,
    rules: Vec<Rule>,
    /// Category index of each rule's consequent
    consequents: Vec<usize>,
    /// Category indices in order of first appearance in `rules`
    aggregation_order: Vec<usize>,
}

impl RuleBase {
    /// Resolve and validate rules against the three variables
    ///
    /// # Errors
    /// `Error::Config` when the table is empty, a category key is empty or
    /// repeated, a rule names an unknown term or category, or a weight is
    /// outside `(0, 1]`.
    pub fn new(
        rules: Vec<Rule>,
        categories: Vec<Category>,
        mood: &LinguisticVariable,
        energy: &LinguisticVariable,
        vibe: &LinguisticVariable,
    ) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::Config("rule table has no rules".to_string()));
        }

        for (i, category) in categories.iter().enumerate() {
            if category.key.trim().is_empty() {
                return Err(Error::Config(format!("category #{} has an empty key", i)));
            }
            if categories[..i].iter().any(|c| c.key == category.key) {
                return Err(Error::Config(format!(
                    "category '{}' is declared more than once",
                    category.key
                )));
            }
        }

        let mut consequents = Vec::with_capacity(rules.len());
        let mut aggregation_order: Vec<usize> = Vec::new();

        for (i, rule) in rules.iter().enumerate() {
            if !rule.weight.is_finite() || rule.weight <= 0.0 || rule.weight > 1.0 {
                return Err(Error::Config(format!(
                    "rule #{} ({}) has weight {} outside (0, 1]",
                    i, rule, rule.weight
                )));
            }

            let category = categories
                .iter()
                .position(|c| c.key == rule.category)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "rule #{} ({}) references undefined category '{}'",
                        i, rule, rule.category
                    ))
                })?;

            if !aggregation_order.contains(&category) {
                aggregation_order.push(category);
            }

            for variable in [mood, energy, vibe] {
                check_term(i, rule, variable)?;
            }
            consequents.push(category);
        }

        for (i, category) in categories.iter().enumerate() {
            if !aggregation_order.contains(&i) {
                warn!(
                    "Category '{}' is not the consequent of any rule and will never be recommended",
                    category.key
                );
            }
        }

        Ok(Self {
            categories,
            rules,
            consequents,
            aggregation_order,
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Evaluate every rule and keep the strongest firing per category
    ///
    /// Categories that no rule fired with positive strength are left out.
    pub fn aggregate(&self, input: &FuzzifiedInput) -> CategoryStrengths {
        let best = self.rules.iter().zip(&self.consequents).fold(
            vec![0.0_f64; self.categories.len()],
            |mut best, (rule, &category)| {
                let strength = rule.firing_strength(rule.antecedent_degrees(input));
                if strength > best[category] {
                    best[category] = strength;
                }
                best
            },
        );

        let entries = self
            .aggregation_order
            .iter()
            .filter(|&&i| best[i] > 0.0)
            .map(|&i| CategoryStrength {
                key: self.categories[i].key.clone(),
                label: self.categories[i].label.clone(),
                strength: best[i],
            })
            .collect();

        CategoryStrengths { entries }
    }

    /// Firing strength of every rule, in table order
    pub fn explain(&self, input: &FuzzifiedInput) -> Vec<RuleFiring> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                let degrees = rule.antecedent_degrees(input);
                RuleFiring {
                    index,
                    rule: rule.clone(),
                    degrees,
                    strength: rule.firing_strength(degrees),
                }
            })
            .collect()
    }
}

fn check_term(index: usize, rule: &Rule, variable: &LinguisticVariable) -> Result<()> {
    let term = rule.term(variable.dimension());
    if variable.term_index(term).is_none() {
        return Err(Error::Config(format!(
            "rule #{} ({}) references undefined {} term '{}'",
            index,
            rule,
            variable.dimension(),
            term
        )));
    }
    Ok(())
}
