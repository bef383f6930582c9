//! Ranking and mood description
//!
//! Turns aggregated category strengths into a ranked recommendation list and
//! derives the dominant term of each dimension for a one-line description.

use serde::Serialize;

use crate::rules::CategoryStrengths;
use crate::variable::{FuzzifiedInput, MembershipResult};

/// One ranked recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Category key as referenced by rules
    pub key: String,

    /// Display label
    pub category: String,

    /// Aggregated strength in `[0.0, 1.0]`
    pub strength: f64,

    /// `round(strength * 100)`
    pub strength_percent: u8,
}

/// Rank categories by strength, strongest first
///
/// The sort is stable: equal strengths keep their aggregation order. Only
/// categories present in `strengths` produce an entry.
pub fn rank(strengths: &CategoryStrengths) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = strengths
        .iter()
        .map(|c| Recommendation {
            key: c.key.clone(),
            category: c.label.clone(),
            strength: c.strength,
            strength_percent: to_percent(c.strength),
        })
        .collect();

    ranked.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    ranked
}

fn to_percent(strength: f64) -> u8 {
    (strength * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Strongest term of one dimension
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DominantTerm {
    pub term: String,
    pub degree: f64,

    /// Degree rounded half up to two decimals, as shown in descriptions
    pub degree_text: String,
}

impl DominantTerm {
    fn new(term: &str, degree: f64) -> Self {
        Self {
            term: term.to_string(),
            degree,
            degree_text: two_decimals(degree),
        }
    }
}

/// `{:.2}` alone rounds exact ties to even (0.625 -> "0.62")
fn two_decimals(degree: f64) -> String {
    format!("{:.2}", (degree * 100.0).round() / 100.0)
}

/// Pick the dominant term of a membership result
///
/// Scans terms in declaration order and replaces the current pick only on a
/// strictly greater degree, so the first-declared term wins ties. When every
/// degree is 0 the first term is reported with degree 0. An empty result
/// yields `DominantTerm::default()`.
pub fn dominant_term(result: &MembershipResult) -> DominantTerm {
    let mut terms = result.iter();
    let Some(first) = terms.next() else {
        return DominantTerm::default();
    };

    let best = terms.fold(first, |best, t| if t.degree > best.degree { t } else { best });
    DominantTerm::new(&best.term, best.degree)
}

/// Dominant term per dimension plus a human-readable summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodState {
    pub mood: DominantTerm,
    pub energy: DominantTerm,
    pub vibe: DominantTerm,
    pub description: String,
}

/// Build the mood state for a fuzzified input
pub fn describe(input: &FuzzifiedInput) -> MoodState {
    let mood = dominant_term(input.mood());
    let energy = dominant_term(input.energy());
    let vibe = dominant_term(input.vibe());

    let description = format!(
        "{} mood ({}) with {} energy ({}) and {} vibe ({})",
        mood.term,
        mood.degree_text,
        energy.term,
        energy.degree_text,
        vibe.term,
        vibe.degree_text
    );

    MoodState {
        mood,
        energy,
        vibe,
        description,
    }
}
