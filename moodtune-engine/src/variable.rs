//! Linguistic variables
//!
//! A linguistic variable binds one input dimension (mood, energy or vibe) to
//! an ordered list of named terms, each backed by a [`MembershipShape`].
//! Fuzzifying a raw slider value yields a [`MembershipResult`] holding one
//! degree per term, in declaration order. Both result types are only built
//! by fuzzification, so every result is tagged with the dimension it came
//! from.

use serde::{Deserialize, Serialize};

use crate::membership::MembershipShape;
use crate::{Error, Result};

/// Input dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Sad to happy
    Mood,
    /// Low to high
    Energy,
    /// Chill to intense
    Vibe,
}

impl Dimension {
    /// Name as used in rule tables and descriptions
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Mood => "mood",
            Dimension::Energy => "energy",
            Dimension::Vibe => "vibe",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Linear map from the raw input range onto the evaluation domain
///
/// Exists so shape parameters can be authored on a convenient scale
/// (e.g. 0-10) while inputs arrive on another (e.g. 0-100).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainRescale {
    from: (f64, f64),
    to: (f64, f64),
}

impl DomainRescale {
    /// Create a rescale from `from` onto `to`; both intervals must be non-empty
    pub fn new(from: (f64, f64), to: (f64, f64)) -> Result<Self> {
        check_interval("input range", from)?;
        check_interval("domain", to)?;
        Ok(Self { from, to })
    }

    /// Map a raw value onto the domain
    ///
    /// Multiplies before dividing so values landing on authored points
    /// (55 on 0-100 -> 5.5 on 0-10) come out exact.
    pub fn apply(&self, x: f64) -> f64 {
        let (from_lo, from_hi) = self.from;
        let (to_lo, to_hi) = self.to;
        to_lo + (x - from_lo) * (to_hi - to_lo) / (from_hi - from_lo)
    }
}

/// Named fuzzy category of one dimension
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub name: String,
    pub shape: MembershipShape,
}

impl Term {
    pub fn new(name: impl Into<String>, shape: MembershipShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

/// Degree of one term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermDegree {
    pub term: String,
    pub degree: f64,
}

/// Degrees of every term of a dimension for one input value
///
/// Always holds one entry per configured term, in declaration order, even
/// when all degrees are 0 (the value fell in a gap between term supports).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembershipResult {
    dimension: Dimension,
    degrees: Vec<TermDegree>,
}

impl MembershipResult {
    pub(crate) fn new(dimension: Dimension, degrees: Vec<TermDegree>) -> Self {
        Self { dimension, degrees }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Degree of the named term, `None` if the dimension has no such term
    pub fn get(&self, term: &str) -> Option<f64> {
        self.degrees
            .iter()
            .find(|t| t.term == term)
            .map(|t| t.degree)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TermDegree> {
        self.degrees.iter()
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }
}

/// Membership results of all three dimensions for one input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzifiedInput {
    mood: MembershipResult,
    energy: MembershipResult,
    vibe: MembershipResult,
}

impl FuzzifiedInput {
    pub(crate) fn new(
        mood: MembershipResult,
        energy: MembershipResult,
        vibe: MembershipResult,
    ) -> Self {
        debug_assert_eq!(mood.dimension, Dimension::Mood);
        debug_assert_eq!(energy.dimension, Dimension::Energy);
        debug_assert_eq!(vibe.dimension, Dimension::Vibe);
        Self { mood, energy, vibe }
    }

    pub fn mood(&self) -> &MembershipResult {
        &self.mood
    }

    pub fn energy(&self) -> &MembershipResult {
        &self.energy
    }

    pub fn vibe(&self) -> &MembershipResult {
        &self.vibe
    }

    pub fn get(&self, dimension: Dimension) -> &MembershipResult {
        match dimension {
            Dimension::Mood => &self.mood,
            Dimension::Energy => &self.energy,
            Dimension::Vibe => &self.vibe,
        }
    }
}

/// Input dimension partitioned into named fuzzy terms
#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    dimension: Dimension,
    range: (f64, f64),
    rescale: Option<DomainRescale>,
    terms: Vec<Term>,
}

impl LinguisticVariable {
    /// Build a validated variable
    ///
    /// # Errors
    /// `Error::Config` if the range is empty or non-finite, there are no
    /// terms, a term name is empty or repeated, or a shape is malformed.
    pub fn new(
        dimension: Dimension,
        range: (f64, f64),
        rescale: Option<DomainRescale>,
        terms: Vec<Term>,
    ) -> Result<Self> {
        check_interval(&format!("{} range", dimension), range)?;

        if terms.is_empty() {
            return Err(Error::Config(format!("{} has no terms", dimension)));
        }

        for (i, term) in terms.iter().enumerate() {
            if term.name.trim().is_empty() {
                return Err(Error::Config(format!(
                    "{} term #{} has an empty name",
                    dimension, i
                )));
            }
            if terms[..i].iter().any(|t| t.name == term.name) {
                return Err(Error::Config(format!(
                    "{} term '{}' is declared more than once",
                    dimension, term.name
                )));
            }
            if let Err(Error::Config(detail)) = term.shape.validate() {
                return Err(Error::Config(format!(
                    "{} term '{}': {}",
                    dimension, term.name, detail
                )));
            }
        }

        Ok(Self {
            dimension,
            range,
            rescale,
            terms,
        })
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Raw input range (inclusive)
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Declaration index of the named term
    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == name)
    }

    /// Clamp a raw value into the input range; NaN maps to the range minimum
    pub fn clamp(&self, raw: f64) -> f64 {
        let (lo, hi) = self.range;
        if raw.is_nan() {
            lo
        } else {
            raw.clamp(lo, hi)
        }
    }

    /// Map a raw value onto the evaluation domain (identity without rescale)
    pub fn to_domain(&self, raw: f64) -> f64 {
        match &self.rescale {
            Some(rescale) => rescale.apply(raw),
            None => raw,
        }
    }

    /// Fuzzify a raw value against every term
    pub fn membership(&self, raw: f64) -> MembershipResult {
        let x = self.to_domain(raw);
        let degrees = self
            .terms
            .iter()
            .map(|t| TermDegree {
                term: t.name.clone(),
                degree: t.shape.evaluate(x),
            })
            .collect();

        MembershipResult::new(self.dimension, degrees)
    }
}

fn check_interval(what: &str, (lo, hi): (f64, f64)) -> Result<()> {
    if !lo.is_finite() || !hi.is_finite() || lo >= hi {
        return Err(Error::Config(format!(
            "{} must be a finite interval with lo < hi, got [{}, {}]",
            what, lo, hi
        )));
    }
    Ok(())
}
