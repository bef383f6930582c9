//! Text and JSON rendering of engine results

use serde::Serialize;

use moodtune_engine::{MoodInput, MoodState, Recommendation, RuleFiring};

/// Width of the strength bar in characters (100% fills it)
const BAR_WIDTH: usize = 20;

/// JSON document printed by `recommend --json`
#[derive(Debug, Serialize)]
pub struct RecommendReport<'a> {
    pub rule_table: &'a str,
    pub input: MoodInput,
    pub recommendations: &'a [Recommendation],

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<&'a [RuleFiring]>,
}

/// JSON document printed by `describe --json`
#[derive(Debug, Serialize)]
pub struct DescribeReport<'a> {
    pub rule_table: &'a str,
    pub input: MoodInput,
    pub state: &'a MoodState,
}

/// Strength bar, e.g. `###############-----` for 75%
pub fn strength_bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * BAR_WIDTH + 50) / 100;
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// One line per recommendation, strongest first
pub fn render_recommendations(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return "No genre matches this setting (no rule fired)".to_string();
    }

    let label_width = recommendations
        .iter()
        .map(|r| r.category.len())
        .max()
        .unwrap_or(0);

    recommendations
        .iter()
        .map(|r| {
            format!(
                "{:<width$}  {}  {:>3}%",
                r.category,
                strength_bar(r.strength_percent),
                r.strength_percent,
                width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rules that fired, in table order, with a summary count
pub fn render_firings(firings: &[RuleFiring]) -> String {
    let fired: Vec<&RuleFiring> = firings.iter().filter(|f| f.strength > 0.0).collect();

    let mut lines = vec![format!("{} of {} rules fired", fired.len(), firings.len())];
    lines.extend(fired.iter().map(|f| {
        format!(
            "  #{:<3} {:<50} min({:.2}, {:.2}, {:.2}) -> {:.3}",
            f.index,
            f.rule.to_string(),
            f.degrees[0],
            f.degrees[1],
            f.degrees[2],
            f.strength
        )
    }));
    lines.join("\n")
}

pub fn render_mood_state(state: &MoodState) -> String {
    format!(
        "{}\n  mood:   {} ({})\n  energy: {} ({})\n  vibe:   {} ({})",
        state.description,
        state.mood.term,
        state.mood.degree_text,
        state.energy.term,
        state.energy.degree_text,
        state.vibe.term,
        state.vibe.degree_text
    )
}
