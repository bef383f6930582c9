//! Behavioural tests for the fuzzy inference engine
//!
//! Covers membership bounds, min/max aggregation limits, ranking order,
//! dominant-term selection at the slider extremes, determinism and rule
//! order independence, against both built-in presets and small custom tables.

use std::collections::HashMap;

use moodtune_engine::{EngineConfig, FuzzyEngine, MoodInput, Rule};

const PRESETS: &[&str] = &["classic", "extended"];

/// Every fifth slider position on each axis
fn grid() -> impl Iterator<Item = MoodInput> {
    (0..=20).flat_map(|m| {
        (0..=20).flat_map(move |e| {
            (0..=20).map(move |v| MoodInput::new(m as f64 * 5.0, e as f64 * 5.0, v as f64 * 5.0))
        })
    })
}

const MIDPOINT_TABLE: &str = r#"
name = "midpoint"

rules = [
    { mood = "neutral", energy = "medium", vibe = "chill", category = "acoustic", weight = 0.8 },
    { mood = "sad", energy = "medium", vibe = "chill", category = "jazz", weight = 1.0 },
    { mood = "neutral", energy = "high", vibe = "chill", category = "rock", weight = 1.0 },
]

[dimensions.mood]
range = [0.0, 100.0]
terms = [
    { name = "sad", shape = { trapezoidal = [0.0, 0.0, 20.0, 50.0] } },
    { name = "neutral", shape = { triangular = [20.0, 50.0, 80.0] } },
]

[dimensions.energy]
range = [0.0, 100.0]
terms = [
    { name = "medium", shape = { triangular = [20.0, 50.0, 80.0] } },
    { name = "high", shape = { trapezoidal = [50.0, 80.0, 100.0, 100.0] } },
]

[dimensions.vibe]
range = [0.0, 100.0]
terms = [
    { name = "chill", shape = { triangular = [20.0, 50.0, 80.0] } },
]

[[categories]]
key = "acoustic"
label = "Acoustic"

[[categories]]
key = "jazz"
label = "Jazz"

[[categories]]
key = "rock"
label = "Rock"
"#;

#[test]
fn test_midpoint_rule_is_top_recommendation() {
    let config = EngineConfig::from_toml_str(MIDPOINT_TABLE).unwrap();
    let engine = FuzzyEngine::from_config(&config).unwrap();

    let ranked = engine.recommend(MoodInput::new(50.0, 50.0, 50.0));
    assert_eq!(ranked.len(), 1, "sad and high are both 0 at the midpoint");
    assert_eq!(ranked[0].key, "acoustic");
    assert_eq!(ranked[0].category, "Acoustic");
    assert_eq!(ranked[0].strength_percent, 80);
}

#[test]
fn test_membership_degrees_in_unit_interval() {
    for name in PRESETS {
        let engine = FuzzyEngine::from_preset(name).unwrap();
        for raw in -10..=110 {
            let f = engine.fuzzify(MoodInput::new(raw as f64, raw as f64, raw as f64));
            for result in [f.mood(), f.energy(), f.vibe()] {
                for t in result.iter() {
                    assert!(
                        (0.0..=1.0).contains(&t.degree),
                        "{} {} term {} at {} gave {}",
                        name,
                        result.dimension(),
                        t.term,
                        raw,
                        t.degree
                    );
                }
            }
        }
    }
}

#[test]
fn test_zero_outside_support() {
    for name in PRESETS {
        let config = moodtune_engine::presets::load(name).unwrap();
        for dim in [
            &config.dimensions.mood,
            &config.dimensions.energy,
            &config.dimensions.vibe,
        ] {
            for term in &dim.terms {
                let (lo, hi) = term.shape.support();
                for x in [lo - 5.0, lo - 0.01, hi + 0.01, hi + 5.0] {
                    assert_eq!(term.shape.evaluate(x), 0.0, "{} at {}", term.shape, x);
                }
            }
        }
    }
}

#[test]
fn test_strength_bounded_by_max_weight() {
    for name in PRESETS {
        let engine = FuzzyEngine::from_preset(name).unwrap();

        let mut max_weight: HashMap<&str, f64> = HashMap::new();
        for rule in engine.rule_base().rules() {
            let w = max_weight.entry(rule.category.as_str()).or_insert(0.0);
            *w = w.max(rule.weight);
        }

        for input in grid() {
            for c in engine.aggregate(input).iter() {
                assert!(c.strength > 0.0);
                assert!(
                    c.strength <= max_weight[c.key.as_str()],
                    "{} {:?}: {} = {} exceeds max weight",
                    name,
                    input,
                    c.key,
                    c.strength
                );
            }
        }
    }
}

#[test]
fn test_ranking_sorted_and_only_consequents() {
    for name in PRESETS {
        let engine = FuzzyEngine::from_preset(name).unwrap();
        let consequents: Vec<&str> = engine
            .rule_base()
            .rules()
            .iter()
            .map(|r| r.category.as_str())
            .collect();

        for input in grid() {
            let ranked = engine.recommend(input);
            for pair in ranked.windows(2) {
                assert!(pair[0].strength >= pair[1].strength);
            }
            for r in &ranked {
                assert!(consequents.contains(&r.key.as_str()));
                assert!(r.strength_percent <= 100);
            }
        }
    }
}

#[test]
fn test_classic_midpoint_ranking() {
    let engine = FuzzyEngine::from_preset("classic").unwrap();
    let ranked = engine.recommend(MoodInput::new(50.0, 50.0, 50.0));

    let summary: Vec<(&str, u8)> = ranked
        .iter()
        .map(|r| (r.category.as_str(), r.strength_percent))
        .collect();

    // Acoustic, Rock and Electronic tie and keep rule table order
    assert_eq!(
        summary,
        vec![
            ("Pop", 45),
            ("Acoustic", 27),
            ("Rock", 27),
            ("Electronic", 27),
            ("Jazz", 23),
        ]
    );
}

#[test]
fn test_extended_exact_peaks() {
    let engine = FuzzyEngine::from_preset("extended").unwrap();
    let input = MoodInput::new(55.0, 50.0, 65.0);

    let f = engine.fuzzify(input);
    assert_eq!(f.mood().get("neutral"), Some(1.0));
    assert_eq!(f.energy().get("medium"), Some(1.0));
    assert_eq!(f.vibe().get("focus"), Some(1.0));

    let ranked = engine.recommend(input);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].category, "Pop");
    assert_eq!(ranked[0].strength_percent, 90);
    assert_eq!(ranked[1].category, "Rock");
    assert_eq!(ranked[1].strength_percent, 23);
}

#[test]
fn test_extended_midpoint_falls_in_rule_gap() {
    let engine = FuzzyEngine::from_preset("extended").unwrap();
    let input = MoodInput::new(50.0, 50.0, 50.0);

    // No rule pairs medium energy with a romantic vibe
    assert!(engine.recommend(input).is_empty());

    let state = engine.mood_state(input);
    assert_eq!(
        state.description,
        "neutral mood (0.50) with medium energy (1.00) and romantic vibe (0.67)"
    );
}

#[test]
fn test_mood_state_at_lower_extreme() {
    let classic = FuzzyEngine::from_preset("classic").unwrap();
    let state = classic.mood_state(MoodInput::new(0.0, 0.0, 0.0));
    assert_eq!(
        (state.mood.term.as_str(), state.energy.term.as_str(), state.vibe.term.as_str()),
        ("sad", "low", "chill")
    );
    assert_eq!(state.mood.degree, 1.0);

    let extended = FuzzyEngine::from_preset("extended").unwrap();
    let state = extended.mood_state(MoodInput::new(0.0, 0.0, 0.0));
    assert_eq!(state.mood.term, "depressed");
    assert_eq!(state.energy.term, "low");
    // chill's foot sits on 0, so every vibe term is 0 and the first is reported
    assert_eq!(state.vibe.term, "chill");
    assert_eq!(state.vibe.degree, 0.0);
    assert_eq!(state.vibe.degree_text, "0.00");
}

#[test]
fn test_mood_state_degree_text_rounds_half_up() {
    // Energy and vibe 45 sit at exactly 0.625 on the classic medium/moderate terms
    let classic = FuzzyEngine::from_preset("classic").unwrap();
    let state = classic.mood_state(MoodInput::new(50.0, 45.0, 45.0));
    assert_eq!(state.energy.term, "medium");
    assert_eq!(state.energy.degree, 0.625);
    assert_eq!(state.energy.degree_text, "0.63");
    assert_eq!(
        state.description,
        "neutral mood (0.50) with medium energy (0.63) and moderate vibe (0.63)"
    );
}

#[test]
fn test_mood_state_at_upper_extreme() {
    let classic = FuzzyEngine::from_preset("classic").unwrap();
    let state = classic.mood_state(MoodInput::new(100.0, 100.0, 100.0));
    assert_eq!(state.description, "happy mood (1.00) with high energy (1.00) and intense vibe (1.00)");

    let extended = FuzzyEngine::from_preset("extended").unwrap();
    let state = extended.mood_state(MoodInput::new(100.0, 100.0, 100.0));
    assert_eq!(state.description, "excited mood (1.00) with high energy (1.00) and party vibe (1.00)");
}

#[test]
fn test_identical_inputs_give_identical_results() {
    let config = moodtune_engine::presets::load("extended").unwrap();
    let a = FuzzyEngine::from_config(&config).unwrap();
    let b = FuzzyEngine::from_config(&config).unwrap();

    for input in grid().step_by(37) {
        let ra = a.recommend(input);
        let rb = b.recommend(input);
        assert_eq!(ra.len(), rb.len());
        for (x, y) in ra.iter().zip(&rb) {
            assert_eq!(x.key, y.key);
            assert_eq!(x.strength.to_bits(), y.strength.to_bits());
        }
        assert_eq!(a.mood_state(input), a.mood_state(input));
    }
}

/// Reverse the rules of each category within that category's own slots
fn shuffle_within_categories(rules: &[Rule]) -> Vec<Rule> {
    let mut out = rules.to_vec();
    let mut seen: Vec<&str> = Vec::new();
    for rule in rules {
        if seen.contains(&rule.category.as_str()) {
            continue;
        }
        seen.push(&rule.category);
        let slots: Vec<usize> = (0..rules.len())
            .filter(|&i| rules[i].category == rule.category)
            .collect();
        for (slot, source) in slots.iter().zip(slots.iter().rev()) {
            out[*slot] = rules[*source].clone();
        }
    }
    out
}

#[test]
fn test_rule_order_does_not_change_results() {
    for name in PRESETS {
        let config = moodtune_engine::presets::load(name).unwrap();
        let engine = FuzzyEngine::from_config(&config).unwrap();

        let mut shuffled = config.clone();
        shuffled.rules = shuffle_within_categories(&config.rules);
        assert_ne!(shuffled.rules, config.rules);
        let shuffled = FuzzyEngine::from_config(&shuffled).unwrap();

        let mut reversed = config.clone();
        reversed.rules.reverse();
        let reversed = FuzzyEngine::from_config(&reversed).unwrap();

        for input in grid() {
            let expected = engine.recommend(input);
            assert_eq!(shuffled.recommend(input), expected, "{} {:?}", name, input);

            // Full reversal can reorder tied categories but never their strengths
            let mut got: Vec<(String, u64)> = reversed
                .recommend(input)
                .into_iter()
                .map(|r| (r.key, r.strength.to_bits()))
                .collect();
            let mut want: Vec<(String, u64)> = expected
                .into_iter()
                .map(|r| (r.key, r.strength.to_bits()))
                .collect();
            got.sort();
            want.sort();
            assert_eq!(got, want);
        }
    }
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = std::sync::Arc::new(FuzzyEngine::from_preset("extended").unwrap());
    let expected = engine.recommend(MoodInput::new(80.0, 60.0, 70.0));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.recommend(MoodInput::new(80.0, 60.0, 70.0)))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_recommendation_serializes_for_callers() {
    let engine = FuzzyEngine::from_preset("extended").unwrap();
    let top = engine.top_recommendation(MoodInput::new(75.0, 90.0, 90.0)).unwrap();
    let json = serde_json::to_value(&top).unwrap();
    assert_eq!(json["category"], "Hip Hop");
    assert_eq!(json["strength_percent"], 90);
}
