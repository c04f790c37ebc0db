// Intent-alignment scoring for a single unit.
//
// Each of the intent's genre, theme and values fields is split into keywords
// and scored by the fraction of keywords found (case-insensitively) anywhere
// in the unit text. The three fractions are blended by weight, then every
// constraint that appears in the text subtracts a fixed penalty. Constraints
// are things the author forbids, so their presence counts against the unit.
//
// The result is clamped to [0, 1] and rounded to three decimals. Empty text
// always scores zero.

use crate::config::ScoringWeights;
use crate::tokenize::split_keywords;
use crate::types::{Intent, Unit, round3};

/// Fraction of `keywords` contained in `text`, ignoring case. Zero for an
/// empty text or an empty keyword list.
pub fn keyword_overlap<S: AsRef<str>>(text: &str, keywords: &[S]) -> f64 {
    if text.is_empty() || keywords.is_empty() {
        return 0.0;
    }
    let haystack = text.to_lowercase();
    let hits = keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .filter(|k| haystack.contains(k.as_str()))
        .count();
    hits as f64 / keywords.len() as f64
}

/// Number of non-empty constraints present in `text`, ignoring case.
pub fn constraint_violations(intent: &Intent, text: &str) -> usize {
    let haystack = text.to_lowercase();
    intent
        .constraints
        .iter()
        .filter(|c| !c.is_empty() && haystack.contains(&c.to_lowercase()))
        .count()
}

/// Alignment of `unit_text` with `intent`, with default weights.
pub fn score_alignment(intent: &Intent, unit_text: &str) -> f64 {
    score_alignment_with(intent, unit_text, &ScoringWeights::default())
}

pub fn score_alignment_with(intent: &Intent, unit_text: &str, weights: &ScoringWeights) -> f64 {
    if unit_text.is_empty() {
        return 0.0;
    }

    let genre = keyword_overlap(unit_text, &split_keywords(&intent.genre));
    let theme = keyword_overlap(unit_text, &split_keywords(&intent.theme_or_claim));
    let values = keyword_overlap(unit_text, &split_keywords(&intent.core_values));

    let raw = weights.genre * genre + weights.theme * theme + weights.values * values;
    let penalty = weights.constraint_penalty * constraint_violations(intent, unit_text) as f64;

    round3((raw - penalty).clamp(0.0, 1.0))
}

/// Sum of per-unit alignment scores. Unbounded above.
pub fn total_alignment_score(intent: &Intent, units: &[Unit]) -> f64 {
    total_alignment_score_with(intent, units, &ScoringWeights::default())
}

pub fn total_alignment_score_with(
    intent: &Intent,
    units: &[Unit],
    weights: &ScoringWeights,
) -> f64 {
    units
        .iter()
        .map(|u| score_alignment_with(intent, u.text(), weights))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(genre: &str, theme: &str, values: &str, constraints: &[&str]) -> Intent {
        Intent {
            genre: genre.into(),
            theme_or_claim: theme.into(),
            core_values: values.into(),
            constraints: constraints.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn empty_text_scores_zero() {
        let i = intent("sf", "freedom", "courage", &[]);
        assert_eq!(score_alignment(&i, ""), 0.0);
    }

    #[test]
    fn overlap_is_case_insensitive_fraction() {
        assert_eq!(keyword_overlap("The SHIP sails", &["ship", "sea"]), 0.5);
        assert_eq!(keyword_overlap::<&str>("text", &[]), 0.0);
        assert_eq!(keyword_overlap("", &["x"]), 0.0);
    }

    #[test]
    fn full_match_scores_one() {
        let i = intent("sf", "freedom", "courage", &[]);
        assert_eq!(score_alignment(&i, "SF tale of freedom and courage"), 1.0);
    }

    #[test]
    fn weights_per_field() {
        let i = intent("sf", "freedom", "courage", &[]);
        assert_eq!(score_alignment(&i, "pure sf"), 0.25);
        assert_eq!(score_alignment(&i, "about freedom"), 0.35);
        assert_eq!(score_alignment(&i, "about courage"), 0.4);
    }

    #[test]
    fn constraint_penalty_applies() {
        let i = intent("sf", "freedom", "courage", &["magic"]);
        let clean = score_alignment(&i, "sf freedom courage");
        let tainted = score_alignment(&i, "sf freedom courage magic");
        assert_eq!(clean, 1.0);
        assert_eq!(tainted, 0.8);
        assert!(clean - tainted >= 0.2 - 1e-9);
    }

    #[test]
    fn penalties_accumulate_and_clamp_at_zero() {
        let i = intent("sf", "", "", &["magic", "dragon", "MAGIC"]);
        // raw 0.25, penalty 0.6
        assert_eq!(score_alignment(&i, "sf magic dragon"), 0.0);
        assert_eq!(constraint_violations(&i, "sf magic dragon"), 3);
    }

    #[test]
    fn empty_constraints_are_ignored() {
        let i = intent("sf", "", "", &["", ""]);
        assert_eq!(score_alignment(&i, "sf"), 0.25);
    }

    #[test]
    fn empty_intent_scores_zero() {
        assert_eq!(score_alignment(&Intent::default(), "anything at all"), 0.0);
    }

    #[test]
    fn total_sums_units() {
        let i = intent("sf", "freedom", "", &[]);
        let units = vec![Unit::new("a", "sf"), Unit::new("b", "freedom"), Unit::new("c", "")];
        assert!((total_alignment_score(&i, &units) - 0.6).abs() < 1e-9);
        assert_eq!(total_alignment_score(&i, &[]), 0.0);
    }
}
