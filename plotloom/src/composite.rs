// Document-level composite scoring and per-unit score decoration.
//
// `story_score` is the optimizer's objective: a weighted sum of the total
// intent alignment and the total adjacent-pair connection. It grows with the
// number of units and is only meaningful when comparing orderings of the
// same unit set.
//
// `unit_scores` computes the display annotation for each unit in its current
// position without touching the units; `attach_scores` is the explicit
// mutating variant that writes those annotations into `Unit::score`.
// `ScoreBand` buckets a score for presentation only.

use crate::alignment::score_alignment_with;
use crate::config::ScoringWeights;
use crate::connection::{connection_total, score_connection_with};
use crate::types::{Intent, Score, Unit};

/// Composite objective with default weights.
pub fn story_score(intent: &Intent, units: &[Unit]) -> f64 {
    story_score_with(intent, units, &ScoringWeights::default())
}

pub fn story_score_with(intent: &Intent, units: &[Unit], weights: &ScoringWeights) -> f64 {
    story_score_texts(intent, units.iter().map(Unit::text), weights)
}

/// Objective over texts in the given order.
pub(crate) fn story_score_texts<'a, I>(intent: &Intent, texts: I, weights: &ScoringWeights) -> f64
where
    I: Iterator<Item = &'a str> + Clone,
{
    let alignment: f64 = texts
        .clone()
        .map(|t| score_alignment_with(intent, t, weights))
        .sum();
    let connection = connection_total(texts, weights);
    weights.story_alignment * alignment + weights.story_connection * connection
}

/// Per-unit scores for the current order, indexed like `units`.
pub fn unit_scores(intent: &Intent, units: &[Unit]) -> Vec<Score> {
    unit_scores_with(intent, units, &ScoringWeights::default())
}

pub fn unit_scores_with(intent: &Intent, units: &[Unit], weights: &ScoringWeights) -> Vec<Score> {
    units
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            let prev = i
                .checked_sub(1)
                .map(|p| score_connection_with(units[p].text(), unit.text(), weights));
            let next = units
                .get(i + 1)
                .map(|n| score_connection_with(unit.text(), n.text(), weights));
            Score {
                intent: Some(score_alignment_with(intent, unit.text(), weights)),
                prev,
                next,
            }
        })
        .collect()
}

/// Overwrite each unit's `score` with a freshly computed annotation.
///
/// Mutates `units`. Prefer `unit_scores` when the caller does not own the
/// sequence.
pub fn attach_scores(intent: &Intent, units: &mut [Unit]) {
    attach_scores_with(intent, units, &ScoringWeights::default());
}

pub fn attach_scores_with(intent: &Intent, units: &mut [Unit], weights: &ScoringWeights) {
    let scores = unit_scores_with(intent, units, weights);
    for (unit, score) in units.iter_mut().zip(scores) {
        unit.score = Some(score);
    }
}

/// Display band for a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreBand {
    Absent,
    Low,
    Medium,
    High,
}

impl ScoreBand {
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Absent => "absent",
            ScoreBand::Low => "low",
            ScoreBand::Medium => "medium",
            ScoreBand::High => "high",
        }
    }

    /// The editor's traffic-light color for this band.
    pub fn color(self) -> &'static str {
        match self {
            ScoreBand::Absent => "black",
            ScoreBand::Low => "red",
            ScoreBand::Medium => "orange",
            ScoreBand::High => "green",
        }
    }
}

pub fn score_to_band(score: Option<f64>) -> ScoreBand {
    score_to_band_with(score, &ScoringWeights::default())
}

pub fn score_to_band_with(score: Option<f64>, weights: &ScoringWeights) -> ScoreBand {
    match score {
        None => ScoreBand::Absent,
        Some(s) if s < weights.low_band => ScoreBand::Low,
        Some(s) if s < weights.high_band => ScoreBand::Medium,
        Some(_) => ScoreBand::High,
    }
}

/// Indices of units whose intent score falls in the low band.
pub fn low_alignment_units(scores: &[Score]) -> Vec<usize> {
    low_alignment_units_with(scores, &ScoringWeights::default())
}

pub fn low_alignment_units_with(scores: &[Score], weights: &ScoringWeights) -> Vec<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, s)| score_to_band_with(s.intent, weights) == ScoreBand::Low)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::total_alignment_score;
    use crate::connection::{score_connection, total_connection_score};

    fn sample() -> (Intent, Vec<Unit>) {
        let intent = Intent {
            genre: "sf".into(),
            theme_or_claim: "freedom".into(),
            core_values: "courage".into(),
            constraints: vec!["betrayal".into()],
        };
        let units = vec![
            Unit::new("launch", "the sf ship launches toward freedom"),
            Unit::new("plot", "a betrayal is planned aboard the ship"),
            Unit::new("end", "freedom won with courage"),
        ];
        (intent, units)
    }

    #[test]
    fn story_score_is_weighted_sum() {
        let (intent, units) = sample();
        let expected =
            0.6 * total_alignment_score(&intent, &units) + 0.4 * total_connection_score(&units);
        assert!((story_score(&intent, &units) - expected).abs() < 1e-9);
    }

    #[test]
    fn story_score_of_empty_document_is_zero() {
        assert_eq!(story_score(&Intent::default(), &[]), 0.0);
    }

    #[test]
    fn unit_scores_boundaries_are_absent() {
        let (intent, units) = sample();
        let scores = unit_scores(&intent, &units);
        assert_eq!(scores.len(), 3);
        assert!(scores[0].prev.is_none());
        assert!(scores[2].next.is_none());
        assert_eq!(scores[0].next, scores[1].prev);
        assert_eq!(
            scores[1].next,
            Some(score_connection(units[1].text(), units[2].text()))
        );
    }

    #[test]
    fn single_unit_has_only_intent() {
        let (intent, units) = sample();
        let scores = unit_scores(&intent, &units[..1]);
        assert_eq!(scores[0].prev, None);
        assert_eq!(scores[0].next, None);
        assert!(scores[0].intent.is_some());
    }

    #[test]
    fn unit_scores_leave_units_untouched() {
        let (intent, units) = sample();
        let before = units.clone();
        let _ = unit_scores(&intent, &units);
        assert_eq!(units, before);
    }

    #[test]
    fn attach_scores_replaces_stale_annotations() {
        let (intent, mut units) = sample();
        units[0].score = Some(Score {
            intent: Some(0.999),
            prev: Some(0.999),
            next: None,
        });
        attach_scores(&intent, &mut units);
        let fresh = unit_scores(&intent, &units);
        for (unit, score) in units.iter().zip(fresh) {
            assert_eq!(unit.score, Some(score));
        }
        assert!(units[0].score.unwrap().prev.is_none());
    }

    #[test]
    fn bands() {
        assert_eq!(score_to_band(None), ScoreBand::Absent);
        assert_eq!(score_to_band(Some(0.0)), ScoreBand::Low);
        assert_eq!(score_to_band(Some(0.299)), ScoreBand::Low);
        assert_eq!(score_to_band(Some(0.3)), ScoreBand::Medium);
        assert_eq!(score_to_band(Some(0.599)), ScoreBand::Medium);
        assert_eq!(score_to_band(Some(0.6)), ScoreBand::High);
        assert_eq!(score_to_band(Some(1.0)), ScoreBand::High);
        assert!(ScoreBand::Low < ScoreBand::Medium && ScoreBand::Medium < ScoreBand::High);
        assert_eq!(ScoreBand::Low.color(), "red");
    }

    fn intent_only(intent: Option<f64>) -> Score {
        Score {
            intent,
            ..Score::default()
        }
    }

    #[test]
    fn band_colors_are_distinct() {
        let bands = [ScoreBand::Absent, ScoreBand::Low, ScoreBand::Medium, ScoreBand::High];
        let colors: Vec<&str> = bands.iter().map(|b| b.color()).collect();
        assert_eq!(colors, ["black", "red", "orange", "green"]);
        assert_eq!(score_to_band(Some(0.45)).label(), "medium");
    }

    #[test]
    fn low_units_skip_absent_scores() {
        let scores = vec![
            intent_only(Some(0.1)),
            intent_only(None),
            intent_only(Some(0.7)),
            intent_only(Some(0.29)),
        ];
        assert_eq!(low_alignment_units(&scores), vec![0, 3]);
    }
}
