// Directional connection scoring between adjacent units.
//
// Estimates how well unit B continues from unit A as a weighted blend of
// three terms, each in [0, 1]:
// - lexical: Jaccard similarity of the full token sets
// - topic: Jaccard similarity of A's trailing window against B's leading
//   window, which is what makes the score direction-sensitive
// - length: 1 minus the relative difference in token counts
//
// The document total is the plain sum over adjacent pairs in current order,
// so it ranges over [0, n - 1] and is only comparable between permutations
// of the same units.

use crate::config::ScoringWeights;
use crate::tokenize::tokenize;
use crate::types::{Unit, round3};
use std::collections::HashSet;

/// Jaccard similarity of two token lists taken as sets. Zero when either
/// side is empty.
pub fn jaccard<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let set_a: HashSet<&str> = a.iter().map(S::as_ref).collect();
    let set_b: HashSet<&str> = b.iter().map(S::as_ref).collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    let shared = set_a.intersection(&set_b).count();
    let union = set_a.len() + set_b.len() - shared;
    shared as f64 / union as f64
}

/// Connection score for `text_b` following `text_a`, with default weights.
pub fn score_connection(text_a: &str, text_b: &str) -> f64 {
    score_connection_with(text_a, text_b, &ScoringWeights::default())
}

pub fn score_connection_with(text_a: &str, text_b: &str, weights: &ScoringWeights) -> f64 {
    let tokens_a = tokenize(text_a);
    let tokens_b = tokenize(text_b);

    let lexical = jaccard(&tokens_a, &tokens_b);

    let tail = &tokens_a[tokens_a.len().saturating_sub(weights.topic_window)..];
    let head = &tokens_b[..tokens_b.len().min(weights.topic_window)];
    let topic = jaccard(tail, head);

    let longest = tokens_a.len().max(tokens_b.len());
    let length = if longest == 0 {
        0.0
    } else {
        1.0 - tokens_a.len().abs_diff(tokens_b.len()) as f64 / longest as f64
    };

    let raw = weights.lexical * lexical + weights.topic * topic + weights.length * length;
    round3(raw.clamp(0.0, 1.0))
}

/// Sum of connection scores over adjacent pairs. Zero for fewer than two units.
pub fn total_connection_score(units: &[Unit]) -> f64 {
    total_connection_score_with(units, &ScoringWeights::default())
}

pub fn total_connection_score_with(units: &[Unit], weights: &ScoringWeights) -> f64 {
    connection_total(units.iter().map(Unit::text), weights)
}

/// Adjacent-pair total over texts in the given order. Shared with the
/// optimizer, which walks index permutations instead of `Unit` slices.
pub(crate) fn connection_total<'a>(
    texts: impl Iterator<Item = &'a str>,
    weights: &ScoringWeights,
) -> f64 {
    let mut total = 0.0;
    let mut prev: Option<&str> = None;
    for text in texts {
        if let Some(p) = prev {
            total += score_connection_with(p, text, weights);
        }
        prev = Some(text);
    }
    round3(total)
}
