// Revision suggestions for weakly aligned units.
//
// Units whose intent score lands in the low band are candidates for rewriting.
// For each one a prompt is rendered from the author's intent and the unit,
// handed to a `SuggestionSource`, and the reply is decoded into a list of
// suggestion strings. The source itself (an LLM client, a canned fixture in
// tests) lives outside this crate.

use crate::composite::low_alignment_units_with;
use crate::config::ScoringWeights;
use crate::types::{Intent, Score, Unit};
use serde::Deserialize;
use tracing::warn;

/// Anything that can turn a prompt into suggestion strings.
pub trait SuggestionSource {
    fn suggest(&mut self, prompt: &str) -> Result<Vec<String>, String>;
}

/// Suggestions (or the failure) for one low-scoring unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Revision {
    pub index: usize,
    pub suggestions: Result<Vec<String>, String>,
}

#[derive(Deserialize)]
struct SuggestionReply {
    suggestions: Vec<String>,
}

/// Prompt asking for a rewritten body of `unit` that honors `intent`.
pub fn build_revision_prompt(intent: &Intent, unit: &Unit) -> String {
    let mut prompt = String::new();
    prompt.push_str("You are an editor of multi-part written works.\n");
    prompt.push_str("Revise the unit below so that it follows the author's intent.\n\n");

    prompt.push_str("[Author's intent]\n");
    prompt.push_str(&format!("Genre: {}\n", intent.genre));
    prompt.push_str(&format!("Theme or claim: {}\n", intent.theme_or_claim));
    prompt.push_str(&format!("Core values: {}\n", intent.core_values));
    prompt.push_str("Constraints:\n");
    for constraint in &intent.constraints {
        prompt.push_str(&format!("- {constraint}\n"));
    }

    prompt.push_str("\n[Unit]\n");
    prompt.push_str(&format!("Title: {}\n", unit.title));
    prompt.push_str(&format!("Content:\n{}\n", unit.content));

    prompt.push_str("\n[Instructions]\n");
    prompt.push_str("- Align the unit with the author's intent\n");
    prompt.push_str("- Make it more concrete\n");
    prompt.push_str("- Make its role in the whole work clear\n");
    prompt.push_str("Reply only with JSON of the form {\"suggestions\": [\"...\"]}.\n");

    prompt.trim().to_string()
}

/// Decode a `{"suggestions": [...]}` reply, with or without a Markdown fence.
pub fn parse_suggestions(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    let reply: SuggestionReply = serde_json::from_str(strip_code_fence(raw))?;
    Ok(reply.suggestions)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Ask `source` for revisions of every low-band unit, in document order.
///
/// A failing source is recorded in that unit's `Revision` and the remaining
/// units are still processed.
pub fn request_revisions(
    source: &mut dyn SuggestionSource,
    intent: &Intent,
    units: &[Unit],
    scores: &[Score],
    weights: &ScoringWeights,
) -> Vec<Revision> {
    low_alignment_units_with(scores, weights)
        .into_iter()
        .filter_map(|index| units.get(index).map(|unit| (index, unit)))
        .map(|(index, unit)| {
            let prompt = build_revision_prompt(intent, unit);
            let suggestions = source.suggest(&prompt);
            if let Err(e) = &suggestions {
                warn!(index, title = %unit.title, error = %e, "suggestion request failed");
            }
            Revision { index, suggestions }
        })
        .collect()
}
