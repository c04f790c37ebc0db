// Core data types shared by the scorers and the optimizer.
//
// `Intent` is the author's declared judgment criteria and is only ever read
// by scoring. `Unit` is one structural element (scene, section) whose text is
// scored and whose position in a `Document` is what the optimizer reorders.
// `Score` is the derived per-unit annotation produced by
// `composite::unit_scores`; it is never treated as input.
//
// Serialized field names follow the stored document JSON: a unit's derived
// score lives under `_score`, and unrecognized document/unit keys are carried
// through untouched in `extra` so that a load/optimize/save cycle does not
// drop data owned by the editing layer.

use crate::intent::intent_from_value;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The author's intent in its flat, typed form.
///
/// Stored documents may carry older or nested shapes; see `intent.rs` for the
/// translation into this struct.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub genre: String,
    pub theme_or_claim: String,
    pub core_values: String,
    /// Textual rules whose literal appearance in a unit is penalized.
    pub constraints: Vec<String>,
}

/// Derived scores for one unit in its current position.
///
/// `prev` is absent for the first unit and `next` for the last. Every present
/// value lies in [0.0, 1.0] and is rounded to three decimals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub intent: Option<f64>,
    pub prev: Option<f64>,
    pub next: Option<f64>,
}

/// One orderable element of a document.
///
/// The scored payload is read from `content`, falling back to `text` and then
/// `summary` when older records lack it. Only `content` is written back; the
/// fallback keys stay in `extra` untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredUnit")]
pub struct Unit {
    pub title: String,
    pub content: String,
    #[serde(rename = "_score", skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct StoredUnit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(rename = "_score", default)]
    score: Option<Score>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<StoredUnit> for Unit {
    fn from(stored: StoredUnit) -> Self {
        let fallback = |key: &str| {
            stored
                .extra
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let content = stored
            .content
            .or_else(|| fallback("text"))
            .or_else(|| fallback("summary"))
            .unwrap_or_default();
        Unit {
            title: stored.title,
            content,
            score: stored.score,
            extra: stored.extra,
        }
    }
}

impl Unit {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Unit {
            title: title.into(),
            content: content.into(),
            score: None,
            extra: Map::new(),
        }
    }

    /// The scored payload.
    pub fn text(&self) -> &str {
        &self.content
    }
}

/// A document: read-only intent plus the unit sequence under optimization.
///
/// `stored_intent` is the intent exactly as the editing layer saved it (flat,
/// legacy or nested `fields` form) and is what gets written back. `intent` is
/// the flat view derived from it at load time for scoring.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredDocument", into = "StoredDocument")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub doc_type: String,
    pub intent: Intent,
    pub stored_intent: Value,
    pub units: Vec<Unit>,
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize)]
struct StoredDocument {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    doc_type: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    intent: Value,
    #[serde(default)]
    units: Vec<Unit>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<StoredDocument> for Document {
    fn from(stored: StoredDocument) -> Self {
        Document {
            id: stored.id,
            title: stored.title,
            doc_type: stored.doc_type,
            intent: intent_from_value(&stored.intent),
            stored_intent: stored.intent,
            units: stored.units,
            extra: stored.extra,
        }
    }
}

impl From<Document> for StoredDocument {
    fn from(doc: Document) -> Self {
        // Documents built in code have no stored form; write the flat intent.
        let intent = if doc.stored_intent.is_null() && doc.intent != Intent::default() {
            serde_json::to_value(&doc.intent).unwrap_or(Value::Null)
        } else {
            doc.stored_intent
        };
        StoredDocument {
            id: doc.id,
            title: doc.title,
            doc_type: doc.doc_type,
            intent,
            units: doc.units,
            extra: doc.extra,
        }
    }
}

impl Document {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&data)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Round to three decimal places, the precision every reported score uses.
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
