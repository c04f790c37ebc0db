// Translation of stored intent JSON into the flat `Intent`.
//
// Documents saved over the editor's lifetime carry their intent in one of
// three shapes:
// - flat: `{genre, theme_or_claim, core_values, constraints: [...]}`
// - legacy flat: `values` instead of `core_values`
// - nested: `{fields: {key: {label, value}}}`, or `fields` as a list of
//   `{key, label, value}` objects. A constraints value here is usually a
//   newline-joined string.
//
// The scorers only understand the flat form, so every shape is normalized at
// this boundary. Translation never fails: anything unrecognized degrades to
// empty strings and an empty constraint list.

use crate::types::Intent;
use serde_json::{Map, Value};

/// Build an `Intent` from whatever the document stored under `intent`.
pub fn intent_from_value(value: &Value) -> Intent {
    let Some(obj) = value.as_object() else {
        return Intent::default();
    };

    match obj.get("fields") {
        Some(Value::Object(fields)) => from_field_map(fields),
        Some(Value::Array(fields)) => from_field_list(fields),
        _ => from_flat(obj),
    }
}

fn from_flat(obj: &Map<String, Value>) -> Intent {
    // `core_values` wins over the legacy `values` key when both exist.
    let core_values = match obj.get("core_values") {
        Some(v) => string_of(v),
        None => obj.get("values").map(string_of).unwrap_or_default(),
    };

    let constraints = match obj.get("constraints") {
        Some(Value::Array(items)) => items.iter().filter_map(constraint_entry).collect(),
        _ => Vec::new(),
    };

    Intent {
        genre: obj.get("genre").map(string_of).unwrap_or_default(),
        theme_or_claim: obj.get("theme_or_claim").map(string_of).unwrap_or_default(),
        core_values,
        constraints,
    }
}

fn from_field_map(fields: &Map<String, Value>) -> Intent {
    let pairs = fields
        .iter()
        .map(|(key, field)| (key.as_str(), field_value(field)));
    from_pairs(pairs)
}

fn from_field_list(fields: &[Value]) -> Intent {
    let pairs = fields.iter().filter_map(|field| {
        let key = field.get("key")?.as_str()?;
        Some((key, field_value(field)))
    });
    from_pairs(pairs)
}

fn from_pairs<'a>(pairs: impl Iterator<Item = (&'a str, Value)>) -> Intent {
    let mut intent = Intent::default();
    let mut saw_core_values = false;
    for (key, value) in pairs {
        match key {
            "genre" => intent.genre = string_of(&value),
            "theme_or_claim" => intent.theme_or_claim = string_of(&value),
            "core_values" => {
                intent.core_values = string_of(&value);
                saw_core_values = true;
            }
            "values" if !saw_core_values => intent.core_values = string_of(&value),
            "constraints" => intent.constraints = constraints_of(&value),
            _ => {}
        }
    }
    intent
}

/// The `value` of a nested field. A bare scalar is accepted as its own value.
fn field_value(field: &Value) -> Value {
    match field {
        Value::Object(obj) => obj.get("value").cloned().unwrap_or(Value::Null),
        other => other.clone(),
    }
}

fn constraints_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(constraint_entry).collect(),
        Value::String(s) => s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn constraint_entry(value: &Value) -> Option<String> {
    let s = string_of(value);
    if s.is_empty() { None } else { Some(s) }
}

fn string_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(string_of).collect::<Vec<_>>().join("\n"),
        other => other.to_string(),
    }
}
