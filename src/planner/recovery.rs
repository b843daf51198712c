//! Recovery of JSON values embedded in free-form model output.
//!
//! Models wrap JSON in prose or markdown fences and sometimes emit near-miss
//! JSON: trailing commas, or separators missing at line breaks. The helpers
//! here slice out the outermost candidate, repair those defects with a fixed
//! sequence of textual substitutions, and only then hand the text to
//! `serde_json`.
//!
//! Slicing uses the first opening and last closing bracket. It is not a
//! balanced scan, so braces emitted after the JSON block end up inside the
//! candidate and make the parse fail.

use crate::{Error, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::error;

static MISSING_STRING_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""\s*\n\s*""#).expect("valid regex"));
static MISSING_OBJECT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\}\s*\n\s*\{").expect("valid regex"));
static TRAILING_COMMA_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\]").expect("valid regex"));
static TRAILING_COMMA_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\}").expect("valid regex"));

/// Slice from the first `{` to the last `}` inclusive, or the whole text
/// when either is missing.
pub fn slice_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Slice from the first `[` to the last `]` inclusive.
pub fn slice_array(text: &str) -> Option<&str> {
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => Some(&text[start..=end]),
        _ => None,
    }
}

/// Applies the repair substitutions in order.
pub fn repair(candidate: &str) -> String {
    let repaired = MISSING_STRING_SEPARATOR.replace_all(candidate, "\",\n\"");
    let repaired = MISSING_OBJECT_SEPARATOR.replace_all(&repaired, "},\n{");
    let repaired = TRAILING_COMMA_ARRAY.replace_all(&repaired, "]");
    let repaired = TRAILING_COMMA_OBJECT.replace_all(&repaired, "}");
    repaired.into_owned()
}

/// Extracts and repairs the JSON object embedded in `text`.
pub fn extract_object(text: &str) -> Result<Map<String, Value>> {
    let repaired = repair(slice_object(text));

    match parse_value(&repaired)? {
        Value::Object(map) => Ok(map),
        other => Err(reject(
            format!("expected a JSON object, found {}", kind_of(&other)),
            repaired,
        )),
    }
}

/// Extracts and repairs the JSON array embedded in `text`.
pub fn extract_array(text: &str) -> Result<Vec<Value>> {
    let Some(candidate) = slice_array(text) else {
        return Err(reject("no JSON array found in model output", text));
    };
    let repaired = repair(candidate);

    match parse_value(&repaired)? {
        Value::Array(items) => Ok(items),
        other => Err(reject(
            format!("expected a JSON array, found {}", kind_of(&other)),
            repaired,
        )),
    }
}

/// Object path followed by a typed conversion. Shape mismatches are
/// reported as recovery failures carrying the repaired text.
pub fn parse_object<T: DeserializeOwned>(text: &str) -> Result<T> {
    let map = extract_object(text)?;
    serde_json::from_value(Value::Object(map))
        .map_err(|e| reject(e.to_string(), repair(slice_object(text))))
}

/// Array path followed by a typed conversion.
pub fn parse_array<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let items = extract_array(text)?;
    serde_json::from_value(Value::Array(items)).map_err(|e| {
        let candidate = slice_array(text).map(repair).unwrap_or_default();
        reject(e.to_string(), candidate)
    })
}

fn parse_value(repaired: &str) -> Result<Value> {
    serde_json::from_str(repaired).map_err(|e| reject(e.to_string(), repaired))
}

fn reject(message: impl Into<String>, candidate: impl Into<String>) -> Error {
    let (message, candidate) = (message.into(), candidate.into());
    error!(%message, %candidate, "Failed to recover JSON from model output");
    Error::recovery_parse(message, candidate)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_slice_object_passthrough_without_braces() {
        assert_eq!(slice_object("no json here"), "no json here");
        assert_eq!(slice_object("} backwards {"), "} backwards {");
    }

    #[test]
    fn test_slice_array_is_greedy() {
        assert_eq!(
            slice_array("terms: [\"a\", [\"b\"]] done"),
            Some("[\"a\", [\"b\"]]")
        );
        assert_eq!(slice_array("nothing"), None);
    }

    #[test]
    fn test_repair_order() {
        let broken = "{\"a\": [1, 2,],\n\"b\": \"x\"\n\"c\": \"y\",}";
        assert_eq!(
            repair(broken),
            "{\"a\": [1, 2],\n\"b\": \"x\",\n\"c\": \"y\"}"
        );
    }

    #[test]
    fn test_candidate_is_repaired_text() {
        let err = extract_object("prefix {\"a\": [1,], \"b\": } suffix").unwrap_err();
        assert_eq!(err.candidate(), Some("{\"a\": [1], \"b\": }"));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = extract_object("\"just a string\"").unwrap_err();
        assert!(matches!(err, Error::RecoveryParse { .. }));
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn test_typed_array() {
        let terms: Vec<String> =
            parse_array("Here you go:\n```json\n[\"Eiffel Tower\",\n\"Louvre\",\n]\n```").unwrap();
        assert_eq!(terms, vec!["Eiffel Tower", "Louvre"]);
    }

    #[test]
    fn test_typed_array_shape_mismatch() {
        let err = parse_array::<String>("[1, 2]").unwrap_err();
        assert_eq!(err.candidate(), Some("[1, 2]"));
    }

    #[test]
    fn test_object_value_preserved() {
        let map = extract_object("{\"nested\": {\"list\": [1, {\"x\": null}]}}").unwrap();
        assert_eq!(
            Value::Object(map),
            json!({"nested": {"list": [1, {"x": null}]}})
        );
    }
}
