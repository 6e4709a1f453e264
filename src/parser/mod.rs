//! Scene JSON extraction.
//!
//! Walks a JSON array of scene objects and collects every string-valued
//! entry from the three known sub-structures (`master_prompts`,
//! `layers.audio_engineering`, `layers.tiktok_native`) into one
//! field-name -> values map. All other structure is ignored.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{GroupedData, ParsedResult};

/// Errors from the extraction pass
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ParseError {
    /// Malformed JSON, or a top-level value that is not an array.
    /// The message is intentionally generic; the underlying serde error
    /// is logged, never surfaced.
    #[error("Invalid JSON format. Please check your input.")]
    InvalidJson,
}

/// Parse a scene JSON array and group string fields by name.
///
/// Pure and deterministic: identical input yields identical output.
/// Non-string values, missing sub-structures, and sub-structures that
/// are not objects are silently skipped.
pub fn extract(raw: &str) -> Result<ParsedResult, ParseError> {
    let data: Value = serde_json::from_str(raw).map_err(|e| {
        tracing::debug!("scene JSON rejected: {}", e);
        ParseError::InvalidJson
    })?;

    let scenes = data.as_array().ok_or(ParseError::InvalidJson)?;

    let mut grouped = GroupedData::new();
    for scene in scenes {
        let layers = scene.get("layers");
        collect_strings(scene.get("master_prompts"), &mut grouped);
        collect_strings(layers.and_then(|l| l.get("audio_engineering")), &mut grouped);
        collect_strings(layers.and_then(|l| l.get("tiktok_native")), &mut grouped);
    }

    let keys = grouped.keys().cloned().collect();
    Ok(ParsedResult { grouped, keys })
}

/// Append every string-valued entry of `source` to its field's list,
/// preserving the document order of the object's entries.
fn collect_strings(source: Option<&Value>, grouped: &mut GroupedData) {
    let Some(map) = source.and_then(Value::as_object) else {
        return;
    };

    for (key, value) in map {
        if let Value::String(text) = value {
            grouped.entry(key.clone()).or_default().push(text.clone());
        }
    }
}

/// Render a field's values as a 1-indexed list, entries separated by a
/// blank line. One code path for both display and export.
pub fn format_field_content(values: &[String]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{}. {}", i + 1, v))
        .collect::<Vec<_>>()
        .join("\n\n")
}
