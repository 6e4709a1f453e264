use serde::Serialize;
use std::collections::BTreeMap;

/// Field name -> extracted string values, in scene order.
///
/// A BTreeMap keeps serialization deterministic and makes the sorted key
/// list fall out of the map itself.
pub type GroupedData = BTreeMap<String, Vec<String>>;

/// Result of one extraction pass over a scene array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResult {
    /// Extracted values grouped by field name
    pub grouped: GroupedData,
    /// Field names, lexicographically ascending
    pub keys: Vec<String>,
}

/// Per-field line for the field filter panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSummary {
    /// Field name as found in the scene JSON
    pub name: String,
    /// Number of string values collected for this field
    pub count: usize,
    /// Whether the field is currently included in view/export
    pub selected: bool,
}
