//! Selection & export coordinator.
//!
//! Owns everything the UI binds to: the raw input text, the last
//! successful extraction, the selected-field set, and the last error.
//! A failed parse never disturbs an earlier successful one.

use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::{FieldSummary, GroupedData};
use crate::parser::{self, ParseError};

/// User-recoverable coordinator errors
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum WorkspaceError {
    /// Parse attempted with empty or whitespace-only input
    #[error("Please paste some JSON first.")]
    InputMissing,

    /// Structural parse failure
    #[error("Invalid JSON format. Please check your input.")]
    InvalidJson,

    /// Well-formed JSON that contained none of the recognized sub-structures
    #[error("JSON parsed successfully, but no matching fields (master_prompts, audio, text) were found.")]
    NoMatchingFields,

    /// AI request while another one is still in flight for this session
    #[error("An AI request is already in progress. Please wait for it to finish.")]
    AiRequestInFlight,
}

impl From<ParseError> for WorkspaceError {
    fn from(_: ParseError) -> Self {
        WorkspaceError::InvalidJson
    }
}

/// Coordinator state. One logical owner: commands lock the containing
/// mutex, so nothing here needs interior synchronization.
#[derive(Debug, Default)]
pub struct Workspace {
    input: String,
    grouped: Option<GroupedData>,
    keys: Vec<String>,
    selected: BTreeSet<String>,
    last_error: Option<WorkspaceError>,
    ai_in_flight: bool,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw` and, on success, replace the current extraction
    /// wholesale with all fields selected. Any failure records the error
    /// and leaves prior parsed state untouched.
    pub fn parse(&mut self, raw: &str) -> Result<Vec<FieldSummary>, WorkspaceError> {
        self.input = raw.to_string();

        if raw.trim().is_empty() {
            return Err(self.record(WorkspaceError::InputMissing));
        }

        let result = match parser::extract(raw) {
            Ok(result) => result,
            Err(e) => return Err(self.record(e.into())),
        };

        if result.keys.is_empty() {
            return Err(self.record(WorkspaceError::NoMatchingFields));
        }

        tracing::info!(
            "parsed scene JSON: {} fields, {} values",
            result.keys.len(),
            result.grouped.values().map(Vec::len).sum::<usize>()
        );

        self.selected = result.keys.iter().cloned().collect();
        self.keys = result.keys;
        self.grouped = Some(result.grouped);
        self.last_error = None;
        Ok(self.summaries())
    }

    /// Reset everything to initial empty values.
    pub fn clear(&mut self) {
        *self = Self {
            ai_in_flight: self.ai_in_flight,
            ..Self::default()
        };
    }

    /// Flip a field's membership in the selection set. Unknown names are
    /// ignored so a stale name can never be reintroduced.
    pub fn toggle_field(&mut self, name: &str) -> Vec<FieldSummary> {
        // Mutation rebuilds the set as a new value rather than aliasing it
        let mut next = self.selected.clone();
        if !next.remove(name) && self.keys.iter().any(|k| k == name) {
            next.insert(name.to_string());
        }
        self.selected = next;
        self.summaries()
    }

    /// Render one field's values as numbered text. Unknown field or empty
    /// list renders as the empty string.
    pub fn format_field(&self, name: &str) -> String {
        self.grouped
            .as_ref()
            .and_then(|g| g.get(name))
            .map(|values| parser::format_field_content(values))
            .unwrap_or_default()
    }

    /// Current field list with counts and selection flags, in key order.
    pub fn summaries(&self) -> Vec<FieldSummary> {
        let grouped = match &self.grouped {
            Some(g) => g,
            None => return Vec::new(),
        };

        self.keys
            .iter()
            .map(|name| FieldSummary {
                name: name.clone(),
                count: grouped.get(name).map_or(0, Vec::len),
                selected: self.selected.contains(name),
            })
            .collect()
    }

    /// `(filename, content)` pairs for every currently selected field,
    /// in key order.
    pub fn selected_entries(&self) -> Vec<(String, String)> {
        self.keys
            .iter()
            .filter(|name| self.selected.contains(*name))
            .map(|name| (format!("{}.txt", name), self.format_field(name)))
            .collect()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.keys.iter().any(|k| k == name)
    }

    pub fn last_error(&self) -> Option<&WorkspaceError> {
        self.last_error.as_ref()
    }

    /// Claim the single AI slot for this review session.
    pub fn begin_ai_request(&mut self) -> Result<(), WorkspaceError> {
        if self.ai_in_flight {
            return Err(WorkspaceError::AiRequestInFlight);
        }
        self.ai_in_flight = true;
        Ok(())
    }

    pub fn finish_ai_request(&mut self) {
        self.ai_in_flight = false;
    }

    fn record(&mut self, error: WorkspaceError) -> WorkspaceError {
        self.last_error = Some(error.clone());
        error
    }
}

/// Managed Tauri state wrapping the coordinator
pub struct WorkspaceState(pub Mutex<Workspace>);

impl WorkspaceState {
    pub fn new() -> Self {
        Self(Mutex::new(Workspace::new()))
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"master_prompts": {"visual": "city", "voiceover": "hello"}},
        {"layers": {"audio_engineering": {"visual": "desert", "sfx": "rain"}}}
    ]"#;

    fn parsed() -> Workspace {
        let mut ws = Workspace::new();
        ws.parse(SAMPLE).unwrap();
        ws
    }

    #[test]
    fn test_parse_selects_all_fields() {
        let ws = parsed();
        assert_eq!(ws.keys(), ["sfx", "visual", "voiceover"]);
        let summaries = ws.summaries();
        assert!(summaries.iter().all(|s| s.selected));
        assert_eq!(summaries[1].name, "visual");
        assert_eq!(summaries[1].count, 2);
        assert!(ws.last_error().is_none());
    }

    #[test]
    fn test_empty_input_is_missing() {
        let mut ws = Workspace::new();
        assert_eq!(ws.parse("   \n\t").unwrap_err(), WorkspaceError::InputMissing);
        assert_eq!(ws.last_error(), Some(&WorkspaceError::InputMissing));
        assert!(ws.keys().is_empty());
    }

    #[test]
    fn test_failed_parse_preserves_prior_state() {
        let mut ws = parsed();

        let err = ws.parse("{broken").unwrap_err();
        assert_eq!(err, WorkspaceError::InvalidJson);

        // Prior extraction and selection survive, only the error changes
        assert_eq!(ws.keys(), ["sfx", "visual", "voiceover"]);
        assert!(ws.summaries().iter().all(|s| s.selected));
        assert_eq!(ws.last_error(), Some(&err));
    }

    #[test]
    fn test_no_matching_fields_preserves_prior_state() {
        let mut ws = parsed();

        let err = ws.parse(r#"[{"foo": "bar"}]"#).unwrap_err();
        assert_eq!(err, WorkspaceError::NoMatchingFields);
        assert_eq!(ws.keys(), ["sfx", "visual", "voiceover"]);
    }

    #[test]
    fn test_successful_reparse_replaces_wholesale() {
        let mut ws = parsed();
        ws.toggle_field("visual");

        ws.parse(r#"[{"master_prompts": {"only": "one"}}]"#).unwrap();
        assert_eq!(ws.keys(), ["only"]);
        // Selection resets to all fields of the new parse
        assert!(ws.summaries().iter().all(|s| s.selected));
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut ws = parsed();

        let before = ws.summaries();
        ws.toggle_field("visual");
        assert!(!ws.summaries()[1].selected);
        ws.toggle_field("visual");
        assert_eq!(ws.summaries(), before);
    }

    #[test]
    fn test_toggle_unknown_name_is_noop() {
        let mut ws = parsed();
        let before = ws.summaries();
        ws.toggle_field("stale_field");
        assert_eq!(ws.summaries(), before);
    }

    #[test]
    fn test_format_field() {
        let ws = parsed();
        assert_eq!(ws.format_field("visual"), "1. city\n\n2. desert");
        assert_eq!(ws.format_field("missing"), "");
    }

    #[test]
    fn test_selected_entries_follow_selection() {
        let mut ws = parsed();
        ws.toggle_field("visual");
        ws.toggle_field("voiceover");

        let entries = ws.selected_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "sfx.txt");
        assert_eq!(entries[0].1, "1. rain");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut ws = parsed();
        ws.clear();

        assert!(ws.input().is_empty());
        assert!(ws.keys().is_empty());
        assert!(ws.summaries().is_empty());
        assert!(ws.last_error().is_none());
        assert_eq!(ws.format_field("visual"), "");
    }

    #[test]
    fn test_single_ai_request_in_flight() {
        let mut ws = parsed();

        ws.begin_ai_request().unwrap();
        assert_eq!(
            ws.begin_ai_request().unwrap_err(),
            WorkspaceError::AiRequestInFlight
        );
        ws.finish_ai_request();
        ws.begin_ai_request().unwrap();
    }
}
