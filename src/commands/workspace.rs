//! Parse, selection, and formatting commands.

use tauri::State;

use crate::models::FieldSummary;
use crate::workspace::WorkspaceState;

/// Parse a scene JSON array and return the field filter rows.
/// On any failure the previous successful parse is left untouched.
#[tauri::command]
pub async fn parse_scene_json(
    input: String,
    state: State<'_, WorkspaceState>,
) -> Result<Vec<FieldSummary>, String> {
    let mut ws = state.0.lock().await;
    ws.parse(&input).map_err(|e| e.to_string())
}

/// Reset input, parsed data, selection, and error to initial values
#[tauri::command]
pub async fn clear_workspace(state: State<'_, WorkspaceState>) -> Result<(), String> {
    let mut ws = state.0.lock().await;
    ws.clear();
    Ok(())
}

/// Flip a field's membership in the selection set
#[tauri::command]
pub async fn toggle_field(
    name: String,
    state: State<'_, WorkspaceState>,
) -> Result<Vec<FieldSummary>, String> {
    let mut ws = state.0.lock().await;
    Ok(ws.toggle_field(&name))
}

/// Current field list with counts and selection flags
#[tauri::command]
pub async fn field_summaries(
    state: State<'_, WorkspaceState>,
) -> Result<Vec<FieldSummary>, String> {
    let ws = state.0.lock().await;
    Ok(ws.summaries())
}

/// Render one field's values as numbered text. The same rendering feeds
/// the on-screen card and every export path.
#[tauri::command]
pub async fn format_field(
    name: String,
    state: State<'_, WorkspaceState>,
) -> Result<String, String> {
    let ws = state.0.lock().await;
    Ok(ws.format_field(&name))
}
