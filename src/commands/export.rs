//! Export commands: single-field text files and the combined archive.

use std::path::Path;
use tauri::State;

use crate::export;
use crate::workspace::WorkspaceState;

/// Outcome of a combined export
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub archive_path: String,
    pub entry_count: usize,
}

/// Write one field as `{name}.txt` into `dest_dir`, returns the path
#[tauri::command]
pub async fn export_field(
    name: String,
    dest_dir: String,
    state: State<'_, WorkspaceState>,
) -> Result<String, String> {
    let ws = state.0.lock().await;

    if !ws.has_field(&name) {
        return Err(format!("Unknown field: {}", name));
    }

    let content = ws.format_field(&name);
    drop(ws);

    let path = export::write_field_txt(Path::new(&dest_dir), &name, &content)
        .map_err(|e| e.to_string())?;
    Ok(path.to_string_lossy().to_string())
}

/// Bundle every selected field into one zip archive at `dest` (a file
/// path, or a directory to use the default archive name)
#[tauri::command]
pub async fn export_selected(
    dest: String,
    state: State<'_, WorkspaceState>,
) -> Result<ExportSummary, String> {
    let ws = state.0.lock().await;
    let entries = ws.selected_entries();
    drop(ws);

    let path = export::write_archive(Path::new(&dest), &entries).map_err(|e| e.to_string())?;

    Ok(ExportSummary {
        archive_path: path.to_string_lossy().to_string(),
        entry_count: entries.len(),
    })
}
