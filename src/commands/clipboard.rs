//! Clipboard collaborator. Failure is non-fatal: logged, reported as
//! `false`, never an error.

use tauri::AppHandle;
use tauri_plugin_clipboard_manager::ClipboardExt;

#[tauri::command]
pub fn copy_to_clipboard(text: String, app: AppHandle) -> bool {
    match app.clipboard().write_text(text) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("clipboard write failed: {}", e);
            false
        }
    }
}
