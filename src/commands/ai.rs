//! AI review commands and Gemini API key management.

use tauri::State;

use crate::ai::{self, CredentialManager, GeminiClient, GeminiModel};
use crate::workspace::WorkspaceState;

/// Run an AI request against one field's formatted content.
/// At most one request may be in flight per review session; overlapping
/// calls are rejected rather than queued.
#[tauri::command]
pub async fn generate_ai_response(
    field: String,
    prompt: String,
    thinking: bool,
    state: State<'_, WorkspaceState>,
) -> Result<String, String> {
    if prompt.trim().is_empty() {
        return Err("Prompt cannot be empty.".to_string());
    }

    let context = {
        let mut ws = state.0.lock().await;
        if !ws.has_field(&field) {
            return Err(format!("Unknown field: {}", field));
        }
        ws.begin_ai_request().map_err(|e| e.to_string())?;
        ws.format_field(&field)
    };

    let model = GeminiModel::from_thinking_flag(thinking);
    tracing::info!("AI request for field '{}' using {}", field, model.as_str());

    let result = match GeminiClient::new() {
        Ok(client) => client.generate(model, &prompt, &context).await,
        Err(e) => Err(e),
    };

    // Release the slot whether the call succeeded or not; parsed and
    // selection state are never affected by an AI failure.
    let mut ws = state.0.lock().await;
    ws.finish_ai_request();

    result
}

/// Quick-pick prompts for the review surface
#[tauri::command]
pub fn suggested_prompts() -> Vec<String> {
    ai::prompts::SUGGESTED_PROMPTS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// Validate and store a Gemini API key. Returns false if the provider
/// rejected the key.
#[tauri::command]
pub async fn set_api_key(api_key: String) -> Result<bool, String> {
    let is_valid = GeminiClient::validate_api_key(&api_key).await?;
    if !is_valid {
        tracing::warn!("Gemini API key validation failed");
        return Ok(false);
    }

    CredentialManager::store_api_key(ai::GEMINI_PROVIDER, &api_key)?;
    Ok(true)
}

/// Remove the stored Gemini API key
#[tauri::command]
pub fn delete_api_key() -> Result<(), String> {
    CredentialManager::delete_api_key(ai::GEMINI_PROVIDER)
}

/// Whether a Gemini key is available from the environment or the store
#[tauri::command]
pub fn check_api_key() -> bool {
    ai::has_gemini_api_key()
}
