use base64::Engine;
use std::fs;
use std::path::PathBuf;

pub const GEMINI_PROVIDER: &str = "gemini";

/// Credential manager using file storage under the platform config dir.
/// Keys are base64-encoded for minimal obfuscation, not encryption.
pub struct CredentialManager;

impl CredentialManager {
    fn key_path(provider: &str) -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join("scenejson-pro")
                .join(format!("{}_key", provider))
        })
    }

    /// Store an API key for a provider
    pub fn store_api_key(provider: &str, api_key: &str) -> Result<(), String> {
        let path = Self::key_path(provider).ok_or("Could not determine config directory")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(api_key);
        fs::write(&path, encoded).map_err(|e| format!("Failed to write API key: {}", e))?;

        tracing::info!("stored API key for '{}' at {}", provider, path.display());
        Ok(())
    }

    /// Get an API key from file storage
    pub fn get_api_key(provider: &str) -> Result<String, String> {
        let path = Self::key_path(provider).ok_or("Could not determine config directory")?;
        if !path.exists() {
            return Err("API key not found".to_string());
        }

        let encoded =
            fs::read_to_string(&path).map_err(|e| format!("Failed to read API key: {}", e))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| format!("Stored API key is corrupt: {}", e))?;
        String::from_utf8(bytes).map_err(|e| format!("Stored API key is corrupt: {}", e))
    }

    /// Delete an API key from file storage
    pub fn delete_api_key(provider: &str) -> Result<(), String> {
        if let Some(path) = Self::key_path(provider) {
            if path.exists() {
                fs::remove_file(&path)
                    .map_err(|e| format!("Failed to delete API key file: {}", e))?;
                tracing::info!("deleted API key for '{}'", provider);
            }
        }

        Ok(())
    }

    /// Check if an API key is configured
    pub fn has_api_key(provider: &str) -> bool {
        Self::get_api_key(provider).is_ok()
    }
}

/// Resolve the Gemini API key. Priority: env vars, then the credential
/// store. The key itself never crosses the command boundary.
pub fn resolve_gemini_api_key() -> Result<String, String> {
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        return Ok(key);
    }
    if let Ok(key) = std::env::var("API_KEY") {
        return Ok(key);
    }

    CredentialManager::get_api_key(GEMINI_PROVIDER).map_err(|_| {
        "No Gemini API key found. Set GEMINI_API_KEY in .env or configure it in settings."
            .to_string()
    })
}

/// Check whether a Gemini key is available from any source
pub fn has_gemini_api_key() -> bool {
    std::env::var("GEMINI_API_KEY").is_ok()
        || std::env::var("API_KEY").is_ok()
        || CredentialManager::has_api_key(GEMINI_PROVIDER)
}
