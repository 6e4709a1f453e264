use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::credentials::resolve_gemini_api_key;
use super::prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Token budget for extended reasoning in thinking mode
const THINKING_BUDGET_TOKENS: u32 = 32768;

/// The only AI failure message the UI ever sees. Upstream detail is
/// logged, never surfaced.
pub const AI_FAILURE_MESSAGE: &str = "Failed to generate AI response. Please try again.";

/// Gemini model variants
pub enum GeminiModel {
    /// Low latency, the default
    Fast,
    /// Extended reasoning at higher latency and cost
    Thinking,
}

impl GeminiModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeminiModel::Fast => "gemini-2.5-flash",
            GeminiModel::Thinking => "gemini-3-pro-preview",
        }
    }

    pub fn from_thinking_flag(thinking: bool) -> Self {
        if thinking {
            GeminiModel::Thinking
        } else {
            GeminiModel::Fast
        }
    }
}

/// API request body
#[derive(Serialize)]
struct ApiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

/// API response body
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// API error response
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Gemini API client
pub struct GeminiClient {
    client: Client,
}

impl GeminiClient {
    pub fn new() -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;
        Ok(Self { client })
    }

    /// Send a review request: the field's formatted content as context
    /// plus the user's prompt. Errors come back as the generic failure
    /// message; a missing API key is the one exception since the user
    /// can act on it.
    pub async fn generate(
        &self,
        model: GeminiModel,
        prompt: &str,
        context_data: &str,
    ) -> Result<String, String> {
        let api_key = resolve_gemini_api_key()?;

        let generation_config = match model {
            GeminiModel::Fast => None,
            GeminiModel::Thinking => Some(GenerationConfig {
                thinking_config: ThinkingConfig {
                    thinking_budget: THINKING_BUDGET_TOKENS,
                },
            }),
        };

        let request = ApiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompts::build_review_prompt(prompt, context_data),
                }],
            }],
            generation_config,
        };

        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, model.as_str());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Gemini request failed: {}", e);
                AI_FAILURE_MESSAGE.to_string()
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => {
                    tracing::warn!("Gemini API error ({}): {}", status, api_error.error.message)
                }
                Err(_) => tracing::warn!("Gemini API error ({}): {}", status, error_text),
            }
            return Err(AI_FAILURE_MESSAGE.to_string());
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse Gemini response: {}", e);
            AI_FAILURE_MESSAGE.to_string()
        })?;

        let text = api_response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Ok("No response generated.".to_string());
        }

        Ok(text.to_string())
    }

    /// Validate an API key by making a minimal request
    pub async fn validate_api_key(api_key: &str) -> Result<bool, String> {
        let client = Client::new();

        let request = ApiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "test".to_string(),
                }],
            }],
            generation_config: None,
        };

        let url = format!(
            "{}/{}:generateContent",
            GEMINI_API_BASE,
            GeminiModel::Fast.as_str()
        );

        let response = client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Ok(response.status().is_success())
    }
}
