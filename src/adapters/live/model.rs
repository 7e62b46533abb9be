//! Live adapter for the `ModelClient` port using the Gemini API.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::model::{CompletionFuture, CompletionRequest, CompletionResponse, ModelClient};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live model client that calls the Gemini `generateContent` API.
pub struct GeminiClient {
    client: Client,
}

impl GeminiClient {
    /// Creates a new live Gemini client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body sent to the Gemini API.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

/// One content turn in the Gemini request.
#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

/// A text part of a content turn.
#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Generation parameters for one request.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

/// Top-level response from the Gemini API.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: UsageMetadata,
}

/// One response candidate.
#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

/// The content of a response candidate.
#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

/// A text part of a response candidate.
#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// Token usage reported by the Gemini API.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

/// Error response from the Gemini API.
#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

/// Detail inside a Gemini error response.
#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl ModelClient for GeminiClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let model = request.model.clone();
        let prompt = request.prompt.clone();
        let max_tokens = request.max_tokens;

        Box::pin(async move {
            let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
                Box::<dyn std::error::Error + Send + Sync>::from(
                    "GEMINI_API_KEY environment variable not set",
                )
            })?;

            let body = GeminiRequest {
                contents: vec![RequestContent { parts: vec![RequestPart { text: &prompt }] }],
                generation_config: GenerationConfig { max_output_tokens: max_tokens },
            };

            let url = format!("{GEMINI_API_URL}/{model}:generateContent");
            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Gemini API request failed: {e}").into()
                })?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read Gemini API response: {e}").into()
                })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<GeminiError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(format!("Gemini API error ({}): {msg}", status.as_u16()).into());
            }

            let api_response: GeminiResponse = serde_json::from_str(&response_text).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse Gemini API response: {e}").into()
                },
            )?;

            let candidate = api_response
                .candidates
                .into_iter()
                .next()
                .ok_or("Gemini API returned no candidates")?;
            let text =
                candidate.content.parts.into_iter().map(|part| part.text).collect::<String>();

            Ok(CompletionResponse {
                text,
                prompt_tokens: api_response.usage_metadata.prompt_token_count,
                completion_tokens: api_response.usage_metadata.candidates_token_count,
            })
        })
    }
}
