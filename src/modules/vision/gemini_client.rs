//! Google Generative Language (Gemini) client
//!
//! Calls `models/{model}:generateContent` with the image inlined as base64 and
//! structured JSON output requested through `generationConfig`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{VisionError, VisionModel, VisionRequest};
use crate::core::config::VisionConfig;
use crate::core::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

fn build_request_body<'a>(request: &VisionRequest<'a>) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![
                Part::Text {
                    text: request.system_instruction,
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: request.mime_type,
                        data: request.image_base64,
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: request.response_schema,
        },
    }
}

/// Concatenated text of the first candidate; empty when there is none
fn response_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Vision client for the Gemini REST API
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Map a non-2xx reply to an error, separating rejected keys from other failures
///
/// The service answers an unknown key with 400 `API_KEY_INVALID` and a key
/// without access with 401 or 403.
fn status_error(status: StatusCode, body: String) -> VisionError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(&body).ok();
    let key_rejected = envelope.as_ref().is_some_and(|e| {
        e.error.message.contains("API key")
            || e.error.details.iter().any(|d| d.reason.as_deref() == Some("API_KEY_INVALID"))
    });
    let message = envelope.map(|e| e.error.message).unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => VisionError::InvalidCredential(message),
        StatusCode::BAD_REQUEST if key_rejected => VisionError::InvalidCredential(message),
        _ => VisionError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

impl GeminiClient {
    pub fn new(config: &VisionConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent("CampusInspectCore/0.1 (maintenance-reporting)")
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl VisionModel for GeminiClient {
    async fn generate(&self, model: &str, request: VisionRequest<'_>) -> Result<String, VisionError> {
        if self.api_key.trim().is_empty() {
            return Err(VisionError::MissingCredential);
        }

        let url = self.endpoint(model);
        debug!("Calling vision model {} ({} base64 bytes)", model, request.image_base64.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request_body(&request))
            .send()
            .await
            .map_err(|e| VisionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| VisionError::Decode(e.to_string()))?;

        Ok(response_text(parsed))
    }
}
