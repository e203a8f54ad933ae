//! Vision classification module
//!
//! Defines the contract for a multimodal classification model and ships a
//! client for the Google Generative Language API.

mod gemini_client;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini_client::GeminiClient;

/// One classification request; identical for every model tier
#[derive(Debug, Clone, Copy)]
pub struct VisionRequest<'a> {
    pub system_instruction: &'a str,
    pub mime_type: &'a str,
    pub image_base64: &'a str,
    /// Structured-output schema the model must follow
    pub response_schema: &'a serde_json::Value,
}

#[derive(Debug, Clone, Error)]
pub enum VisionError {
    #[error("API credential is missing")]
    MissingCredential,

    #[error("API credential was rejected: {0}")]
    InvalidCredential(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode service response: {0}")]
    Decode(String),
}

/// A multimodal model that answers an image plus instruction with text
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Run one generation against `model`, returning the raw response text
    async fn generate(&self, model: &str, request: VisionRequest<'_>) -> Result<String, VisionError>;
}
