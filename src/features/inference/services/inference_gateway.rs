use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::core::error::AppError;
use crate::features::inference::models::{ImagePayload, RawClassification};
use crate::features::inference::services::{locate_or_default, GeolocationProvider};
use crate::features::tickets::models::TicketDraft;
use crate::modules::vision::{VisionError, VisionModel, VisionRequest};
use crate::shared::llm::{parse_structured, preview};

/// Why a single model tier did not produce a classification
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TierFailure {
    #[error("API credential is missing")]
    CredentialMissing,

    #[error("API credential was rejected: {0}")]
    CredentialRejected(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("empty response")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<VisionError> for TierFailure {
    fn from(e: VisionError) -> Self {
        match e {
            VisionError::MissingCredential => TierFailure::CredentialMissing,
            VisionError::InvalidCredential(message) => TierFailure::CredentialRejected(message),
            other => TierFailure::Transport(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("All {} model tiers failed", .attempts.len())]
    Exhausted { attempts: Vec<(String, TierFailure)> },
}

impl From<InferenceError> for AppError {
    fn from(e: InferenceError) -> Self {
        tracing::error!("{}", e);
        AppError::ExternalServiceError("Vision analysis failed".to_string())
    }
}

/// Classifies images through an ordered list of model tiers
///
/// Tiers are tried one after another and the first success wins. Each attempt
/// looks up the reporter's position on its own.
pub struct InferenceGateway {
    model: Arc<dyn VisionModel>,
    tiers: Vec<String>,
    instruction: String,
    response_schema: serde_json::Value,
    geolocation_timeout: Duration,
}

impl InferenceGateway {
    pub fn new(
        model: Arc<dyn VisionModel>,
        tiers: Vec<String>,
        instruction: String,
        geolocation_timeout: Duration,
    ) -> Self {
        Self {
            model,
            tiers,
            instruction,
            response_schema: RawClassification::response_schema(),
            geolocation_timeout,
        }
    }

    pub async fn analyze(
        &self,
        image: &ImagePayload,
        geolocation: &dyn GeolocationProvider,
    ) -> Result<TicketDraft, InferenceError> {
        let mut attempts = Vec::with_capacity(self.tiers.len());

        for tier in &self.tiers {
            match self.attempt(tier, image, geolocation).await {
                Ok(draft) => {
                    tracing::info!(
                        "Image classified by {}: category={}, confidence={}",
                        tier,
                        draft.category,
                        draft.confidence_level.value()
                    );
                    return Ok(draft);
                }
                Err(failure) => {
                    tracing::warn!("Model tier {} failed: {}", tier, failure);
                    attempts.push((tier.clone(), failure));
                }
            }
        }

        Err(InferenceError::Exhausted { attempts })
    }

    async fn attempt(
        &self,
        tier: &str,
        image: &ImagePayload,
        geolocation: &dyn GeolocationProvider,
    ) -> Result<TicketDraft, TierFailure> {
        let location = locate_or_default(geolocation, self.geolocation_timeout).await;

        let request = VisionRequest {
            system_instruction: &self.instruction,
            mime_type: image.mime_type(),
            image_base64: image.base64_data(),
            response_schema: &self.response_schema,
        };

        let text = self.model.generate(tier, request).await?;
        if text.trim().is_empty() {
            return Err(TierFailure::EmptyResponse);
        }

        tracing::debug!("Raw response from {}: {}", tier, preview(&text));

        parse_structured::<RawClassification>(&text)
            .and_then(|raw| raw.into_draft(location, tier))
            .map_err(TierFailure::MalformedResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::super::geolocation::GeolocationError;
    use super::*;
    use crate::features::inference::services::ClientReportedLocation;
    use crate::features::tickets::models::{Category, Coordinates};
    use crate::shared::test_helpers::ScriptedVisionModel;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ANSWER: &str = r#"{"detectedIssue":"Exposed wiring","category":"Electrical",
        "severityLevel":"High","reasonForSeverity":"Shock hazard","possibleRisks":"Electrocution",
        "suggestedDepartment":"Electrical Maintenance","confidenceLevel":0.9}"#;

    /// Position source that counts lookups and fails every other one
    struct CountingLocation {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl GeolocationProvider for CountingLocation {
        async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
            let n = self.lookups.fetch_add(1, Ordering::SeqCst);
            if n % 2 == 0 {
                Err(GeolocationError::Unavailable)
            } else {
                Ok(Coordinates::new(28.75, 77.11))
            }
        }
    }

    fn gateway(model: Arc<ScriptedVisionModel>) -> InferenceGateway {
        InferenceGateway::new(
            model,
            vec!["primary".to_string(), "secondary".to_string()],
            "inspect".to_string(),
            Duration::from_millis(100),
        )
    }

    fn image() -> ImagePayload {
        ImagePayload::parse("data:image/jpeg;base64,/9j/4AAQ").unwrap()
    }

    fn location() -> ClientReportedLocation {
        ClientReportedLocation(Some(Coordinates::new(28.75, 77.11)))
    }

    async fn secondary_after(primary: &str) -> TicketDraft {
        let model = Arc::new(
            ScriptedVisionModel::default()
                .answer("primary", Ok(primary))
                .answer("secondary", Ok(ANSWER)),
        );
        let draft = gateway(model.clone())
            .analyze(&image(), &location())
            .await
            .unwrap();
        assert_eq!(model.calls(), vec!["primary", "secondary"]);
        draft
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let model = Arc::new(ScriptedVisionModel::default().answer("primary", Ok(ANSWER)));
        let draft = gateway(model.clone())
            .analyze(&image(), &location())
            .await
            .unwrap();

        assert_eq!(draft.model, "primary");
        assert_eq!(draft.category, Category::Electrical);
        assert_eq!(draft.location, Coordinates::new(28.75, 77.11));
        assert_eq!(model.calls(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_falls_back_to_secondary() {
        let model = Arc::new(
            ScriptedVisionModel::default()
                .answer("primary", Err(VisionError::Transport("timeout".to_string())))
                .answer("secondary", Ok(ANSWER)),
        );
        let draft = gateway(model.clone())
            .analyze(&image(), &location())
            .await
            .unwrap();

        assert_eq!(draft.model, "secondary");
        assert_eq!(draft.confidence_level.value(), 90);
        assert_eq!(model.calls(), vec!["primary", "secondary"]);
    }

    #[tokio::test]
    async fn test_prose_primary_falls_back() {
        let draft = secondary_after("I cannot see anything useful").await;
        assert_eq!(draft.model, "secondary");
    }

    #[tokio::test]
    async fn test_truncated_primary_falls_back() {
        let truncated = r#"{"detectedIssue":"Leak","category":"Plumbing","severityLevel":"High",
            "reasonForSeverity":"Water on floor","possibleRisks":"Slipping",
            "suggestedDepartment":"Plumbing Cell","confidenceLevel":0.8"#;

        let draft = secondary_after(truncated).await;
        assert_eq!(draft.model, "secondary");
        assert_eq!(draft.detected_issue, "Exposed wiring");
    }

    #[tokio::test]
    async fn test_trailing_comma_primary_falls_back() {
        let trailing = r#"{"detectedIssue":"Leak","category":"Plumbing","severityLevel":"High",
            "reasonForSeverity":"Water on floor","possibleRisks":"Slipping",
            "suggestedDepartment":"Plumbing Cell","confidenceLevel":80,}"#;

        let draft = secondary_after(trailing).await;
        assert_eq!(draft.model, "secondary");
    }

    #[tokio::test]
    async fn test_missing_confidence_primary_falls_back() {
        let no_confidence = r#"{"detectedIssue":"Leak","category":"Plumbing","severityLevel":"High",
            "reasonForSeverity":"Water on floor","possibleRisks":"Slipping",
            "suggestedDepartment":"Plumbing Cell"}"#;

        let draft = secondary_after(no_confidence).await;
        assert_eq!(draft.model, "secondary");
        assert_eq!(draft.confidence_level.value(), 90);
    }

    #[tokio::test]
    async fn test_rejected_key_is_a_credential_failure() {
        let model = Arc::new(
            ScriptedVisionModel::default()
                .answer(
                    "primary",
                    Err(VisionError::InvalidCredential("API key not valid".to_string())),
                )
                .answer("secondary", Ok(ANSWER)),
        );
        let draft = gateway(model).analyze(&image(), &location()).await.unwrap();
        assert_eq!(draft.model, "secondary");

        assert_eq!(
            TierFailure::from(VisionError::InvalidCredential("API key not valid".to_string())),
            TierFailure::CredentialRejected("API key not valid".to_string())
        );
    }

    #[tokio::test]
    async fn test_both_tiers_fail() {
        let model = Arc::new(
            ScriptedVisionModel::default()
                .answer("primary", Err(VisionError::MissingCredential))
                .answer("secondary", Ok("   ")),
        );
        let err = gateway(model.clone())
            .analyze(&image(), &location())
            .await
            .unwrap_err();

        let InferenceError::Exhausted { attempts } = err;
        assert_eq!(
            attempts,
            vec![
                ("primary".to_string(), TierFailure::CredentialMissing),
                ("secondary".to_string(), TierFailure::EmptyResponse),
            ]
        );
        assert_eq!(model.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_geolocation_is_looked_up_per_tier() {
        let model = Arc::new(
            ScriptedVisionModel::default()
                .answer("primary", Err(VisionError::Transport("timeout".to_string())))
                .answer("secondary", Ok(ANSWER)),
        );
        let provider = CountingLocation {
            lookups: AtomicUsize::new(0),
        };

        let draft = gateway(model).analyze(&image(), &provider).await.unwrap();

        assert_eq!(provider.lookups.load(Ordering::SeqCst), 2);
        assert_eq!(draft.model, "secondary");
        assert_eq!(draft.location, Coordinates::new(28.75, 77.11));
    }

    #[tokio::test]
    async fn test_missing_location_uses_origin() {
        let model = Arc::new(ScriptedVisionModel::default().answer("primary", Ok(ANSWER)));
        let draft = gateway(model)
            .analyze(&image(), &ClientReportedLocation::default())
            .await
            .unwrap();
        assert_eq!(draft.location, Coordinates::UNAVAILABLE);
    }

    #[test]
    fn test_exhausted_maps_to_bad_gateway_message() {
        let err = AppError::from(InferenceError::Exhausted { attempts: vec![] });
        assert!(matches!(
            err,
            AppError::ExternalServiceError(ref msg) if msg == "Vision analysis failed"
        ));
    }
}
