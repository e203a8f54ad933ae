use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::capture::dtos::{AnalyzeImageDto, CaptureResponseDto, UploadImageDto};
use crate::features::capture::services::{CaptureOutcome, CaptureService};
use crate::features::inference::models::ImagePayload;
use crate::features::inference::services::ClientReportedLocation;
use crate::shared::constants::MAX_IMAGE_SIZE;
use crate::shared::types::ApiResponse;

fn respond(outcome: CaptureOutcome) -> (StatusCode, Json<ApiResponse<CaptureResponseDto>>) {
    match outcome {
        CaptureOutcome::Created(_) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(outcome.into()),
                Some("Diagnostic ticket created".to_string()),
                None,
            )),
        ),
        CaptureOutcome::Busy => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(outcome.into()),
                Some("Analysis already in progress, request ignored".to_string()),
                None,
            )),
        ),
    }
}

fn parse_coordinate(name: &str, text: &str) -> Result<Option<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("{} must be a number", name)))
}

/// Classify a captured camera frame
#[utoipa::path(
    post,
    path = "/api/capture/analyze",
    request_body = AnalyzeImageDto,
    responses(
        (status = 201, description = "Ticket created", body = ApiResponse<CaptureResponseDto>),
        (status = 200, description = "Another analysis is running, request ignored", body = ApiResponse<CaptureResponseDto>),
        (status = 400, description = "Invalid image payload"),
        (status = 502, description = "Vision analysis failed")
    ),
    tag = "capture"
)]
pub async fn analyze_capture(
    State(service): State<Arc<CaptureService>>,
    AppJson(dto): AppJson<AnalyzeImageDto>,
) -> Result<(StatusCode, Json<ApiResponse<CaptureResponseDto>>)> {
    dto.validate()?;

    let image = ImagePayload::parse(&dto.image)?;
    let location = ClientReportedLocation::from_parts(dto.latitude, dto.longitude);

    let outcome = service.analyze(image, Arc::new(location)).await?;
    Ok(respond(outcome))
}

/// Classify an uploaded image file
///
/// Accepts multipart/form-data with:
/// - `file`: the image (required, image/* only)
/// - `latitude`, `longitude`: optional reporter position
#[utoipa::path(
    post,
    path = "/api/capture/upload",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image upload with optional coordinates",
    ),
    responses(
        (status = 201, description = "Ticket created", body = ApiResponse<CaptureResponseDto>),
        (status = 200, description = "Another analysis is running, request ignored", body = ApiResponse<CaptureResponseDto>),
        (status = 400, description = "Missing, invalid or oversized file"),
        (status = 502, description = "Vision analysis failed")
    ),
    tag = "capture"
)]
pub async fn upload_capture(
    State(service): State<Arc<CaptureService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<CaptureResponseDto>>)> {
    let mut file: Option<(Vec<u8>, String)> = None;
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file = Some((data.to_vec(), content_type));
            }
            "latitude" | "longitude" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read {} field: {}", field_name, e))
                })?;
                let value = parse_coordinate(&field_name, &text)?;
                if field_name == "latitude" {
                    latitude = value;
                } else {
                    longitude = value;
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let (data, content_type) =
        file.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    if data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "File size exceeds maximum allowed size of {} bytes",
            MAX_IMAGE_SIZE
        )));
    }

    let image = ImagePayload::from_bytes(&data, &content_type)?;
    let location = ClientReportedLocation::from_parts(latitude, longitude);

    let outcome = service.analyze(image, Arc::new(location)).await?;
    Ok(respond(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::capture::routes;
    use crate::features::inference::InferenceGateway;
    use crate::features::tickets::TicketService;
    use crate::shared::test_helpers::{StaticVisionModel, SAMPLE_CLASSIFICATION, SAMPLE_IMAGE};
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn server(model: StaticVisionModel) -> (TestServer, Arc<TicketService>) {
        let gateway = Arc::new(InferenceGateway::new(
            Arc::new(model),
            vec!["primary".to_string()],
            "inspect".to_string(),
            Duration::from_millis(50),
        ));
        let tickets = Arc::new(TicketService::new(None));
        let capture = Arc::new(CaptureService::new(gateway, tickets.clone()));
        (TestServer::new(routes(capture)).unwrap(), tickets)
    }

    #[tokio::test]
    async fn test_analyze_creates_ticket() {
        let (server, tickets) = server(StaticVisionModel::answering(SAMPLE_CLASSIFICATION));

        let response = server
            .post("/api/capture/analyze")
            .json(&json!({"image": SAMPLE_IMAGE, "latitude": 28.75, "longitude": 77.11}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "created");
        assert_eq!(body["data"]["ticket"]["imageUrl"], SAMPLE_IMAGE);
        assert_eq!(body["data"]["ticket"]["confidenceLevel"], 90);
        assert_eq!(body["data"]["ticket"]["latitude"], 28.75);
        assert_eq!(
            body["data"]["ticket"]["presentation"]["icon"],
            "fa-triangle-exclamation"
        );
        assert_eq!(tickets.list_pending().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_payload() {
        let (server, tickets) = server(StaticVisionModel::answering(SAMPLE_CLASSIFICATION));

        server
            .post("/api/capture/analyze")
            .json(&json!({"image": "data:image/jpeg;base64,@@@"}))
            .await
            .assert_status_bad_request();

        server
            .post("/api/capture/analyze")
            .json(&json!({"image": SAMPLE_IMAGE, "latitude": 123.0, "longitude": 0.0}))
            .await
            .assert_status_bad_request();

        assert!(tickets.list_pending().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_failure_is_bad_gateway() {
        let (server, tickets) = server(StaticVisionModel::failing());

        let response = server
            .post("/api/capture/analyze")
            .json(&json!({"image": SAMPLE_IMAGE}))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Vision analysis failed");
        assert!(tickets.list_pending().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_creates_ticket_from_file() {
        let (server, tickets) = server(StaticVisionModel::answering(SAMPLE_CLASSIFICATION));

        let form = MultipartForm::new()
            .add_part(
                "file",
                Part::bytes(b"hello".as_slice())
                    .file_name("crack.png")
                    .mime_type("image/png"),
            )
            .add_text("latitude", "28.75")
            .add_text("longitude", "77.11");

        let response = server.post("/api/capture/upload").multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        let pending = tickets.list_pending().unwrap();
        assert_eq!(pending[0].image_url, "data:image/png;base64,aGVsbG8=");
        assert_eq!(pending[0].longitude, 77.11);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_image() {
        let (server, tickets) = server(StaticVisionModel::answering(SAMPLE_CLASSIFICATION));

        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(b"%PDF-1.7".as_slice())
                .file_name("report.pdf")
                .mime_type("application/pdf"),
        );

        server
            .post("/api/capture/upload")
            .multipart(form)
            .await
            .assert_status_bad_request();

        server
            .post("/api/capture/upload")
            .multipart(MultipartForm::new().add_text("latitude", "1.0"))
            .await
            .assert_status_bad_request();

        assert!(tickets.list_pending().unwrap().is_empty());
    }
}
