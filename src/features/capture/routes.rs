use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::capture::handlers;
use crate::features::capture::services::CaptureService;
use crate::shared::constants::MAX_IMAGE_SIZE;

/// Multipart framing and base64 expansion on top of the raw image limit
const CAPTURE_BODY_LIMIT: usize = MAX_IMAGE_SIZE * 2;

/// Create routes for the capture feature
pub fn routes(service: Arc<CaptureService>) -> Router {
    Router::new()
        .route("/api/capture/analyze", post(handlers::analyze_capture))
        .route("/api/capture/upload", post(handlers::upload_capture))
        .layer(DefaultBodyLimit::max(CAPTURE_BODY_LIMIT))
        .with_state(service)
}
