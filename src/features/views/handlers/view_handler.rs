use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::views::dtos::{NavigateDto, ViewStateDto};
use crate::features::views::services::ViewService;
use crate::shared::types::ApiResponse;

/// Get the active view
#[utoipa::path(
    get,
    path = "/api/view",
    responses(
        (status = 200, description = "Current view", body = ApiResponse<ViewStateDto>),
    ),
    tag = "views"
)]
pub async fn get_view(
    State(service): State<Arc<ViewService>>,
) -> Result<Json<ApiResponse<ViewStateDto>>> {
    let state = service.state().await;
    Ok(Json(ApiResponse::success(Some(state), None, None)))
}

/// Switch the active view
///
/// Leaving any view releases the camera. Entering `LIVE` requests the rear
/// camera; when access is denied the view still changes and 403 is returned.
#[utoipa::path(
    put,
    path = "/api/view",
    request_body = NavigateDto,
    responses(
        (status = 200, description = "View switched", body = ApiResponse<ViewStateDto>),
        (status = 400, description = "Unknown view"),
        (status = 403, description = "Camera permission denied")
    ),
    tag = "views"
)]
pub async fn navigate(
    State(service): State<Arc<ViewService>>,
    AppJson(dto): AppJson<NavigateDto>,
) -> Result<Json<ApiResponse<ViewStateDto>>> {
    let state = service.navigate(dto.view).await?;
    Ok(Json(ApiResponse::success(Some(state), None, None)))
}
