use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::archive::dtos::ArchiveSnapshotDto;
use crate::features::archive::services::ArchiveService;
use crate::shared::types::ApiResponse;

/// List every archived ticket from the persistence store
///
/// A database failure is reported in `data.status` rather than as an HTTP error.
#[utoipa::path(
    get,
    path = "/api/archive",
    responses(
        (status = 200, description = "Archive snapshot", body = ApiResponse<ArchiveSnapshotDto>),
    ),
    tag = "archive"
)]
pub async fn list_archive(
    State(service): State<Arc<ArchiveService>>,
) -> Result<Json<ApiResponse<ArchiveSnapshotDto>>> {
    let snapshot = service.snapshot().await;
    let message = snapshot.message.clone();
    Ok(Json(ApiResponse::success(Some(snapshot), message, None)))
}
