use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::archive::handlers;
use crate::features::archive::services::ArchiveService;

/// Create routes for the archive feature
pub fn routes(service: Arc<ArchiveService>) -> Router {
    Router::new()
        .route("/api/archive", get(handlers::list_archive))
        .with_state(service)
}
