use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::views::handlers;
use crate::features::views::services::ViewService;

/// Create routes for the view controller
pub fn routes(service: Arc<ViewService>) -> Router {
    Router::new()
        .route(
            "/api/view",
            get(handlers::get_view).put(handlers::navigate),
        )
        .with_state(service)
}
