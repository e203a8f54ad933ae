use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::tickets::handlers;
use crate::features::tickets::services::TicketService;

/// Create routes for the tickets feature
pub fn routes(service: Arc<TicketService>) -> Router {
    Router::new()
        .route("/api/tickets/pending", get(handlers::list_pending))
        .route("/api/tickets/dispatched", get(handlers::list_dispatched))
        .route("/api/tickets/{id}/dispatch", post(handlers::dispatch_ticket))
        .route(
            "/api/tickets/{id}",
            get(handlers::get_ticket).delete(handlers::discard_ticket),
        )
        .route(
            "/api/tickets/dispatched/{id}",
            delete(handlers::purge_ticket),
        )
        .with_state(service)
}
