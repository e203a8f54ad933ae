use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::tickets::dtos::{ConfirmQuery, DispatchResponseDto, TicketResponseDto};
use crate::features::tickets::models::TicketId;
use crate::features::tickets::services::TicketService;
use crate::shared::types::ApiResponse;

fn require_confirmation(query: &ConfirmQuery, action: &str) -> Result<()> {
    if query.confirm {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Confirmation required to {} (pass confirm=true)",
            action
        )))
    }
}

fn not_changed(id: i64) -> Option<String> {
    Some(format!("Ticket {} not found, nothing changed", id))
}

/// List pending tickets, newest first
#[utoipa::path(
    get,
    path = "/api/tickets/pending",
    responses(
        (status = 200, description = "Pending tickets", body = ApiResponse<Vec<TicketResponseDto>>),
    ),
    tag = "tickets"
)]
pub async fn list_pending(
    State(service): State<Arc<TicketService>>,
) -> Result<Json<ApiResponse<Vec<TicketResponseDto>>>> {
    let tickets = service.list_pending()?;
    Ok(Json(ApiResponse::list(
        tickets.into_iter().map(Into::into).collect(),
    )))
}

/// List dispatched tickets, newest first
#[utoipa::path(
    get,
    path = "/api/tickets/dispatched",
    responses(
        (status = 200, description = "Dispatched tickets", body = ApiResponse<Vec<TicketResponseDto>>),
    ),
    tag = "tickets"
)]
pub async fn list_dispatched(
    State(service): State<Arc<TicketService>>,
) -> Result<Json<ApiResponse<Vec<TicketResponseDto>>>> {
    let tickets = service.list_dispatched()?;
    Ok(Json(ApiResponse::list(
        tickets.into_iter().map(Into::into).collect(),
    )))
}

/// Get a pending or dispatched ticket
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    params(
        ("id" = i64, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Ticket found", body = ApiResponse<TicketResponseDto>),
        (status = 404, description = "Ticket not found")
    ),
    tag = "tickets"
)]
pub async fn get_ticket(
    State(service): State<Arc<TicketService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<TicketResponseDto>>> {
    let ticket = service
        .find(TicketId(id))?
        .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))?;

    let state = if ticket.is_dispatched() {
        "dispatched"
    } else {
        "pending"
    };
    Ok(Json(ApiResponse::success(
        Some(ticket.into()),
        Some(format!("Ticket is {}", state)),
        None,
    )))
}

/// Dispatch a pending ticket to its suggested department
#[utoipa::path(
    post,
    path = "/api/tickets/{id}/dispatch",
    params(
        ("id" = i64, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Ticket dispatched, or no-op when not pending", body = ApiResponse<DispatchResponseDto>),
    ),
    tag = "tickets"
)]
pub async fn dispatch_ticket(
    State(service): State<Arc<TicketService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DispatchResponseDto>>> {
    let response = match service.dispatch(TicketId(id)).await? {
        Some(receipt) => {
            let notice = receipt.notice.clone();
            ApiResponse::success(Some(receipt.into()), Some(notice), None)
        }
        None => ApiResponse::success(None, not_changed(id), None),
    };
    Ok(Json(response))
}

/// Discard a pending ticket
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    params(
        ("id" = i64, Path, description = "Ticket ID"),
        ConfirmQuery
    ),
    responses(
        (status = 200, description = "Ticket discarded, or no-op when not pending", body = ApiResponse<TicketResponseDto>),
        (status = 400, description = "Confirmation missing")
    ),
    tag = "tickets"
)]
pub async fn discard_ticket(
    State(service): State<Arc<TicketService>>,
    Path(id): Path<i64>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<ApiResponse<TicketResponseDto>>> {
    require_confirmation(&query, "discard this diagnostic session")?;

    let response = match service.discard(TicketId(id))? {
        Some(ticket) => ApiResponse::success(
            Some(ticket.into()),
            Some("Ticket discarded".to_string()),
            None,
        ),
        None => ApiResponse::success(None, not_changed(id), None),
    };
    Ok(Json(response))
}

/// Purge an archived (dispatched) ticket
#[utoipa::path(
    delete,
    path = "/api/tickets/dispatched/{id}",
    params(
        ("id" = i64, Path, description = "Ticket ID"),
        ConfirmQuery
    ),
    responses(
        (status = 200, description = "Ticket purged, or no-op when not dispatched", body = ApiResponse<TicketResponseDto>),
        (status = 400, description = "Confirmation missing")
    ),
    tag = "tickets"
)]
pub async fn purge_ticket(
    State(service): State<Arc<TicketService>>,
    Path(id): Path<i64>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<ApiResponse<TicketResponseDto>>> {
    require_confirmation(&query, "purge this archived record")?;

    let response = match service.purge(TicketId(id))? {
        Some(ticket) => ApiResponse::success(
            Some(ticket.into()),
            Some("Archived record purged".to_string()),
            None,
        ),
        None => ApiResponse::success(None, not_changed(id), None),
    };
    Ok(Json(response))
}
