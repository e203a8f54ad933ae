use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Get queue statistics
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>, AppError> {
    let summary = service.get_summary()?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::capture::CaptureService;
    use crate::features::dashboard::routes;
    use crate::features::inference::InferenceGateway;
    use crate::features::tickets::TicketService;
    use crate::shared::test_helpers::{sample_draft, StaticVisionModel};
    use axum_test::TestServer;
    use serde_json::Value;
    use std::time::Duration;

    #[tokio::test]
    async fn test_summary_endpoint() {
        let tickets = Arc::new(TicketService::new(None));
        tickets
            .create_pending(sample_draft(), "data:image/jpeg;base64,AA==".to_string())
            .unwrap();
        let gateway = Arc::new(InferenceGateway::new(
            Arc::new(StaticVisionModel::failing()),
            vec!["primary".to_string()],
            "inspect".to_string(),
            Duration::from_millis(10),
        ));
        let capture = Arc::new(CaptureService::new(gateway, tickets.clone()));
        let server =
            TestServer::new(routes(Arc::new(DashboardService::new(tickets, capture)))).unwrap();

        let response = server.get("/api/dashboard/summary").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["activeCount"], 1);
        assert_eq!(body["data"]["highSeverityCount"], 0);
        assert_eq!(body["data"]["dispatchedCount"], 0);
        assert_eq!(body["data"]["analyzing"], false);
    }
}
