use utoipa::{Modify, OpenApi};

use crate::features::archive::{
    dtos as archive_dtos, handlers as archive_handlers, models as archive_models,
};
use crate::features::capture::{dtos as capture_dtos, handlers as capture_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::tickets::{
    dtos as tickets_dtos, handlers as tickets_handlers, models as tickets_models,
};
use crate::features::views::{
    dtos as views_dtos, handlers as views_handlers, models as views_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Capture
        capture_handlers::analyze_capture,
        capture_handlers::upload_capture,
        // Tickets
        tickets_handlers::list_pending,
        tickets_handlers::list_dispatched,
        tickets_handlers::get_ticket,
        tickets_handlers::dispatch_ticket,
        tickets_handlers::discard_ticket,
        tickets_handlers::purge_ticket,
        // Archive
        archive_handlers::list_archive,
        // Dashboard
        dashboard_handlers::get_summary,
        // Views
        views_handlers::get_view,
        views_handlers::navigate,
    ),
    components(
        schemas(
            Meta,
            // Tickets
            tickets_models::Category,
            tickets_models::SeverityPresentation,
            tickets_dtos::TicketResponseDto,
            tickets_dtos::DispatchResponseDto,
            // Capture
            capture_dtos::AnalyzeImageDto,
            capture_dtos::UploadImageDto,
            capture_dtos::CaptureStatus,
            capture_dtos::CaptureResponseDto,
            // Archive
            archive_models::ArchivedTicket,
            archive_dtos::ArchiveStatus,
            archive_dtos::ArchiveSnapshotDto,
            // Dashboard
            dashboard_dtos::DashboardSummaryDto,
            // Views
            views_models::View,
            views_dtos::ViewStateDto,
            views_dtos::NavigateDto,
            // Response wrappers
            ApiResponse<tickets_dtos::TicketResponseDto>,
            ApiResponse<Vec<tickets_dtos::TicketResponseDto>>,
            ApiResponse<tickets_dtos::DispatchResponseDto>,
            ApiResponse<capture_dtos::CaptureResponseDto>,
            ApiResponse<archive_dtos::ArchiveSnapshotDto>,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            ApiResponse<views_dtos::ViewStateDto>,
        )
    ),
    tags(
        (name = "capture", description = "Image capture and classification"),
        (name = "tickets", description = "Pending and dispatched maintenance tickets"),
        (name = "archive", description = "Persisted record of dispatched tickets"),
        (name = "dashboard", description = "Queue statistics"),
        (name = "views", description = "Active view and camera state"),
    ),
    info(
        title = "Campus Inspect API",
        version = "0.1.0",
        description = "API documentation for Campus Inspect",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
