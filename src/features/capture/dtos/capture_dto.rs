use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::capture::services::CaptureOutcome;
use crate::features::tickets::dtos::TicketResponseDto;

/// Request DTO for classifying a captured frame
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AnalyzeImageDto {
    /// Data URI (`data:image/jpeg;base64,...`) or bare base64
    #[validate(length(min = 1, message = "image is required"))]
    pub image: String,
    /// Reporter latitude, when the client could determine it
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    /// Reporter longitude, when the client could determine it
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Upload form for OpenAPI documentation
/// Note: the handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image file (image/* only)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaptureStatus {
    Created,
    Busy,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaptureResponseDto {
    pub status: CaptureStatus,
    /// The new pending ticket; absent when the request was ignored
    pub ticket: Option<TicketResponseDto>,
}

impl From<CaptureOutcome> for CaptureResponseDto {
    fn from(outcome: CaptureOutcome) -> Self {
        match outcome {
            CaptureOutcome::Created(ticket) => Self {
                status: CaptureStatus::Created,
                ticket: Some(ticket.into()),
            },
            CaptureOutcome::Busy => Self {
                status: CaptureStatus::Busy,
                ticket: None,
            },
        }
    }
}
