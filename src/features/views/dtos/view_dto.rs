use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::views::models::View;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewStateDto {
    pub view: View,
    /// Whether a camera stream is currently held
    pub camera_active: bool,
}

/// Request DTO for switching views
#[derive(Debug, Deserialize, ToSchema)]
pub struct NavigateDto {
    pub view: View,
}
