use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Screen the reporter is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    #[default]
    Dashboard,
    /// Camera preview; the only view that holds a stream
    Live,
    Upload,
    Admin,
}

impl View {
    pub fn needs_camera(&self) -> bool {
        matches!(self, View::Live)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            View::Dashboard => "DASHBOARD",
            View::Live => "LIVE",
            View::Upload => "UPLOAD",
            View::Admin => "ADMIN",
        };
        write!(f, "{}", name)
    }
}
