use serde::Serialize;
use utoipa::ToSchema;

use crate::features::archive::models::ArchivedTicket;

/// State of the archive read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveStatus {
    Ok,
    /// No database configured
    Disabled,
    FetchError,
}

/// Response DTO for the archive listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArchiveSnapshotDto {
    pub status: ArchiveStatus,
    pub message: Option<String>,
    pub tickets: Vec<ArchivedTicket>,
}

impl ArchiveSnapshotDto {
    pub fn ok(tickets: Vec<ArchivedTicket>) -> Self {
        Self {
            status: ArchiveStatus::Ok,
            message: None,
            tickets,
        }
    }

    pub fn disabled() -> Self {
        Self {
            status: ArchiveStatus::Disabled,
            message: Some("Archive database is not configured".to_string()),
            tickets: Vec::new(),
        }
    }

    pub fn fetch_error(message: String) -> Self {
        Self {
            status: ArchiveStatus::FetchError,
            message: Some(message),
            tickets: Vec::new(),
        }
    }
}
