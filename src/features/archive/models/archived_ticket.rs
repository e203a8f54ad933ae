use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::features::tickets::models::Ticket;

/// Database model for an archived ticket
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedTicket {
    pub id: i64,
    pub detected_issue: String,
    pub category: String,
    pub severity_level: String,
    pub reason_for_severity: String,
    pub possible_risks: Option<String>,
    pub suggested_department: String,
    pub confidence_level: i16,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub analyzed_by: String,
    pub created_at: DateTime<Utc>,
    pub dispatched_at: Option<DateTime<Utc>>,
}

impl From<&Ticket> for ArchivedTicket {
    fn from(t: &Ticket) -> Self {
        Self {
            id: t.id.0,
            detected_issue: t.detected_issue.clone(),
            category: t.category.to_string(),
            severity_level: t.severity_level.to_string(),
            reason_for_severity: t.reason_for_severity.clone(),
            possible_risks: t.possible_risks.clone(),
            suggested_department: t.suggested_department.clone(),
            confidence_level: i16::from(t.confidence_level.value()),
            image_url: t.image_url.clone(),
            latitude: t.latitude,
            longitude: t.longitude,
            analyzed_by: t.analyzed_by.clone(),
            created_at: t.created_at,
            dispatched_at: t.dispatched_at,
        }
    }
}
