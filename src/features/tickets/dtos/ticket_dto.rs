use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::tickets::models::{Category, SeverityPresentation, Ticket};
use crate::features::tickets::services::DispatchReceipt;
use crate::shared::constants::NEGLIGIBLE_RISKS;

/// Response DTO for ticket
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponseDto {
    pub id: i64,
    pub detected_issue: String,
    pub category: Category,
    #[schema(example = "High")]
    pub severity_level: String,
    pub reason_for_severity: String,
    /// "Negligible" when the model listed no risks
    pub possible_risks: String,
    pub suggested_department: String,
    #[schema(minimum = 0, maximum = 100)]
    pub confidence_level: u8,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub analyzed_by: String,
    pub created_at: DateTime<Utc>,
    pub dispatched_at: Option<DateTime<Utc>>,
    pub presentation: SeverityPresentation,
}

impl From<Ticket> for TicketResponseDto {
    fn from(t: Ticket) -> Self {
        let presentation = t.severity_level.presentation();
        let possible_risks = t
            .possible_risks
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| NEGLIGIBLE_RISKS.to_string());

        Self {
            id: t.id.0,
            detected_issue: t.detected_issue,
            category: t.category,
            severity_level: t.severity_level.into(),
            reason_for_severity: t.reason_for_severity,
            possible_risks,
            suggested_department: t.suggested_department,
            confidence_level: t.confidence_level.value(),
            image_url: t.image_url,
            latitude: t.latitude,
            longitude: t.longitude,
            analyzed_by: t.analyzed_by,
            created_at: t.created_at,
            dispatched_at: t.dispatched_at,
            presentation,
        }
    }
}

/// Response DTO for a dispatch
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DispatchResponseDto {
    pub notice: String,
    pub ticket: TicketResponseDto,
}

impl From<DispatchReceipt> for DispatchResponseDto {
    fn from(receipt: DispatchReceipt) -> Self {
        Self {
            notice: receipt.notice,
            ticket: receipt.ticket.into(),
        }
    }
}

/// Confirmation gate for destructive actions
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ConfirmQuery {
    /// Must be `true` for the removal to run
    #[serde(default)]
    pub confirm: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_ticket;

    #[test]
    fn test_missing_risks_render_as_negligible() {
        let mut ticket = sample_ticket(1);
        ticket.possible_risks = None;
        let dto = TicketResponseDto::from(ticket.clone());
        assert_eq!(dto.possible_risks, "Negligible");

        ticket.possible_risks = Some("  ".to_string());
        let dto = TicketResponseDto::from(ticket);
        assert_eq!(dto.possible_risks, "Negligible");
    }

    #[test]
    fn test_dto_carries_presentation() {
        let dto = TicketResponseDto::from(sample_ticket(3));
        assert_eq!(dto.severity_level, "Medium");
        assert_eq!(dto.presentation.icon, "fa-circle-info");
    }
}
