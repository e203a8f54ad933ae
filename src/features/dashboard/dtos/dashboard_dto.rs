use serde::Serialize;
use utoipa::ToSchema;

/// Queue statistics shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    /// Tickets waiting in the pending queue
    pub active_count: usize,
    /// Pending tickets with High severity
    pub high_severity_count: usize,
    /// High-severity share of the pending queue in percent, 0 when empty
    pub high_severity_share: f64,
    pub dispatched_count: usize,
    /// Whether an image is being classified right now
    pub analyzing: bool,
}
