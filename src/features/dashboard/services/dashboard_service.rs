use std::sync::Arc;

use crate::core::error::Result;
use crate::features::capture::CaptureService;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::tickets::TicketService;

pub struct DashboardService {
    tickets: Arc<TicketService>,
    capture: Arc<CaptureService>,
}

impl DashboardService {
    pub fn new(tickets: Arc<TicketService>, capture: Arc<CaptureService>) -> Self {
        Self { tickets, capture }
    }

    pub fn get_summary(&self) -> Result<DashboardSummaryDto> {
        let (active_count, high_severity_count, dispatched_count) =
            self.tickets.inspect(|store| {
                (
                    store.pending().count(),
                    store
                        .pending()
                        .filter(|t| t.severity_level.is_high())
                        .count(),
                    store.dispatched().count(),
                )
            })?;

        let high_severity_share = if active_count > 0 {
            high_severity_count as f64 / active_count as f64 * 100.0
        } else {
            0.0
        };

        Ok(DashboardSummaryDto {
            active_count,
            high_severity_count,
            high_severity_share,
            dispatched_count,
            analyzing: self.capture.is_analyzing(),
        })
    }
}
