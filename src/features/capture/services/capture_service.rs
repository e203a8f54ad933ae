use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::inference::models::ImagePayload;
use crate::features::inference::services::GeolocationProvider;
use crate::features::inference::InferenceGateway;
use crate::features::tickets::models::Ticket;
use crate::features::tickets::TicketService;

/// Result of a capture request
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// The image was classified and a pending ticket created
    Created(Ticket),
    /// Another analysis was running; this request was ignored
    Busy,
}

/// Clears the analyzing flag when dropped
struct AnalyzingGuard(Arc<AtomicBool>);

impl Drop for AnalyzingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Capture -> classify -> add pending, one analysis at a time
pub struct CaptureService {
    gateway: Arc<InferenceGateway>,
    tickets: Arc<TicketService>,
    analyzing: Arc<AtomicBool>,
}

impl CaptureService {
    pub fn new(gateway: Arc<InferenceGateway>, tickets: Arc<TicketService>) -> Self {
        Self {
            gateway,
            tickets,
            analyzing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing.load(Ordering::Acquire)
    }

    fn try_begin(&self) -> Option<AnalyzingGuard> {
        self.analyzing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| AnalyzingGuard(Arc::clone(&self.analyzing)))
    }

    /// Classify an image and queue the resulting ticket
    ///
    /// Returns `Busy` without touching the vision service while another
    /// analysis is in flight. On inference failure no ticket is created.
    ///
    /// The analysis runs on its own task and cannot be cancelled once started:
    /// if the caller goes away, the ticket is still queued when the model answers.
    pub async fn analyze(
        &self,
        image: ImagePayload,
        geolocation: Arc<dyn GeolocationProvider>,
    ) -> Result<CaptureOutcome> {
        let Some(guard) = self.try_begin() else {
            tracing::info!("Capture ignored, analysis already in progress");
            return Ok(CaptureOutcome::Busy);
        };

        tracing::debug!(
            "Analyzing {} image ({} bytes encoded)",
            image.mime_type(),
            image.as_data_url().len()
        );

        let gateway = Arc::clone(&self.gateway);
        let tickets = Arc::clone(&self.tickets);
        let task = tokio::spawn(async move {
            let _guard = guard;
            let draft = gateway.analyze(&image, geolocation.as_ref()).await?;
            let ticket = tickets.create_pending(draft, image.into_data_url())?;
            Ok::<_, AppError>(CaptureOutcome::Created(ticket))
        });

        task.await.map_err(|e| {
            tracing::error!("Capture analysis task failed: {}", e);
            AppError::Internal("Capture analysis failed".to_string())
        })?
    }
}
