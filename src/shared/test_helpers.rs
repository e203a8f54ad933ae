use async_trait::async_trait;
use chrono::Utc;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::core::error::{AppError, Result};
use crate::features::archive::models::ArchivedTicket;
use crate::features::archive::TicketArchive;
use crate::features::tickets::models::{
    Category, ConfidenceLevel, Coordinates, SeverityLevel, Ticket, TicketDraft, TicketId,
};
use crate::features::views::models::{FacingMode, MediaDevices, MediaError, MediaStream};
use crate::modules::vision::{VisionError, VisionModel, VisionRequest};

/// A well-formed inspector answer (High severity, confidence 0.9)
pub const SAMPLE_CLASSIFICATION: &str = r#"{
    "detectedIssue": "Exposed wiring near the library entrance",
    "category": "Electrical",
    "severityLevel": "High",
    "reasonForSeverity": "Live conductors within reach of pedestrians",
    "possibleRisks": "Electric shock",
    "suggestedDepartment": "Electrical Maintenance",
    "confidenceLevel": 0.9
}"#;

/// 1x1 JPEG header fragment as a data URI
pub const SAMPLE_IMAGE: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";

/// A classified draft with randomized free text
pub fn sample_draft() -> TicketDraft {
    TicketDraft {
        detected_issue: Sentence(3..6).fake(),
        category: Category::Maintenance,
        severity_level: SeverityLevel::Medium,
        reason_for_severity: Sentence(5..10).fake(),
        possible_risks: Some(Sentence(3..6).fake()),
        suggested_department: "Estate Office".to_string(),
        confidence_level: ConfidenceLevel::new(75),
        location: Coordinates::new(28.7501, 77.1177),
        model: "test-model".to_string(),
    }
}

pub fn sample_ticket(id: i64) -> Ticket {
    Ticket::from_draft(
        TicketId(id),
        sample_draft(),
        format!("data:image/jpeg;base64,{}", id),
        Utc::now(),
    )
}

/// In-memory archive that records inserts, or fails every call
#[derive(Default)]
pub struct RecordingArchive {
    rows: Mutex<Vec<ArchivedTicket>>,
    fail: bool,
}

impl RecordingArchive {
    pub fn failing() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn inserted_ids(&self) -> Vec<TicketId> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|r| TicketId(r.id))
            .collect()
    }
}

#[async_trait]
impl TicketArchive for RecordingArchive {
    async fn insert(&self, ticket: &Ticket) -> Result<()> {
        if self.fail {
            return Err(AppError::Internal("archive unavailable".to_string()));
        }
        self.rows.lock().unwrap().push(ArchivedTicket::from(ticket));
        Ok(())
    }

    async fn select_all(&self) -> Result<Vec<ArchivedTicket>> {
        if self.fail {
            return Err(AppError::Internal("archive unavailable".to_string()));
        }
        Ok(self.rows.lock().unwrap().clone())
    }
}

/// Vision model giving the same answer to every tier, optionally held at a gate
pub struct StaticVisionModel {
    answer: Option<String>,
    calls: AtomicUsize,
    gate: Option<Notify>,
}

impl StaticVisionModel {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Some(text.to_string()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// The next call waits until `release` is called
    pub fn gated(text: &str) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::answering(text)
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionModel for StaticVisionModel {
    async fn generate(
        &self,
        _model: &str,
        _request: VisionRequest<'_>,
    ) -> std::result::Result<String, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.answer
            .clone()
            .ok_or_else(|| VisionError::Transport("connection refused".to_string()))
    }
}

/// Vision model answering from a per-tier script and recording which tiers were called
///
/// Tiers without a script fail with a transport error.
#[derive(Default)]
pub struct ScriptedVisionModel {
    answers: HashMap<String, std::result::Result<String, VisionError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedVisionModel {
    pub fn answer(mut self, tier: &str, answer: std::result::Result<&str, VisionError>) -> Self {
        self.answers
            .insert(tier.to_string(), answer.map(str::to_string));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionModel for ScriptedVisionModel {
    async fn generate(
        &self,
        model: &str,
        _request: VisionRequest<'_>,
    ) -> std::result::Result<String, VisionError> {
        self.calls.lock().unwrap().push(model.to_string());
        self.answers
            .get(model)
            .cloned()
            .unwrap_or_else(|| Err(VisionError::Transport("no script".to_string())))
    }
}

/// Camera stream whose stops are counted by the owning `FakeCamera`
struct FakeStream {
    active: bool,
    stops: Arc<AtomicUsize>,
}

impl MediaStream for FakeStream {
    fn stop_all_tracks(&mut self) {
        if self.active {
            self.active = false;
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Camera that grants or denies access and tracks stream lifecycles
#[derive(Default)]
pub struct FakeCamera {
    deny: bool,
    opened: AtomicUsize,
    stops: Arc<AtomicUsize>,
    facing: Mutex<Vec<FacingMode>>,
}

impl FakeCamera {
    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn stopped(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn requested_facing(&self) -> Vec<FacingMode> {
        self.facing.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaDevices for FakeCamera {
    async fn open_camera(
        &self,
        facing: FacingMode,
    ) -> std::result::Result<Box<dyn MediaStream>, MediaError> {
        self.facing.lock().unwrap().push(facing);
        if self.deny {
            return Err(MediaError::PermissionDenied);
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeStream {
            active: true,
            stops: self.stops.clone(),
        }))
    }
}
