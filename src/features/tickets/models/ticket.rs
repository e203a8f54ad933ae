use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use super::SeverityLevel;

/// Creation-time ticket identifier (milliseconds since epoch, bumped on collision)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub i64);

impl From<i64> for TicketId {
    fn from(value: i64) -> Self {
        TicketId(value)
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maintenance category enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Maintenance,
    Cleanliness,
    Safety,
    Infrastructure,
    Electrical,
    Plumbing,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Maintenance,
        Category::Cleanliness,
        Category::Safety,
        Category::Infrastructure,
        Category::Electrical,
        Category::Plumbing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Maintenance => "Maintenance",
            Category::Cleanliness => "Cleanliness",
            Category::Safety => "Safety",
            Category::Infrastructure => "Infrastructure",
            Category::Electrical => "Electrical",
            Category::Plumbing => "Plumbing",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    /// Case-insensitive match against the six category names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown category '{}'", wanted))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Confidence on the canonical 0-100 integer scale
///
/// Only `normalize_confidence` and `ConfidenceLevel::new` construct it, and both
/// keep the value within [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceLevel(u8);

impl ConfidenceLevel {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Self {
        ConfidenceLevel(value.min(Self::MAX))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Geographic position in degrees; (0, 0) stands for "unavailable"
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const UNAVAILABLE: Coordinates = Coordinates {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Classified issue returned by the inference gateway, before it becomes a ticket
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDraft {
    pub detected_issue: String,
    pub category: Category,
    pub severity_level: SeverityLevel,
    pub reason_for_severity: String,
    pub possible_risks: Option<String>,
    pub suggested_department: String,
    pub confidence_level: ConfidenceLevel,
    pub location: Coordinates,
    /// Model tier that produced the classification
    pub model: String,
}

/// In-memory maintenance ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub detected_issue: String,
    pub category: Category,
    pub severity_level: SeverityLevel,
    pub reason_for_severity: String,
    pub possible_risks: Option<String>,
    pub suggested_department: String,
    pub confidence_level: ConfidenceLevel,
    /// Data URI exactly as captured
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub analyzed_by: String,
    pub created_at: DateTime<Utc>,
    pub dispatched_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub fn from_draft(
        id: TicketId,
        draft: TicketDraft,
        image_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            detected_issue: draft.detected_issue,
            category: draft.category,
            severity_level: draft.severity_level,
            reason_for_severity: draft.reason_for_severity,
            possible_risks: draft.possible_risks,
            suggested_department: draft.suggested_department,
            confidence_level: draft.confidence_level,
            image_url,
            latitude: draft.location.latitude,
            longitude: draft.location.longitude,
            analyzed_by: draft.model,
            created_at,
            dispatched_at: None,
        }
    }

    pub fn is_dispatched(&self) -> bool {
        self.dispatched_at.is_some()
    }
}
