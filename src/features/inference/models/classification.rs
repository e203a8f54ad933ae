use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::features::tickets::models::{Category, Coordinates, SeverityLevel, TicketDraft};
use crate::features::tickets::services::normalize_confidence;
use crate::shared::llm::StructuredResponse;

/// Inspector output exactly as the model returns it
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawClassification {
    /// Short description of the visible problem
    pub detected_issue: String,
    /// One of: Maintenance, Cleanliness, Safety, Infrastructure, Electrical, Plumbing
    pub category: String,
    /// High, Medium or Low
    pub severity_level: String,
    pub reason_for_severity: String,
    #[serde(default)]
    pub possible_risks: Option<String>,
    pub suggested_department: String,
    /// A value from 0 to 100 representing certainty
    pub confidence_level: f64,
}

impl StructuredResponse for RawClassification {
    fn validate(&self) -> Result<(), String> {
        if self.detected_issue.trim().is_empty() {
            return Err("detectedIssue must not be empty".to_string());
        }
        self.category.parse::<Category>()?;
        Ok(())
    }
}

impl RawClassification {
    /// Normalize into a draft tagged with the location and answering model
    pub fn into_draft(self, location: Coordinates, model: &str) -> Result<TicketDraft, String> {
        let category = self.category.parse::<Category>()?;
        let possible_risks = self
            .possible_risks
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Ok(TicketDraft {
            detected_issue: self.detected_issue.trim().to_string(),
            category,
            severity_level: SeverityLevel::from(self.severity_level),
            reason_for_severity: self.reason_for_severity,
            possible_risks,
            suggested_department: self.suggested_department.trim().to_string(),
            confidence_level: normalize_confidence(Some(self.confidence_level)),
            location,
            model: model.to_string(),
        })
    }

    /// Structured-output schema in the vision service's OpenAPI subset
    pub fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "detectedIssue": { "type": "STRING" },
                "category": { "type": "STRING" },
                "severityLevel": { "type": "STRING" },
                "reasonForSeverity": { "type": "STRING" },
                "possibleRisks": { "type": "STRING" },
                "suggestedDepartment": { "type": "STRING" },
                "confidenceLevel": {
                    "type": "NUMBER",
                    "description": "A value from 0 to 100 representing certainty."
                }
            },
            "required": [
                "detectedIssue",
                "category",
                "severityLevel",
                "reasonForSeverity",
                "possibleRisks",
                "suggestedDepartment",
                "confidenceLevel"
            ]
        })
    }
}
