use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Severity assigned by the inspector model
///
/// Anything other than High/Medium/Low is kept verbatim and rendered with the
/// default presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SeverityLevel {
    High,
    Medium,
    Low,
    Unrecognized(String),
}

impl SeverityLevel {
    pub fn as_str(&self) -> &str {
        match self {
            SeverityLevel::High => "High",
            SeverityLevel::Medium => "Medium",
            SeverityLevel::Low => "Low",
            SeverityLevel::Unrecognized(raw) => raw,
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, SeverityLevel::High)
    }

    /// Presentation tokens for this severity
    pub fn presentation(&self) -> SeverityPresentation {
        match self {
            SeverityLevel::High => SeverityPresentation {
                border: "border-red-600",
                text: "text-red-700",
                bg: "bg-red-50",
                badge: "bg-red-600 text-white",
                icon: "fa-triangle-exclamation",
            },
            SeverityLevel::Medium => SeverityPresentation {
                border: "border-orange-500",
                text: "text-orange-700",
                bg: "bg-orange-50",
                badge: "bg-orange-500 text-white",
                icon: "fa-circle-info",
            },
            SeverityLevel::Low => SeverityPresentation {
                border: "border-blue-500",
                text: "text-blue-700",
                bg: "bg-blue-50",
                badge: "bg-blue-500 text-white",
                icon: "fa-clock",
            },
            SeverityLevel::Unrecognized(_) => SeverityPresentation {
                border: "border-gray-200",
                text: "text-gray-500",
                bg: "bg-gray-50",
                badge: "bg-gray-500 text-white",
                icon: "fa-circle-check",
            },
        }
    }
}

impl From<String> for SeverityLevel {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "High" => SeverityLevel::High,
            "Medium" => SeverityLevel::Medium,
            "Low" => SeverityLevel::Low,
            _ => SeverityLevel::Unrecognized(raw),
        }
    }
}

impl From<SeverityLevel> for String {
    fn from(level: SeverityLevel) -> Self {
        level.as_str().to_string()
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct SeverityPresentation {
    pub border: &'static str,
    pub text: &'static str,
    pub bg: &'static str,
    pub badge: &'static str,
    pub icon: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_known_labels() {
        assert_eq!(SeverityLevel::from("High".to_string()), SeverityLevel::High);
        assert_eq!(SeverityLevel::from(" Medium ".to_string()), SeverityLevel::Medium);
        assert_eq!(SeverityLevel::from("Low".to_string()), SeverityLevel::Low);
    }

    #[test]
    fn test_severity_keeps_unrecognized_label() {
        let level = SeverityLevel::from("Critical".to_string());
        assert_eq!(level, SeverityLevel::Unrecognized("Critical".to_string()));
        assert_eq!(level.as_str(), "Critical");
        assert!(!level.is_high());
    }

    #[test]
    fn test_presentation_per_severity() {
        assert_eq!(
            SeverityLevel::High.presentation().icon,
            "fa-triangle-exclamation"
        );
        assert_eq!(SeverityLevel::Medium.presentation().border, "border-orange-500");
        assert_eq!(SeverityLevel::Low.presentation().badge, "bg-blue-500 text-white");
        assert_eq!(
            SeverityLevel::Unrecognized("urgent".to_string())
                .presentation()
                .icon,
            "fa-circle-check"
        );
    }

    #[test]
    fn test_severity_serde_round_trips_as_plain_string() {
        let json = serde_json::to_string(&SeverityLevel::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");

        let parsed: SeverityLevel = serde_json::from_str("\"Severe\"").unwrap();
        assert_eq!(parsed, SeverityLevel::Unrecognized("Severe".to_string()));
    }
}
