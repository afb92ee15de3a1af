use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How damaging the reported issue is, derived from the predicted label.
#[derive(Serialize, Deserialize, Display, EnumString, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Info,
    Unknown,
}

/// How urgently the reported issue should be handled.
#[derive(Serialize, Deserialize, Display, EnumString, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
    Unknown,
}

/// Successful `/upload` payload: prediction, triage and the preview image
/// as a `data:image/png;base64,` URI ready for an `<img>` tag.
#[derive(Serialize, Deserialize, Clone)]
pub struct ClassificationResponse {
    pub success: bool,
    pub prediction: String,
    pub confidence: f32,
    pub confidence_percent: f32,
    pub severity: Severity,
    pub priority: Priority,
    pub image: String,
}

/// Placeholder acknowledgment returned by `POST /api/train`.
#[derive(Serialize, Deserialize, Clone)]
pub struct TrainAck {
    pub success: bool,
    pub message: String,
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"Critical\"");
        assert_eq!(Severity::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn priority_round_trips_through_strum() {
        use std::str::FromStr;
        assert_eq!(Priority::from_str("Low").unwrap(), Priority::Low);
        assert_eq!(Priority::Medium.to_string(), "Medium");
    }
}
