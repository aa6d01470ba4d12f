//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusResponse {
    /// Create a new online status response
    pub fn online() -> Self {
        Self {
            status: "Online".to_string(),
            message: "Project is running".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Body of `PUT /pomodoro/duration`.
///
/// `minutes` is kept as raw JSON so that text input can be parsed the same
/// way as numbers and anything unusable is ignored instead of rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct DurationRequest {
    #[serde(default)]
    pub minutes: serde_json::Value,
}

impl DurationRequest {
    /// Minutes requested, or `None` if the input should be ignored
    pub fn minutes(&self) -> Option<u64> {
        match &self.minutes {
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(minutes) => Some(minutes),
                None => n.as_f64()
                    .filter(|m| m.is_finite() && *m > -1.0)
                    .map(|m| m.max(0.0).trunc() as u64),
            },
            serde_json::Value::String(s) => crate::state::parse_minutes(s),
            _ => None,
        }
    }
}

/// Body of `POST /tasks`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub task: String,
}

/// Body of `POST /flash-cards`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFlashCardRequest {
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> DurationRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn duration_accepts_numbers_and_numeric_text() {
        assert_eq!(request(r#"{"minutes":30}"#).minutes(), Some(30));
        assert_eq!(request(r#"{"minutes":2.9}"#).minutes(), Some(2));
        assert_eq!(request(r#"{"minutes":"15"}"#).minutes(), Some(15));
    }

    #[test]
    fn duration_ignores_negative_and_non_numeric_input() {
        assert_eq!(request(r#"{"minutes":-3}"#).minutes(), None);
        assert_eq!(request(r#"{"minutes":"-3"}"#).minutes(), None);
        assert_eq!(request(r#"{"minutes":"NaN"}"#).minutes(), None);
        assert_eq!(request(r#"{"minutes":null}"#).minutes(), None);
        assert_eq!(request(r#"{}"#).minutes(), None);
    }

    #[test]
    fn status_response_has_expected_shape() {
        let json = serde_json::to_value(StatusResponse::online()).unwrap();
        assert_eq!(json["status"], "Online");
        assert_eq!(json["message"], "Project is running");
        assert!(json["timestamp"].is_string());
    }
}
