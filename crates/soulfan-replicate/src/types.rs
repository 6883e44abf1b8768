// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Replicate predictions API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle state of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    Aborted,
}

impl PredictionStatus {
    /// Whether the prediction will not change state again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded
                | PredictionStatus::Failed
                | PredictionStatus::Canceled
                | PredictionStatus::Aborted
        )
    }
}

/// Links returned with a prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionUrls {
    /// Endpoint to poll for status.
    pub get: String,
}

/// A prediction as returned by create and get calls.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub urls: Option<PredictionUrls>,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrorResponse {
    pub fn message(&self) -> String {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) => format!("{title}: {detail}"),
            (None, Some(detail)) => detail.clone(),
            (Some(title), None) => title.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

/// First URL in a prediction output: a bare string or the first string of an array.
pub fn first_url(output: &Value) -> Option<String> {
    match output {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(|v| v.as_str().filter(|s| !s.is_empty()).map(str::to_string)),
        _ => None,
    }
}

/// Full text of a language-model output: token arrays are concatenated.
pub fn joined_text(output: &Value) -> Option<String> {
    match output {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(items.iter().filter_map(Value::as_str).collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_url_handles_string_and_array() {
        assert_eq!(
            first_url(&json!("https://replicate.delivery/a.png")).as_deref(),
            Some("https://replicate.delivery/a.png")
        );
        assert_eq!(
            first_url(&json!(["https://replicate.delivery/b.webp", "https://x"])).as_deref(),
            Some("https://replicate.delivery/b.webp")
        );
        assert_eq!(first_url(&json!([])), None);
        assert_eq!(first_url(&json!("")), None);
        assert_eq!(first_url(&json!({"url": "nope"})), None);
    }

    #[test]
    fn joined_text_concatenates_tokens() {
        assert_eq!(
            joined_text(&json!(["Hel", "lo", " there"])).as_deref(),
            Some("Hello there")
        );
        assert_eq!(joined_text(&json!("whole")).as_deref(), Some("whole"));
        assert_eq!(joined_text(&json!(42)), None);
    }

    #[test]
    fn prediction_deserializes_in_progress() {
        let body = json!({
            "id": "p1",
            "status": "processing",
            "urls": {"get": "https://api.replicate.com/v1/predictions/p1"}
        });
        let prediction: Prediction = serde_json::from_value(body).unwrap();
        assert!(!prediction.status.is_terminal());
        assert!(prediction.output.is_none());
        assert_eq!(
            prediction.urls.unwrap().get,
            "https://api.replicate.com/v1/predictions/p1"
        );
    }
}
