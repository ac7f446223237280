// src/message.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /chat`. `message` stays loosely typed so a wrong type is
/// reported as a validation error instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Value,
}

impl ChatRequest {
    /// The message text, if present as a non-empty string.
    pub fn text(&self) -> Option<&str> {
        match &self.message {
            Value::String(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Body of `POST /predict`. Numeric fields may arrive as numbers or strings.
/// An absent numeric field is `None`; an explicit `null` is `Some(Value::Null)`.
#[derive(Debug, Default, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub crop: Value,
    #[serde(default, deserialize_with = "present")]
    pub area: Option<Value>,
    #[serde(default)]
    pub soil: Value,
    #[serde(default, deserialize_with = "present")]
    pub rain: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub fertilizer: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub result: String,
    pub chart_data: ChartData,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub your_field: String,
    pub avg_region: String,
}
