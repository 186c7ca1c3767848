//! Structured error body emitted by the backend on failed requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "code": 400, "message": "...", "data": { "field": "reason" } }`
///
/// `data` carries per-field validation messages when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiErrorBody {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Per-field validation messages, if the backend attached any.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let Some(Value::Object(map)) = &self.data else {
            return Vec::new();
        };

        let mut fields: Vec<(String, String)> = map
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|msg| (k.clone(), msg.to_string())))
            .collect();
        fields.sort();
        fields
    }
}
