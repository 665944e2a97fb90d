use serde::Serialize;
use serde_json::{Map, Value};

/// Outcome flag carried by every response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseStatus {
    Success,
    Error,
}

/// ApiResponse - the `{status, message, data}` envelope returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub data: Value,
}

impl ApiResponse {
    pub fn new(status: ResponseStatus, message: impl Into<String>, data: Value) -> Self {
        Self {
            status,
            message: message.into(),
            data,
        }
    }

    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self::new(ResponseStatus::Success, message, data)
    }

    pub fn error(message: impl Into<String>, data: Value) -> Self {
        Self::new(ResponseStatus::Error, message, data)
    }

    /// Envelope with an empty `data` object
    pub fn message_only(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self::new(status, message, Value::Object(Map::new()))
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}
