//! API request and response types.
//!
//! The execute response body is [`crate::execution::ExecutionResult`]
//! serialized as-is; only the request side needs dedicated DTOs.

use serde::{Deserialize, Serialize};

use crate::execution::CommandSpec;

/// Request body for `/execute` and `/execute/stream`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteRequest {
    /// The command line to execute.
    pub command: String,
    /// Timeout in seconds. Absent or zero means no timeout.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl ExecuteRequest {
    /// Convert into an executable command spec.
    pub fn spec(&self) -> CommandSpec {
        CommandSpec::new(&self.command).timeout_secs(self.timeout)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is up.
    pub status: &'static str,
    /// Human-readable status line.
    pub message: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            message: "Sandbox Runtime is active.",
        }
    }
}

/// Generic message response used by the file endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome description.
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_execute_request_deserialization() {
        let req: ExecuteRequest =
            serde_json::from_str(r#"{"command": "echo hello", "timeout": 30}"#).unwrap();
        assert_eq!(req.command, "echo hello");
        assert_eq!(req.timeout, Some(30));
        assert_eq!(req.spec().timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_execute_request_timeout_optional() {
        let req: ExecuteRequest = serde_json::from_str(r#"{"command": "ls"}"#).unwrap();
        assert!(req.timeout.is_none());
        assert!(req.spec().timeout.is_none());
    }

    #[test]
    fn test_execute_request_zero_timeout_is_unbounded() {
        let req: ExecuteRequest =
            serde_json::from_str(r#"{"command": "ls", "timeout": 0}"#).unwrap();
        assert!(req.spec().timeout.is_none());
    }

    #[test]
    fn test_health_response_serialization() {
        let json = serde_json::to_value(HealthResponse::ok()).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["message"].as_str().unwrap().contains("active"));
    }

    #[test]
    fn test_message_response_serialization() {
        let json = serde_json::to_value(MessageResponse::new("File not found")).unwrap();
        assert_eq!(json["message"], "File not found");
    }
}
