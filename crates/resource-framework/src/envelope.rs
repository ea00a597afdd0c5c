//! # Response Envelope
//!
//! Every outcome of a mutating operation, success or failure, is returned to the client
//! inside the same JSON shape:
//!
//! ```json
//! {
//!   "status": 201,
//!   "timestamp": "2024-05-01T09:30:00.000+00:00",
//!   "message": "Creation successful",
//!   "path": "/products/APPLE-001",
//!   "error": null,
//!   "exception": null,
//!   "errors": null,
//!   "payload": { "reference": "APPLE-001" }
//! }
//! ```
//!
//! `payload` is omitted entirely when absent. Failure envelopes are produced by
//! [`crate::decoder::ErrorDecoder`]; this module only builds successes.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::ResourceError;
use crate::lifecycle::OperationKind;

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// `"404 NOT_FOUND"` style status line.
pub fn status_line(status: u16) -> String {
    let reason = match status {
        STATUS_OK => "OK",
        STATUS_CREATED => "CREATED",
        STATUS_BAD_REQUEST => "BAD_REQUEST",
        STATUS_NOT_FOUND => "NOT_FOUND",
        _ => "INTERNAL_SERVER_ERROR",
    };
    format!("{status} {reason}")
}

pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// One entry of a failure chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemDetail {
    pub message: String,
    pub exception: String,
}

impl From<&ResourceError> for ProblemDetail {
    fn from(error: &ResourceError) -> Self {
        Self {
            message: error.to_string(),
            exception: error.kind().name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope<T> {
    pub status: u16,
    pub timestamp: String,
    pub message: String,
    pub path: String,
    pub error: Option<String>,
    pub exception: Option<String>,
    pub errors: Option<Vec<ProblemDetail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    /// Success envelope for `kind` at `location`.
    pub fn success(kind: OperationKind, location: impl Into<String>, payload: T) -> Self {
        Self {
            status: success_status(kind),
            timestamp: timestamp(),
            message: success_message(kind).to_string(),
            path: location.into(),
            error: None,
            exception: None,
            errors: None,
            payload: Some(payload),
        }
    }

    pub(crate) fn failure(
        status: u16,
        message: String,
        path: String,
        exception: String,
        problems: Vec<ProblemDetail>,
    ) -> Self {
        Self {
            status,
            timestamp: timestamp(),
            message,
            path,
            error: Some(status_line(status)),
            exception: Some(exception),
            errors: Some(problems),
            payload: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status < STATUS_BAD_REQUEST
    }

    pub fn problems(&self) -> &[ProblemDetail] {
        self.errors.as_deref().unwrap_or(&[])
    }
}

pub const fn success_status(kind: OperationKind) -> u16 {
    match kind {
        OperationKind::Create => STATUS_CREATED,
        _ => STATUS_OK,
    }
}

pub const fn success_message(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Create => "Creation successful",
        OperationKind::FullUpdate => "Update successful",
        OperationKind::PartialUpdate => "Partial update successful",
        OperationKind::Delete => "Deletion successful",
        OperationKind::Other => "Operation successful",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_success_statuses_and_messages() {
        let created = ResponseEnvelope::success(OperationKind::Create, "/products/APPLE-001", 1);
        assert_eq!(created.status, 201);
        assert_eq!(created.message, "Creation successful");
        assert_eq!(created.path, "/products/APPLE-001");
        assert!(created.is_success());

        for (kind, message) in [
            (OperationKind::FullUpdate, "Update successful"),
            (OperationKind::PartialUpdate, "Partial update successful"),
            (OperationKind::Delete, "Deletion successful"),
            (OperationKind::Other, "Operation successful"),
        ] {
            let envelope = ResponseEnvelope::success(kind, "/x/ABCDE", ());
            assert_eq!(envelope.status, 200);
            assert_eq!(envelope.message, message);
        }
    }

    #[test]
    fn test_success_json_shape() {
        let envelope = ResponseEnvelope::success(
            OperationKind::Create,
            "/products/APPLE-001",
            json!({"reference": "APPLE-001"}),
        );
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], 201);
        assert_eq!(value["error"], Value::Null);
        assert_eq!(value["exception"], Value::Null);
        assert_eq!(value["errors"], Value::Null);
        assert_eq!(value["payload"]["reference"], "APPLE-001");
        assert!(chrono::DateTime::parse_from_rfc3339(value["timestamp"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_absent_payload_is_omitted() {
        let envelope = ResponseEnvelope::<Value>::failure(
            404,
            "gone".to_string(),
            "/products".to_string(),
            "NotFoundError".to_string(),
            vec![],
        );
        let value = serde_json::to_value(&envelope).unwrap();
        assert!(value.get("payload").is_none());
        assert_eq!(value["error"], "404 NOT_FOUND");
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(status_line(400), "400 BAD_REQUEST");
        assert_eq!(status_line(500), "500 INTERNAL_SERVER_ERROR");
    }
}
