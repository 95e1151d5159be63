//! The uniform response envelope.
//!
//! Every gateway reply has the shape
//! `{ success, code, message, data?, error? }`. `code` is 0 on success and
//! mirrors the HTTP status otherwise.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// HTTP status codes used by the gateway.
pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
    pub const SERVICE_UNAVAILABLE: u16 = 503;
}

/// Response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// A status code paired with its body; what every gateway handler returns.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: ApiResponse,
}

impl Reply {
    /// Successful reply carrying `data`.
    pub fn ok<T: Serialize>(message: impl Into<String>, data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self {
                status: status::OK,
                body: ApiResponse {
                    success: true,
                    code: 0,
                    message: message.into(),
                    data: Some(data),
                    error: None,
                },
            },
            Err(e) => {
                error!(error = %e, "failed to serialize response data");
                Self::error(
                    status::INTERNAL_SERVER_ERROR,
                    "internal server error",
                    e.to_string(),
                )
            }
        }
    }

    /// Failed reply. The cause goes in `error` so it is never swallowed.
    pub fn error(status: u16, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiResponse {
                success: false,
                code: status,
                message: message.into(),
                data: None,
                error: Some(error.into()),
            },
        }
    }

    /// Reply for a route that does not exist.
    pub fn not_found(path: &str) -> Self {
        Self::error(status::NOT_FOUND, "endpoint not found", format!("no route for {path}"))
    }

    /// Reply for a route that exists but not under `method`.
    pub fn method_not_allowed(method: &str, path: &str) -> Self {
        Self::error(
            status::METHOD_NOT_ALLOWED,
            "method not allowed",
            format!("{method} is not supported on {path}"),
        )
    }

    pub fn is_success(&self) -> bool {
        self.body.success
    }

    /// `data` field, or `Value::Null` when absent.
    pub fn data(&self) -> &Value {
        self.body.data.as_ref().unwrap_or(&Value::Null)
    }

    /// Serialize the body.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.body).unwrap_or_else(|e| {
            format!(
                r#"{{"success":false,"code":500,"message":"internal server error","error":{:?}}}"#,
                e.to_string()
            )
        })
    }
}
