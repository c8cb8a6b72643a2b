//! Structured transport errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ApiErrorKind {
    /// Server answered with a non-2xx status
    Status,
    /// Connection, timeout or other I/O failure before a status was received
    Network,
    /// Body was not valid JSON, or did not have the expected shape
    Decode,
}

/// Error reported by a [`Transport`](crate::Transport)
///
/// Carried as the payload of failure actions, so it is plain data: cloneable
/// and comparable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Status,
            message: message.into(),
            status: Some(code),
        }
    }

    /// Non-2xx reply with the default message
    pub fn from_status_code(code: u16) -> Self {
        Self::status(code, format!("Request failed with status code {}", code))
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: message.into(),
            status: None,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            message: message.into(),
            status: None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::decode(error.to_string())
        } else if let Some(status) = error.status() {
            Self::status(status.as_u16(), error.to_string())
        } else {
            Self::network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::decode(error.to_string())
    }
}
