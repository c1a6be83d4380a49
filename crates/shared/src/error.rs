use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    NotFound,
    Validation,
    Internal,
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A payload or draft that breaks a schema rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{entity} has an empty {field}")]
    Empty {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity} {field} is out of range: {value}")]
    OutOfRange {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("comment must be at least {min} characters, got {actual}")]
    CommentTooShort { min: usize, actual: usize },
    #[error("comment must be at most {max} characters, got {actual}")]
    CommentTooLong { max: usize, actual: usize },
    #[error("rating must be between 1 and 5, got {0}")]
    RatingUnset(u8),
}
