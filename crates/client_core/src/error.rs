use reqwest::StatusCode;
use shared::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request never reached the server: {0}")]
    Network(#[source] reqwest::Error),
    #[error("server answered {status}: {message}")]
    Http { status: StatusCode, message: String },
    #[error("malformed response from {route}: {reason}")]
    InvalidResponse { route: String, reason: String },
    #[error("rejected before submission: {0}")]
    Validation(#[from] ValidationError),
    #[error("this action requires an authorized session")]
    NotAuthorized,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
