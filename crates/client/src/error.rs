use thiserror::Error;

use adminconsole_auth::{AuthzError, SessionError};
use adminconsole_core::{DomainError, ValidationErrors};

/// Failure talking to the user directory (proxy or backend).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status. `message` is the backend's own text, when it
    /// sent one.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("<no message>"))]
    Api { status: u16, message: Option<String> },

    #[error("parse error: {0}")]
    Parse(String),
}

impl DirectoryError {
    pub fn status(&self) -> Option<u16> {
        match self {
            DirectoryError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure reading or writing the persisted session blob.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session blob is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("session storage is unavailable: {0}")]
    Unavailable(String),
}

/// Everything an operation of the users console can fail with.
///
/// Never shown raw: [`ConsoleError::user_message`] turns it into the text the
/// operator sees.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Authz(#[from] AuthzError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(DomainError),
}

impl From<ValidationErrors> for ConsoleError {
    fn from(value: ValidationErrors) -> Self {
        ConsoleError::Validation(value)
    }
}

impl From<DomainError> for ConsoleError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(errors) => ConsoleError::Validation(errors),
            other => ConsoleError::Domain(other),
        }
    }
}

impl ConsoleError {
    /// Operator-facing message. `fallback` is used when the upstream gave no
    /// message of its own, and for unexpected failures.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ConsoleError::Validation(errors) => errors
                .errors()
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| fallback.to_string()),
            ConsoleError::Authz(e) => e.user_message(),
            ConsoleError::Directory(DirectoryError::Api {
                message: Some(message),
                ..
            }) if !message.trim().is_empty() => message.clone(),
            ConsoleError::Session(e) => e.user_message().to_string(),
            ConsoleError::Directory(_) | ConsoleError::Store(_) | ConsoleError::Domain(_) => {
                fallback.to_string()
            }
        }
    }

    pub fn is_denial(&self) -> bool {
        matches!(self, ConsoleError::Authz(_))
    }
}
