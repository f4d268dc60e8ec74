use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// Result of a console operation as presented to the operator.
///
/// Every externally visible operation resolves to one of these; errors are
/// folded into `message` and never escape raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Outcome<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Fold a console result, logging the failure at the level its kind warrants.
    pub fn from_result(
        operation: &'static str,
        result: Result<T, ConsoleError>,
        success_message: &str,
        fallback: &str,
    ) -> Self {
        match result {
            Ok(data) => {
                tracing::info!(operation, "operation succeeded");
                Self::ok(success_message, data)
            }
            Err(err) => {
                match &err {
                    ConsoleError::Validation(_) => {
                        tracing::debug!(operation, error = %err, "rejected by validation")
                    }
                    ConsoleError::Directory(e) => {
                        tracing::warn!(operation, status = ?e.status(), error = %err, "operation refused")
                    }
                    ConsoleError::Authz(_) | ConsoleError::Session(_) => {
                        tracing::warn!(operation, error = %err, "operation refused")
                    }
                    ConsoleError::Store(_) | ConsoleError::Domain(_) => {
                        tracing::error!(operation, error = %err, "operation failed unexpectedly")
                    }
                }
                Self::failure(err.user_message(fallback))
            }
        }
    }
}
