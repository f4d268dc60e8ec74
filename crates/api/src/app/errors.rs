use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

/// Proxied operation; selects the messages used when it fails.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Login,
    ListUsers,
    CreateUser,
    GetUser,
    UpdateUser,
    DeleteUser,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::ListUsers => "list_users",
            Operation::CreateUser => "create_user",
            Operation::GetUser => "get_user",
            Operation::UpdateUser => "update_user",
            Operation::DeleteUser => "delete_user",
        }
    }

    /// Used when the backend rejects the call without a message.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Login => "Login failed",
            Operation::ListUsers => "Failed to fetch users",
            Operation::CreateUser => "Failed to create user",
            Operation::GetUser => "Failed to fetch user",
            Operation::UpdateUser => "Failed to update user",
            Operation::DeleteUser => "Failed to delete user",
        }
    }

    /// Used when the call could not complete at all.
    pub fn error_message(self) -> &'static str {
        match self {
            Operation::Login => "An error occurred during login. Please try again.",
            Operation::ListUsers => "An error occurred while fetching users",
            Operation::CreateUser => "An error occurred while creating user",
            Operation::GetUser => "An error occurred while fetching user",
            Operation::UpdateUser => "An error occurred while updating user",
            Operation::DeleteUser => "An error occurred while deleting user",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Backend answered with a non-success status.
    #[error("backend returned {status}")]
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("backend returned an unreadable body: {0}")]
    InvalidBody(String),
}

pub fn proxy_error_to_response(op: Operation, err: ProxyError) -> axum::response::Response {
    match err {
        ProxyError::Upstream { status, message } => {
            let message = message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| op.failure_message().to_string());
            json_error(status, message)
        }
        ProxyError::Unreachable(_) | ProxyError::InvalidBody(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, op.error_message())
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "message": message.into(),
        })),
    )
        .into_response()
}
