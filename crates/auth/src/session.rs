use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use adminconsole_core::SessionId;

use crate::{Permission, PermissionGate, PermissionSet, Role};

/// Authenticated caller as persisted between page loads.
///
/// This is the one JSON blob kept in local storage; it is enough to rebuild
/// the permission gate without a network round-trip. Signature verification
/// of `token` is the backend's job and happens on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "id")]
    pub session_id: SessionId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Bearer token sent on every authenticated request.
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Explicit grants from the backend. `None` falls back to role defaults;
    /// `Some(vec![])` means "no grants".
    #[serde(default, alias = "permission", skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session token is missing")]
    MissingToken,

    #[error("session has expired")]
    Expired,

    #[error("invalid session time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

impl SessionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::MissingToken => "Your session has no access token. Please sign in again",
            SessionError::Expired => "Your session has expired. Please sign in again",
            SessionError::InvalidTimeWindow => {
                "Your session has an invalid validity window. Please sign in again"
            }
        }
    }
}

impl Session {
    /// Deterministically validate the session at `now`.
    ///
    /// `issued_at` comes from the backend clock and is only checked against
    /// `expires_at`, never against `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.token.trim().is_empty() {
            return Err(SessionError::MissingToken);
        }
        if let (Some(issued), Some(expires)) = (self.issued_at, self.expires_at) {
            if expires <= issued {
                return Err(SessionError::InvalidTimeWindow);
            }
        }
        if let Some(expires) = self.expires_at {
            if now >= expires {
                return Err(SessionError::Expired);
            }
        }
        Ok(())
    }

    /// Effective per-module permissions for this caller.
    pub fn permission_set(&self) -> PermissionSet {
        match &self.permissions {
            Some(list) => PermissionSet::from_permissions(list),
            None => self.role.default_permissions(),
        }
    }

    /// Gate for this session at `now`; an invalid session yields a gate
    /// that denies everything.
    pub fn gate(&self, now: DateTime<Utc>) -> PermissionGate {
        match self.validate(now) {
            Ok(()) => PermissionGate::for_caller(self.permission_set()),
            Err(e) => {
                tracing::debug!(error = %e, "session not usable; gating as anonymous");
                PermissionGate::anonymous()
            }
        }
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
