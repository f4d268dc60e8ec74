//! Port to the user-management backend, plus its HTTP adapter.
//!
//! The adapter speaks to the proxy routes (`/api/login`, `/api/users…`), which
//! require a bearer token on every user route and answer with the backend's
//! `{success, message, data}` envelope.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use adminconsole_auth::{Permission, Role, Session};
use adminconsole_core::{DomainResult, SessionId, UserId};

use crate::error::DirectoryError;
use crate::users::{NewUser, UserRecord, UserUpdate};

/// Backend response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

/// A list payload is either a bare array or a page object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UserList {
    Items(Vec<UserRecord>),
    Page {
        #[serde(alias = "content")]
        items: Vec<UserRecord>,
    },
}

impl UserList {
    pub fn into_vec(self) -> Vec<UserRecord> {
        match self {
            UserList::Items(items) | UserList::Page { items } => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantedRole {
    #[serde(default)]
    pub id: Option<String>,
    pub name: Role,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// `data` of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub session_id: String,
    pub username: String,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub role: GrantedRole,
}

impl LoginGrant {
    /// Session blob to persist for this grant. `email` is what the operator
    /// signed in with.
    pub fn into_session(self, email: &str) -> DomainResult<Session> {
        Ok(Session {
            session_id: SessionId::parse(self.session_id)?,
            name: self.username,
            email: email.to_string(),
            role: self.role.name,
            token: self.access_token,
            refresh_token: self.refresh_token,
            issued_at: self.issued_at,
            expires_at: self.expires_at,
            permissions: Some(self.role.permissions),
        })
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// User-management operations the console depends on.
///
/// `token` is the caller's bearer token; implementations send it on every
/// call except `login`.
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, DirectoryError>;

    async fn list_users(
        &self,
        token: &str,
        page: u32,
        size: u32,
    ) -> Result<Vec<UserRecord>, DirectoryError>;

    async fn get_user(&self, token: &str, id: &UserId) -> Result<UserRecord, DirectoryError>;

    /// The backend may answer without echoing the persisted record.
    async fn create_user(
        &self,
        token: &str,
        user: &NewUser,
    ) -> Result<Option<UserRecord>, DirectoryError>;

    async fn update_user(
        &self,
        token: &str,
        id: &UserId,
        update: &UserUpdate,
    ) -> Result<Option<UserRecord>, DirectoryError>;

    async fn delete_user(&self, token: &str, id: &UserId) -> Result<(), DirectoryError>;
}

/// [`UserDirectory`] over the console proxy.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    base_url: String,
    http: reqwest::Client,
}

impl HttpUserDirectory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/api/users/{id}` with the id as one percent-encoded segment.
    fn user_url(&self, id: &UserId) -> Result<reqwest::Url, DirectoryError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| DirectoryError::Network(format!("invalid base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| DirectoryError::Network("base url cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["api", "users", id.as_str()]);
        Ok(url)
    }

    /// Check connectivity by hitting the health endpoint.
    pub async fn check_connectivity(&self) -> bool {
        match self.http.get(self.url("/health")).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, DirectoryError> {
        let resp = req
            .send()
            .await
            .map_err(|e| DirectoryError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DirectoryError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|e| e.message);
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Envelope {
                success: true,
                message: None,
                data: None,
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| DirectoryError::Parse(e.to_string()))?;
        if !envelope.success {
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: envelope.message,
            });
        }
        Ok(envelope)
    }
}

fn require_data<T>(envelope: Envelope<T>) -> Result<T, DirectoryError> {
    envelope
        .data
        .ok_or_else(|| DirectoryError::Parse("response envelope has no data".to_string()))
}

#[async_trait::async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, DirectoryError> {
        let req = self
            .http
            .post(self.url("/api/login"))
            .json(&LoginRequest { email, password });
        require_data(self.send(req).await?)
    }

    async fn list_users(
        &self,
        token: &str,
        page: u32,
        size: u32,
    ) -> Result<Vec<UserRecord>, DirectoryError> {
        let req = self
            .http
            .get(self.url("/api/users"))
            .query(&[("page", page), ("size", size)])
            .bearer_auth(token);
        let envelope: Envelope<UserList> = self.send(req).await?;
        Ok(envelope.data.map(UserList::into_vec).unwrap_or_default())
    }

    async fn get_user(&self, token: &str, id: &UserId) -> Result<UserRecord, DirectoryError> {
        let req = self
            .http
            .get(self.user_url(id)?)
            .bearer_auth(token);
        require_data(self.send(req).await?)
    }

    async fn create_user(
        &self,
        token: &str,
        user: &NewUser,
    ) -> Result<Option<UserRecord>, DirectoryError> {
        let req = self
            .http
            .post(self.url("/api/users"))
            .bearer_auth(token)
            .json(user);
        Ok(self.send(req).await?.data)
    }

    async fn update_user(
        &self,
        token: &str,
        id: &UserId,
        update: &UserUpdate,
    ) -> Result<Option<UserRecord>, DirectoryError> {
        let req = self
            .http
            .put(self.user_url(id)?)
            .bearer_auth(token)
            .json(update);
        Ok(self.send(req).await?.data)
    }

    async fn delete_user(&self, token: &str, id: &UserId) -> Result<(), DirectoryError> {
        let req = self
            .http
            .delete(self.user_url(id)?)
            .bearer_auth(token);
        self.send::<serde_json::Value>(req).await.map(|_| ())
    }
}
