//! Client for the user-management backend.

use serde::Serialize;
use serde_json::Value;

use crate::app::errors::ProxyError;
use crate::context::{CallerAuthorization, CorrelationId, CORRELATION_HEADER};

/// Shared handle to the backend; cheap to clone.
#[derive(Debug, Clone)]
pub struct Backend {
    base_url: String,
    http: reqwest::Client,
}

impl Backend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn request(&self, method: reqwest::Method, path: &str) -> UpstreamCall {
        UpstreamCall {
            builder: self.http.request(method, format!("{}{}", self.base_url, path)),
        }
    }

    /// Call on `/v1/users/{id}` with `id` pushed as one percent-encoded segment.
    pub fn request_user(&self, method: reqwest::Method, id: &str) -> Result<UpstreamCall, ProxyError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ProxyError::Unreachable(format!("invalid backend url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ProxyError::Unreachable("backend url cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["v1", "users", id]);
        Ok(UpstreamCall {
            builder: self.http.request(method, url),
        })
    }
}

/// One backend call under construction.
pub struct UpstreamCall {
    builder: reqwest::RequestBuilder,
}

impl UpstreamCall {
    pub fn authorization(mut self, auth: &CallerAuthorization) -> Self {
        self.builder = self
            .builder
            .header(reqwest::header::AUTHORIZATION, auth.as_str());
        self
    }

    pub fn correlation(mut self, id: &CorrelationId) -> Self {
        self.builder = self.builder.header(CORRELATION_HEADER, id.as_str());
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.builder = self.builder.json(body);
        self
    }

    /// Send and decode the JSON body.
    ///
    /// A non-success status yields [`ProxyError::Upstream`] carrying the
    /// backend's `message`. An empty success body reads as `{"success": true}`.
    pub async fn send(self) -> Result<Value, ProxyError> {
        let resp = self
            .builder
            .send()
            .await
            .map_err(|e| ProxyError::Unreachable(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ProxyError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));
            return Err(ProxyError::Upstream { status, message });
        }

        if text.trim().is_empty() {
            return Ok(serde_json::json!({ "success": true }));
        }
        serde_json::from_str(&text).map_err(|e| ProxyError::InvalidBody(e.to_string()))
    }
}
