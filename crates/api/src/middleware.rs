use std::time::Instant;

use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::app::errors::json_error;
use crate::context::{CallerAuthorization, CorrelationId, CORRELATION_HEADER};

pub const MISSING_TOKEN_MESSAGE: &str = "Unauthorized - No token provided";

/// Tags every request with a [`CorrelationId`], echoes it on the response
/// and logs the outcome.
pub async fn correlation_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let id = CorrelationId::from_header(
        req.headers()
            .get(CORRELATION_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(id.clone());

    let span = tracing::info_span!("request", correlation_id = %id, %method, %path);
    let started = Instant::now();
    let mut resp = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(id.as_str()) {
        resp.headers_mut().insert(CORRELATION_HEADER, value);
    }

    tracing::info!(
        correlation_id = %id,
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );
    resp
}

/// Rejects user routes that carry no `Authorization` header.
///
/// The header is not interpreted here; the backend owns token validation.
pub async fn auth_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let auth = extract_authorization(req.headers())
        .ok_or_else(|| json_error(StatusCode::UNAUTHORIZED, MISSING_TOKEN_MESSAGE))?;
    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}

fn extract_authorization(headers: &HeaderMap) -> Option<CallerAuthorization> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    if header.trim().is_empty() {
        return None;
    }
    Some(CallerAuthorization::new(header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    #[test]
    fn authorization_is_kept_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(
            extract_authorization(&headers).map(|a| a.as_str().to_string()),
            Some("Bearer abc.def".to_string())
        );
    }

    #[test]
    fn missing_or_blank_authorization_is_rejected() {
        assert!(extract_authorization(&HeaderMap::new()).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("  "));
        assert!(extract_authorization(&headers).is_none());
    }
}
