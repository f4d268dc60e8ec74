use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::Response,
    Json,
};
use serde_json::Value;

use crate::app::dto::ListQuery;
use crate::app::errors::{json_error, proxy_error_to_response, Operation};
use crate::app::routes::relay;
use crate::app::upstream::{Backend, UpstreamCall};
use crate::context::{CallerAuthorization, CorrelationId};

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const INVALID_ID_MESSAGE: &str = "Invalid user id";

/// Ids are opaque to the proxy but must stay a single path segment.
fn is_valid_id(id: &str) -> bool {
    let id = id.trim();
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

/// `/v1/users/{id}` call, or the response to send when it cannot be built.
fn user_call(
    op: Operation,
    backend: &Backend,
    method: reqwest::Method,
    id: &str,
    auth: &CallerAuthorization,
    correlation: &CorrelationId,
) -> Result<UpstreamCall, Response> {
    if !is_valid_id(id) {
        tracing::warn!(op = op.as_str(), id, "rejecting user id that is not a single path segment");
        return Err(json_error(StatusCode::BAD_REQUEST, INVALID_ID_MESSAGE));
    }
    backend
        .request_user(method, id)
        .map(|c| c.authorization(auth).correlation(correlation))
        .map_err(|e| {
            tracing::error!(op = op.as_str(), error = %e, "cannot build backend url");
            proxy_error_to_response(op, e)
        })
}

fn call(
    backend: &Backend,
    method: reqwest::Method,
    path: &str,
    auth: &CallerAuthorization,
    correlation: &CorrelationId,
) -> UpstreamCall {
    backend
        .request(method, path)
        .authorization(auth)
        .correlation(correlation)
}

/// `GET /api/users?page&size` becomes `POST /v1/users/list`.
pub async fn list(
    Extension(backend): Extension<Backend>,
    Extension(auth): Extension<CallerAuthorization>,
    Extension(correlation): Extension<CorrelationId>,
    Query(query): Query<ListQuery>,
) -> Response {
    let req = query.into_request();
    let upstream = call(&backend, reqwest::Method::POST, "/v1/users/list", &auth, &correlation).json(&req);
    relay(Operation::ListUsers, upstream, StatusCode::OK).await
}

pub async fn create(
    Extension(backend): Extension<Backend>,
    Extension(auth): Extension<CallerAuthorization>,
    Extension(correlation): Extension<CorrelationId>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return json_error(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE);
    };
    let upstream = call(&backend, reqwest::Method::POST, "/v1/users", &auth, &correlation).json(&body);
    relay(Operation::CreateUser, upstream, StatusCode::CREATED).await
}

pub async fn get(
    Extension(backend): Extension<Backend>,
    Extension(auth): Extension<CallerAuthorization>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
) -> Response {
    let upstream = match user_call(Operation::GetUser, &backend, reqwest::Method::GET, &id, &auth, &correlation) {
        Ok(call) => call,
        Err(resp) => return resp,
    };
    relay(Operation::GetUser, upstream, StatusCode::OK).await
}

pub async fn update(
    Extension(backend): Extension<Backend>,
    Extension(auth): Extension<CallerAuthorization>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return json_error(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE);
    };
    let upstream = match user_call(Operation::UpdateUser, &backend, reqwest::Method::PUT, &id, &auth, &correlation) {
        Ok(call) => call.json(&body),
        Err(resp) => return resp,
    };
    relay(Operation::UpdateUser, upstream, StatusCode::OK).await
}

pub async fn delete(
    Extension(backend): Extension<Backend>,
    Extension(auth): Extension<CallerAuthorization>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
) -> Response {
    let upstream = match user_call(Operation::DeleteUser, &backend, reqwest::Method::DELETE, &id, &auth, &correlation) {
        Ok(call) => call,
        Err(resp) => return resp,
    };
    relay(Operation::DeleteUser, upstream, StatusCode::OK).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_a_single_segment() {
        assert!(is_valid_id("u-42"));
        assert!(is_valid_id("0190c6b2-7f3e-7d4a-9f2b-1c2d3e4f5a6b"));
        assert!(is_valid_id("a?b"));
        for bad in ["", " ", ".", "..", "x/../../admin/purge", "a\\b"] {
            assert!(!is_valid_id(bad), "{bad:?}");
        }
    }
}
