use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::app::errors::{proxy_error_to_response, Operation, ProxyError};
use crate::app::upstream::UpstreamCall;

pub mod auth;
pub mod system;
pub mod users;

/// Routes that need the caller's `Authorization` header.
pub fn router() -> Router {
    Router::new()
        .route("/api/users", get(users::list).post(users::create))
        .route(
            "/api/users/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
}

/// Send `call` and map the result onto the proxy response shape.
pub(crate) async fn relay(op: Operation, call: UpstreamCall, success: StatusCode) -> Response {
    match call.send().await {
        Ok(body) => (success, Json(body)).into_response(),
        Err(err) => {
            match &err {
                ProxyError::Upstream { status, message } => {
                    tracing::warn!(op = op.as_str(), status = status.as_u16(), ?message, "backend rejected call");
                }
                other => tracing::error!(op = op.as_str(), error = %other, "backend call failed"),
            }
            proxy_error_to_response(op, err)
        }
    }
}
