use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::Response,
    Json,
};

use crate::app::dto::{BackendLoginRequest, LoginRequest};
use crate::app::errors::{json_error, Operation};
use crate::app::routes::relay;
use crate::app::upstream::Backend;
use crate::context::CorrelationId;

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password are required";

/// `POST /api/login`: the email is sent to the backend as `username`.
pub async fn login(
    Extension(backend): Extension<Backend>,
    Extension(correlation): Extension<CorrelationId>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    if !body.is_complete() {
        return json_error(StatusCode::BAD_REQUEST, MISSING_CREDENTIALS_MESSAGE);
    }

    let call = backend
        .request(reqwest::Method::POST, "/v1/users/login")
        .correlation(&correlation)
        .json(&BackendLoginRequest {
            username: body.email.trim(),
            password: &body.password,
        });
    relay(Operation::Login, call, StatusCode::OK).await
}
