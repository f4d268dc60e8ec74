//! Axum router for the console proxy.
//!
//! - `routes/`: handlers, one file per area
//! - `upstream.rs`: backend client
//! - `dto.rs`: request shapes on both sides
//! - `errors.rs`: `{success: false, message}` responses

use axum::{middleware::from_fn, routing::{get, post}, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod upstream;

/// Build the full HTTP router forwarding to the backend at `backend_url`.
pub fn build_app(backend_url: impl Into<String>) -> Router {
    let backend = upstream::Backend::new(backend_url);

    // User routes: require a caller Authorization header.
    let protected = routes::router().route_layer(from_fn(middleware::auth_middleware));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/api/login", post(routes::auth::login))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(middleware::correlation_middleware))
                .layer(Extension(backend)),
        )
}
