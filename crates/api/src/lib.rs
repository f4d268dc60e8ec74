//! Authenticating proxy between the admin console and the user-management
//! backend.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;

pub use app::build_app;
pub use config::ProxyConfig;
