//! `adminconsole-auth`: permission gate and session model.
//!
//! This crate is intentionally decoupled from HTTP and storage: it maps the
//! backend's raw permission list to per-module capabilities and answers
//! view/write queries. Enforcement happens in the action handlers that call
//! [`authorize_action`].

pub mod authorize;
pub mod gate;
pub mod module;
pub mod permissions;
pub mod roles;
pub mod session;

pub use authorize::{
    AuthorizationExplanation, AuthzError, RequiresCapability, authorize, authorize_action, explain,
};
pub use gate::{ModulePermissions, PermissionGate, PermissionSet};
pub use module::{ModuleId, UnknownModule};
pub use permissions::{Capability, Permission, PermissionLevel};
pub use roles::Role;
pub use session::{Session, SessionError};
