use serde::Serialize;
use thiserror::Error;

use crate::{Capability, ModuleId, PermissionGate};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("forbidden: missing {capability} access to {module}")]
    Forbidden {
        module: ModuleId,
        capability: Capability,
    },
}

impl AuthzError {
    /// Message shown to the user when an action is refused.
    pub fn user_message(&self) -> String {
        match self {
            AuthzError::Unauthenticated => "Please sign in to continue".to_string(),
            AuthzError::Forbidden { module, capability } => match capability {
                Capability::View => format!("You do not have permission to view {module}"),
                Capability::Write => format!("You do not have permission to modify {module}"),
            },
        }
    }
}

/// Action-side authorization contract.
///
/// Implement this on every action that reaches the backend. Handlers must
/// call [`authorize_action`] before doing any IO, independently of whether
/// the triggering control was rendered enabled.
pub trait RequiresCapability {
    fn module(&self) -> ModuleId;
    fn capability(&self) -> Capability;
}

/// Check a single capability against the gate.
///
/// - No IO
/// - No panics
/// - Fails closed for absent callers
pub fn authorize(
    gate: &PermissionGate,
    module: ModuleId,
    capability: Capability,
) -> Result<(), AuthzError> {
    if !gate.is_authenticated() {
        return Err(AuthzError::Unauthenticated);
    }

    if gate.module(module).allows(capability) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden { module, capability })
    }
}

pub fn authorize_action<A: RequiresCapability + ?Sized>(
    gate: &PermissionGate,
    action: &A,
) -> Result<(), AuthzError> {
    authorize(gate, action.module(), action.capability())
}

/// Auditable record of an authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationExplanation {
    pub module: ModuleId,
    pub capability: Capability,
    pub granted: bool,
    pub reason: String,
}

/// Explain why an authorization decision was (or would be) made.
pub fn explain(
    gate: &PermissionGate,
    module: ModuleId,
    capability: Capability,
) -> AuthorizationExplanation {
    let held = gate.module(module);
    let (granted, reason) = match authorize(gate, module, capability) {
        Ok(()) => (true, format!("caller holds {capability} on {module}")),
        Err(AuthzError::Unauthenticated) => (false, "no authenticated caller".to_string()),
        Err(AuthzError::Forbidden { .. }) => (
            false,
            format!(
                "caller holds view={} write={} on {module}; {capability} required",
                held.view(),
                held.write()
            ),
        ),
    };

    AuthorizationExplanation {
        module,
        capability,
        granted,
        reason,
    }
}
