use serde::{Deserialize, Serialize};

use crate::{ModulePermissions, PermissionSet};

/// Role name carried by a session.
///
/// Known roles are matched case-insensitively; anything else is kept verbatim
/// in `Other` and grants nothing by default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Manager,
    Worker,
    Viewer,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Worker => "WORKER",
            Role::Viewer => "VIEWER",
            Role::Other(name) => name,
        }
    }

    /// Grants applied when a session carries no explicit permission list.
    ///
    /// Administrators get view + write everywhere, other known roles view only.
    pub fn default_permissions(&self) -> PermissionSet {
        match self {
            Role::Admin => PermissionSet::uniform(ModulePermissions::FULL),
            Role::Manager | Role::Worker | Role::Viewer => {
                PermissionSet::uniform(ModulePermissions::VIEW)
            }
            Role::Other(_) => PermissionSet::empty(),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.trim().to_uppercase().as_str() {
            "ADMIN" => Role::Admin,
            "MANAGER" => Role::Manager,
            "WORKER" => Role::Worker,
            "VIEWER" => Role::Viewer,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
