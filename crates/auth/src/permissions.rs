use serde::{Deserialize, Serialize};

/// Capability level within a module. `Write` implies `View`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    View,
    Write,
}

impl Capability {
    /// Whether holding `self` also grants `other`.
    pub fn implies(self, other: Capability) -> bool {
        self >= other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::View => "view",
            Capability::Write => "write",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission level as sent by the backend.
///
/// `read` and `view` are synonyms. Levels the console does not understand are
/// kept verbatim so they survive a session round-trip, but grant nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PermissionLevel {
    Read,
    View,
    Write,
    Other(String),
}

impl PermissionLevel {
    pub fn capability(&self) -> Option<Capability> {
        match self {
            PermissionLevel::Read | PermissionLevel::View => Some(Capability::View),
            PermissionLevel::Write => Some(Capability::Write),
            PermissionLevel::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PermissionLevel::Read => "read",
            PermissionLevel::View => "view",
            PermissionLevel::Write => "write",
            PermissionLevel::Other(s) => s,
        }
    }
}

impl From<String> for PermissionLevel {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "read" => PermissionLevel::Read,
            "view" => PermissionLevel::View,
            "write" => PermissionLevel::Write,
            _ => PermissionLevel::Other(value),
        }
    }
}

impl From<PermissionLevel> for String {
    fn from(value: PermissionLevel) -> Self {
        value.as_str().to_string()
    }
}

/// A single grant from the backend: (resource, level, optional description).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub resource: String,
    #[serde(rename = "permission")]
    pub level: PermissionLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Permission {
    pub fn new(resource: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            id: None,
            resource: resource.into(),
            level: PermissionLevel::from(level.into()),
            description: None,
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.resource, self.level.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn write_implies_view() {
        assert!(Capability::Write.implies(Capability::View));
        assert!(Capability::Write.implies(Capability::Write));
        assert!(!Capability::View.implies(Capability::Write));
    }

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(PermissionLevel::from("READ".to_string()), PermissionLevel::Read);
        assert_eq!(PermissionLevel::from("Write".to_string()).capability(), Some(Capability::Write));
        assert_eq!(PermissionLevel::from("admin".to_string()).capability(), None);
    }

    #[test]
    fn deserializes_backend_shape() {
        let raw = json!({
            "id": "p-1",
            "resource": "user",
            "permission": "write",
            "description": "Manage users"
        });
        let perm: Permission = serde_json::from_value(raw).unwrap();

        assert_eq!(perm.resource, "user");
        assert_eq!(perm.level, PermissionLevel::Write);
        assert_eq!(perm.to_string(), "user.write");

        let back = serde_json::to_value(&perm).unwrap();
        assert_eq!(back["permission"], "write");
    }
}
