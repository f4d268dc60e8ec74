use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Logical administrative area that permissions are scoped to.
///
/// Backend resource names are free text; they are resolved to this closed set
/// through [`ModuleId::resolve`]. Anything that does not resolve is ignored by
/// the permission mapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleId {
    Users,
    Products,
    Warehouse,
    Reports,
    Settings,
}

/// Resource-name aliases accepted from the backend (matched case-insensitively).
const ALIASES: &[(&str, ModuleId)] = &[
    ("user", ModuleId::Users),
    ("users", ModuleId::Users),
    ("product", ModuleId::Products),
    ("products", ModuleId::Products),
    ("warehouse", ModuleId::Warehouse),
    ("warehouses", ModuleId::Warehouse),
    ("report", ModuleId::Reports),
    ("reports", ModuleId::Reports),
    ("setting", ModuleId::Settings),
    ("settings", ModuleId::Settings),
];

impl ModuleId {
    pub const ALL: [ModuleId; 5] = [
        ModuleId::Users,
        ModuleId::Products,
        ModuleId::Warehouse,
        ModuleId::Reports,
        ModuleId::Settings,
    ];

    /// Canonical module id for a backend resource name, if one exists.
    pub fn resolve(resource: &str) -> Option<ModuleId> {
        let key = resource.trim().to_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, module)| *module)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleId::Users => "users",
            ModuleId::Products => "products",
            ModuleId::Warehouse => "warehouse",
            ModuleId::Reports => "reports",
            ModuleId::Settings => "settings",
        }
    }
}

impl core::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown module '{0}'")]
pub struct UnknownModule(pub String);

impl FromStr for ModuleId {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleId::resolve(s).ok_or_else(|| UnknownModule(s.to_string()))
    }
}
