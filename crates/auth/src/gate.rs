//! Module-level permission gate.
//!
//! The gate answers "may the current caller view / write module X" and is the
//! single source consulted by both rendering code and action handlers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Capability, ModuleId, Permission};

/// Derived {view, write} pair for one module.
///
/// Invariant: `write == true` implies `view == true`. Fields are private so
/// the invariant can only be established through the constructors.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawModulePermissions")]
pub struct ModulePermissions {
    view: bool,
    write: bool,
}

#[derive(Deserialize)]
struct RawModulePermissions {
    #[serde(default)]
    view: bool,
    #[serde(default)]
    write: bool,
}

impl TryFrom<RawModulePermissions> for ModulePermissions {
    type Error = &'static str;

    fn try_from(raw: RawModulePermissions) -> Result<Self, Self::Error> {
        if raw.write && !raw.view {
            return Err("write permission requires view permission");
        }
        Ok(Self { view: raw.view, write: raw.write })
    }
}

impl ModulePermissions {
    pub const NONE: ModulePermissions = ModulePermissions { view: false, write: false };
    pub const VIEW: ModulePermissions = ModulePermissions { view: true, write: false };
    pub const FULL: ModulePermissions = ModulePermissions { view: true, write: true };

    pub fn view(&self) -> bool {
        self.view
    }

    pub fn write(&self) -> bool {
        self.write
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::View => self.view,
            Capability::Write => self.write,
        }
    }

    /// Raise to at least `capability`; never lowers an existing grant.
    pub fn grant(&mut self, capability: Capability) {
        if capability.implies(Capability::View) {
            self.view = true;
        }
        if capability.implies(Capability::Write) {
            self.write = true;
        }
    }
}

/// Per-module permissions held by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    modules: BTreeMap<ModuleId, ModulePermissions>,
}

impl PermissionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Same grant on every module.
    pub fn uniform(grant: ModulePermissions) -> Self {
        Self {
            modules: ModuleId::ALL.iter().map(|m| (*m, grant)).collect(),
        }
    }

    /// Map a raw backend permission list onto modules.
    ///
    /// Resource names go through the alias table; unmapped resources and
    /// unknown levels are logged and skipped. Entries for the same module
    /// accumulate, so the highest capability wins regardless of order.
    pub fn from_permissions<'a, I>(permissions: I) -> Self
    where
        I: IntoIterator<Item = &'a Permission>,
    {
        let mut set = Self::empty();
        for perm in permissions {
            let Some(module) = ModuleId::resolve(&perm.resource) else {
                tracing::warn!(resource = %perm.resource, "ignoring permission for unknown resource");
                continue;
            };
            let Some(capability) = perm.level.capability() else {
                tracing::warn!(
                    resource = %perm.resource,
                    level = perm.level.as_str(),
                    "ignoring permission with unknown level"
                );
                continue;
            };
            set.grant(module, capability);
        }
        set
    }

    pub fn grant(&mut self, module: ModuleId, capability: Capability) {
        self.modules.entry(module).or_default().grant(capability);
    }

    pub fn get(&self, module: ModuleId) -> ModulePermissions {
        self.modules.get(&module).copied().unwrap_or(ModulePermissions::NONE)
    }

    /// Modules with at least view access, in canonical order.
    pub fn visible_modules(&self) -> Vec<ModuleId> {
        ModuleId::ALL.into_iter().filter(|m| self.get(*m).view()).collect()
    }
}

/// Stateless capability queries over the current caller's permissions.
///
/// A gate without a caller denies everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionGate {
    caller: Option<PermissionSet>,
}

impl PermissionGate {
    /// Gate for an absent / signed-out caller.
    pub fn anonymous() -> Self {
        Self { caller: None }
    }

    pub fn for_caller(permissions: PermissionSet) -> Self {
        Self {
            caller: Some(permissions),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.caller.is_some()
    }

    pub fn module(&self, module: ModuleId) -> ModulePermissions {
        self.caller
            .as_ref()
            .map(|set| set.get(module))
            .unwrap_or(ModulePermissions::NONE)
    }

    pub fn can_view(&self, module: ModuleId) -> bool {
        self.module(module).view()
    }

    pub fn can_write(&self, module: ModuleId) -> bool {
        self.module(module).write()
    }

    /// String-keyed lookup for callers holding a raw module name.
    /// Unknown names fail closed.
    pub fn can(&self, module: &str, capability: Capability) -> bool {
        match ModuleId::resolve(module) {
            Some(m) => self.module(m).allows(capability),
            None => false,
        }
    }
}
