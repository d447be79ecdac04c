use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier, `"{area}.{action}"` (e.g. `"inventory.write"`).
///
/// The wildcard `"*"` grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const ALL: Permission = Permission::named("*");

    pub const READ: Permission = Permission::named("data.read");
    pub const INVENTORY_WRITE: Permission = Permission::named("inventory.write");
    pub const INVENTORY_DELETE: Permission = Permission::named("inventory.delete");
    pub const CATALOG_WRITE: Permission = Permission::named("catalog.write");
    pub const SHIPMENTS_WRITE: Permission = Permission::named("shipments.write");
    pub const MAINTENANCE_WRITE: Permission = Permission::named("maintenance.write");
    pub const SPACE_WRITE: Permission = Permission::named("space.write");
    pub const REPORTS_WRITE: Permission = Permission::named("reports.write");
    pub const ASSISTANT_USE: Permission = Permission::named("assistant.use");

    pub const fn named(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
