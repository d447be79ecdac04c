use std::collections::HashSet;

use thiserror::Error;

use crate::{Permission, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Implemented by request commands that need permissions.
/// The API layer checks these before touching the data service.
pub trait CommandAuthorization {
    fn required_permissions(&self) -> &[Permission];
}

/// Role → permission policy.
///
/// Users may read everything, add operational records and move statuses
/// along. Deleting stock and editing the category/warehouse catalog is
/// admin-only.
pub fn permissions_for(role: Role) -> Vec<Permission> {
    match role {
        Role::Admin => vec![Permission::ALL],
        Role::User => vec![
            Permission::READ,
            Permission::INVENTORY_WRITE,
            Permission::SHIPMENTS_WRITE,
            Permission::MAINTENANCE_WRITE,
            Permission::SPACE_WRITE,
            Permission::REPORTS_WRITE,
            Permission::ASSISTANT_USE,
        ],
    }
}

/// Pure policy check. No IO.
pub fn authorize(role: Role, required: &Permission) -> Result<(), AuthzError> {
    let granted = permissions_for(role);
    let perms: HashSet<&str> = granted.iter().map(|p| p.as_str()).collect();

    if perms.contains("*") || perms.contains(required.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}
