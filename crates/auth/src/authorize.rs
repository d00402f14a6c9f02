use thiserror::Error;

use crate::{Permission, Principal, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{role}' lacks permission '{permission}'")]
    Forbidden { role: Role, permission: String },
}

static ADMIN: [Permission; 1] = [Permission::WILDCARD];

static INVENTORY_MANAGER: [Permission; 4] = [
    Permission::INVENTORY_READ,
    Permission::INVENTORY_WRITE,
    Permission::AI_FORECAST,
    Permission::AI_CONTENT,
];

static VIEWER: [Permission; 1] = [Permission::INVENTORY_READ];

/// Role → permission policy.
pub fn permissions_for_role(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => &ADMIN,
        Role::InventoryManager => &INVENTORY_MANAGER,
        Role::Viewer => &VIEWER,
    }
}

/// Authorize a principal for a single permission.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    let granted = principal
        .permissions()
        .iter()
        .any(|p| p.is_wildcard() || p == required);

    if granted {
        Ok(())
    } else {
        tracing::debug!(
            user_id = %principal.user_id,
            role = %principal.role,
            permission = %required,
            "authorization denied"
        );
        Err(AuthzError::Forbidden {
            role: principal.role,
            permission: required.as_str().to_string(),
        })
    }
}
