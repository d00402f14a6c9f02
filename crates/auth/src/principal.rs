use shopdesk_core::UserId;

use crate::{permissions_for_role, Permission, Role};

/// An authenticated back-office user, resolved from verified token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Effective permissions granted by the principal's role.
    pub fn permissions(&self) -> &'static [Permission] {
        permissions_for_role(self.role)
    }
}
