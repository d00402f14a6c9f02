use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "inventory.read").
/// The wildcard permission `"*"` grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: Permission = Permission(Cow::Borrowed("*"));
    pub const INVENTORY_READ: Permission = Permission(Cow::Borrowed("inventory.read"));
    pub const INVENTORY_WRITE: Permission = Permission(Cow::Borrowed("inventory.write"));
    pub const AI_FORECAST: Permission = Permission(Cow::Borrowed("ai.forecast"));
    pub const AI_CONTENT: Permission = Permission(Cow::Borrowed("ai.content"));

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
