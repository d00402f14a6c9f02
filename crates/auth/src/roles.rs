use serde::{Deserialize, Serialize};

/// Back-office role, stored as a profile attribute by the identity provider.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    InventoryManager,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::InventoryManager => "inventory-manager",
            Role::Viewer => "viewer",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "inventory-manager" => Ok(Role::InventoryManager),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_kebab_case_names() {
        let json = serde_json::to_string(&Role::InventoryManager).unwrap();
        assert_eq!(json, "\"inventory-manager\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::InventoryManager);
        assert_eq!("viewer".parse::<Role>().unwrap(), Role::Viewer);
        assert!("owner".parse::<Role>().is_err());
    }
}
