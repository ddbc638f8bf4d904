use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storedesk_core::ServiceError;

/// Closed set of roles. Every authorization decision branches on this.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    StoreOwner,
    #[default]
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::StoreOwner, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::StoreOwner => "store_owner",
            Role::User => "user",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Role::Admin),
            "store_owner" => Ok(Role::StoreOwner),
            "user" => Ok(Role::User),
            other => Err(ServiceError::validation(format!(
                "unknown role '{other}' (expected admin, store_owner or user)"
            ))),
        }
    }
}
