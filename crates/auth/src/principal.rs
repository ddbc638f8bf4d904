use serde::{Deserialize, Serialize};

use storedesk_core::UserId;

use crate::{Role, TokenClaims};

/// Authenticated identity of the caller of a protected operation.
///
/// Built from verified token claims and passed explicitly into every policy
/// and service call; nothing reads a "current user" from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}

impl Caller {
    pub fn new(id: UserId, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_store_owner(&self) -> bool {
        self.role == Role::StoreOwner
    }
}

impl From<TokenClaims> for Caller {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}
