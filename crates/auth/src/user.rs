//! Credential records and the storage seam the auth service depends on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storedesk_core::{Entity, ServiceResult, UserId};

use crate::Role;

/// A user account as persisted.
///
/// # Invariants
/// - `email` is unique across the collection (exact match).
/// - `role` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(alias = "password")]
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn public_view(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A user record with the password hash stripped. Safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Lookup/insert access to user credentials.
pub trait CredentialStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>>;

    fn find_by_id(&self, id: UserId) -> ServiceResult<Option<User>>;

    /// Insert `user` unless its email is already taken.
    ///
    /// The uniqueness check and the insert must be atomic with respect to other
    /// inserts; a taken email yields `ServiceError::DuplicateEmail`.
    fn insert_unique(&self, user: User) -> ServiceResult<User>;
}
