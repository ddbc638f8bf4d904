//! User administration and the credential-store adapter.

use std::sync::Arc;

use storedesk_auth::{AuthService, Caller, CredentialStore, PublicUser, Registration, User};
use storedesk_catalog::policy;
use storedesk_core::{ServiceError, ServiceResult, UserId};

use crate::repository::Repository;

impl CredentialStore for Repository<User> {
    fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        Ok(self.all()?.into_iter().find(|u| u.email == email))
    }

    fn find_by_id(&self, id: UserId) -> ServiceResult<Option<User>> {
        self.find(&id)
    }

    fn insert_unique(&self, user: User) -> ServiceResult<User> {
        self.mutate(|users| {
            if users.iter().any(|u| u.email == user.email) {
                return Err(ServiceError::DuplicateEmail);
            }
            users.push(user.clone());
            Ok(user)
        })
    }
}

pub struct UserAdminService {
    users: Arc<Repository<User>>,
    auth: Arc<AuthService>,
}

impl UserAdminService {
    pub fn new(users: Arc<Repository<User>>, auth: Arc<AuthService>) -> Self {
        Self { users, auth }
    }

    pub fn list(&self, caller: &Caller) -> ServiceResult<Vec<PublicUser>> {
        policy::require(policy::can_list_users(caller))?;
        Ok(self.users.all()?.iter().map(User::public_view).collect())
    }

    /// Admin-side account creation; any role may be granted.
    pub fn create(&self, caller: &Caller, registration: Registration) -> ServiceResult<PublicUser> {
        policy::require(policy::can_create_user(caller))?;
        let role = registration.role.unwrap_or_default();
        let user = self.auth.create_account(registration, role)?;
        tracing::info!(actor = %caller.id, user_id = %user.id, %role, "user created by admin");
        Ok(user.public_view())
    }

    pub fn delete(&self, caller: &Caller, id: UserId) -> ServiceResult<PublicUser> {
        let removed = self.users.remove(&id, |_| {
            if !policy::can_delete_user(caller) {
                tracing::warn!(actor = %caller.id, user_id = %id, "user delete denied");
                return Err(ServiceError::Forbidden);
            }
            if id == caller.id {
                return Err(ServiceError::validation("you cannot delete your own account"));
            }
            Ok(())
        })?;
        tracing::info!(actor = %caller.id, user_id = %id, "user deleted");
        Ok(removed.public_view())
    }
}
