//! Login, registration and token authentication.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use storedesk_core::{Clock, ServiceError, ServiceResult, UserId};

use crate::{
    Caller, CredentialStore, PasswordHasher, PublicUser, Role, TokenClaims, TokenCodec, User,
};

/// Tunables for the auth service.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Validity window of issued tokens.
    pub token_ttl: Duration,
    /// Roles a caller may request through public registration.
    pub self_register_roles: Vec<Role>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_ttl: Duration::hours(24),
            self_register_roles: vec![Role::User, Role::StoreOwner],
        }
    }
}

/// Input for account creation.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Option<Role>,
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicUser,
}

pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
    settings: AuthSettings,
    /// Verified against on unknown emails so both login failures cost the same.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
        settings: AuthSettings,
    ) -> ServiceResult<Self> {
        let dummy_hash = hasher
            .hash("storedesk-timing-equalizer")
            .map_err(|e| ServiceError::unexpected(e.to_string()))?;
        Ok(Self {
            users,
            hasher,
            tokens,
            clock,
            settings,
            dummy_hash,
        })
    }

    /// Verify a credential and issue a token.
    pub fn login(&self, email: &str, password: &str) -> ServiceResult<AuthSession> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ServiceError::validation("email and password are required"));
        }

        let Some(user) = self.users.find_by_email(email)? else {
            let _ = self.hasher.verify(password, &self.dummy_hash);
            tracing::warn!("login failed: unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash) {
            tracing::warn!(user_id = %user.id, "login failed: password mismatch");
            return Err(ServiceError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");
        self.issue_session(&user)
    }

    /// Public self-service registration.
    ///
    /// The requested role defaults to `user` and must be one of
    /// [`AuthSettings::self_register_roles`].
    pub fn register(&self, registration: Registration) -> ServiceResult<AuthSession> {
        let role = registration.role.unwrap_or_default();
        if !self.settings.self_register_roles.contains(&role) {
            tracing::warn!(%role, "registration denied for role");
            return Err(ServiceError::Forbidden);
        }

        let user = self.create_account(registration, role)?;
        self.issue_session(&user)
    }

    /// Validate input, hash the password and insert a new account with `role`.
    ///
    /// Callers are responsible for deciding whether `role` may be granted.
    pub fn create_account(&self, registration: Registration, role: Role) -> ServiceResult<User> {
        let email = registration.email.trim();
        let name = registration.name.trim();
        if email.is_empty() || registration.password.is_empty() || name.is_empty() {
            return Err(ServiceError::validation("email, password and name are required"));
        }

        let password_hash = self
            .hasher
            .hash(&registration.password)
            .map_err(|e| ServiceError::unexpected(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            password_hash,
            name: name.to_string(),
            role,
            created_at: self.clock.now(),
        };

        let user = self.users.insert_unique(user)?;
        tracing::info!(user_id = %user.id, %role, "account created");
        Ok(user)
    }

    /// Resolve a bearer token into the caller context.
    ///
    /// Missing, malformed, badly signed and expired tokens all collapse into
    /// `Unauthenticated`.
    pub fn authenticate(&self, token: Option<&str>) -> ServiceResult<Caller> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ServiceError::Unauthenticated)?;

        self.tokens
            .verify(token, self.clock.now())
            .map(Caller::from)
            .map_err(|e| {
                tracing::debug!("token rejected: {e}");
                ServiceError::Unauthenticated
            })
    }

    /// Current record of the authenticated caller.
    pub fn profile(&self, caller: &Caller) -> ServiceResult<PublicUser> {
        self.users
            .find_by_id(caller.id)?
            .map(|u| u.public_view())
            .ok_or(ServiceError::NotFound)
    }

    fn issue_session(&self, user: &User) -> ServiceResult<AuthSession> {
        let claims = TokenClaims::new(
            user.id,
            user.email.clone(),
            user.role,
            self.clock.now(),
            self.settings.token_ttl,
        );
        let token = self
            .tokens
            .issue(&claims)
            .map_err(|e| ServiceError::unexpected(e.to_string()))?;
        Ok(AuthSession {
            token,
            user: user.public_view(),
        })
    }
}
