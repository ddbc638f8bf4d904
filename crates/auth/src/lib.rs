//! `storedesk-auth`: authentication boundary.
//!
//! Credentials, signed tokens and the caller context. This crate is decoupled
//! from HTTP and from the storage backend (see [`CredentialStore`]).

pub mod claims;
pub mod password;
pub mod principal;
pub mod roles;
pub mod service;
pub mod token;
pub mod user;

pub use claims::{TokenClaims, TokenValidationError, validate_claims};
pub use password::{Argon2Hasher, PasswordHashError, PasswordHasher};
pub use principal::Caller;
pub use roles::Role;
pub use service::{AuthService, AuthSession, AuthSettings, Registration};
pub use token::{Hs256Tokens, TokenCodec, TokenError};
pub use user::{CredentialStore, PublicUser, User};
