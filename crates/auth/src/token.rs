//! Signed token capability.
//!
//! The rest of the system treats tokens as opaque: [`TokenCodec::issue`] turns
//! claims into a string, [`TokenCodec::verify`] turns a string back into claims
//! or fails. The HS256 implementation below is the only one shipped.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::{TokenClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad encoding or bad signature.
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Issue and verify signed claims.
pub trait TokenCodec: Send + Sync {
    fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError>;

    /// Verify signature, decode, then check the time window against `now`.
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError>;
}

/// HMAC-SHA256 signed JWTs.
pub struct Hs256Tokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256Tokens {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `validate_claims` against an injected clock.
        validation.validate_exp = false;
        validation.required_spec_claims = ["sub", "exp"].into_iter().map(String::from).collect();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl core::fmt::Debug for Hs256Tokens {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256Tokens").field("secret", &"[REDACTED]").finish()
    }
}

impl TokenCodec for Hs256Tokens {
    fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use chrono::Duration;
    use storedesk_core::UserId;

    fn claims(now: DateTime<Utc>) -> TokenClaims {
        TokenClaims::new(UserId::new(), "owner@store.com", Role::StoreOwner, now, Duration::hours(24))
    }

    #[test]
    fn issued_token_verifies() {
        let tokens = Hs256Tokens::new(b"test-secret");
        let now = Utc::now();
        let claims = claims(now);

        let token = tokens.issue(&claims).unwrap();
        let decoded = tokens.verify(&token, now).unwrap();

        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.role, Role::StoreOwner);
        assert_eq!(decoded.email, "owner@store.com");
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let now = Utc::now();
        let token = Hs256Tokens::new(b"one").issue(&claims(now)).unwrap();
        let err = Hs256Tokens::new(b"two").verify(&token, now).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = Hs256Tokens::new(b"test-secret");
        let now = Utc::now();
        let token = tokens.issue(&claims(now)).unwrap();

        let err = tokens.verify(&token, now + Duration::hours(25)).unwrap_err();
        assert_eq!(err, TokenError::Claims(TokenValidationError::Expired));
    }

    #[test]
    fn garbage_is_malformed() {
        let tokens = Hs256Tokens::new(b"test-secret");
        assert!(matches!(
            tokens.verify("not.a.jwt", Utc::now()),
            Err(TokenError::Malformed(_))
        ));
    }
}
