//! Bearer token verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::claims::{validate_claims, JwtClaims, TokenValidationError};

/// Verifies a bearer token and yields its claims.
pub trait JwtValidator: Send + Sync + 'static {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

/// HMAC-SHA256 validator sharing a secret with the identity provider.
///
/// Time-window checks are done by [`validate_claims`] against the caller's
/// clock, not by `jsonwebtoken`, because the claims carry RFC 3339 timestamps
/// rather than numeric `exp`/`iat`.
#[derive(Clone)]
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(&secret),
            validation,
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        let data = decode::<JwtClaims>(token, &self.key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenValidationError::BadSignature,
            _ => TokenValidationError::Malformed(e.to_string()),
        })?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use shopdesk_core::UserId;

    use super::*;
    use crate::Role;

    fn mint(secret: &str, claims: &JwtClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(now: DateTime<Utc>) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            role: Role::InventoryManager,
            issued_at: now,
            expires_at: now + Duration::minutes(10),
        }
    }

    #[test]
    fn valid_token_yields_claims() {
        let now = Utc::now();
        let c = claims(now);
        let validator = Hs256JwtValidator::new(b"secret".to_vec());

        let decoded = validator.validate(&mint("secret", &c), now).unwrap();
        assert_eq!(decoded, c);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let now = Utc::now();
        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        let err = validator
            .validate(&mint("other", &claims(now)), now)
            .unwrap_err();
        assert_eq!(err, TokenValidationError::BadSignature);
    }

    #[test]
    fn expired_token_is_rejected_after_signature_check() {
        let now = Utc::now();
        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        let token = mint("secret", &claims(now));
        let err = validator.validate(&token, now + Duration::hours(1)).unwrap_err();
        assert_eq!(err, TokenValidationError::Expired);
    }

    #[test]
    fn garbage_is_malformed() {
        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        assert!(matches!(
            validator.validate("not.a.token", Utc::now()),
            Err(TokenValidationError::Malformed(_))
        ));
    }
}
