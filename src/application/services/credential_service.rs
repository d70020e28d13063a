//! Credential Service
//!
//! Password hashing and bearer token primitives.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Unique token ID
    pub jti: String,
}

/// Signed access token handed back at signin.
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Credential primitive failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Credential failure: {0}")]
    Internal(String),
}

/// Argon2 hashing and HS256 tokens.
#[derive(Clone)]
pub struct CredentialService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_minutes: i64,
}

impl CredentialService {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            expiry_minutes: settings.expiry_minutes,
        }
    }

    /// Hash a password using Argon2id
    pub fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| CredentialError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Issue an access token for the user.
    pub fn issue_token(&self, user_id: i64) -> Result<AccessToken, CredentialError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::minutes(self.expiry_minutes)).timestamp(),
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| CredentialError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AccessToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expiry_minutes * 60,
        })
    }

    /// Validate a token and return the user ID it was issued for.
    pub fn verify_token(&self, token: &str) -> Result<i64, CredentialError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => CredentialError::TokenExpired,
                _ => CredentialError::InvalidToken,
            }
        })?;

        token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| CredentialError::InvalidToken)
    }

    #[cfg(test)]
    fn encode_claims(&self, claims: &Claims) -> String {
        encode(&Header::default(), claims, &self.encoding_key).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CredentialService {
        CredentialService::new(&JwtSettings {
            secret: "unit-test-secret-with-enough-length-for-hs256".into(),
            expiry_minutes: 60,
        })
    }

    #[test]
    fn test_password_roundtrip() {
        let service = service();
        let hash = service.hash_password("correct horse battery staple").unwrap();

        assert_ne!(hash, "correct horse battery staple");
        assert!(service.verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!service.verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_verify_against_garbage_hash_is_internal_error() {
        let result = service().verify_password("pw", "not-a-phc-string");
        assert!(matches!(result, Err(CredentialError::Internal(_))));
    }

    #[test]
    fn test_token_roundtrip() {
        let service = service();
        let token = service.issue_token(42).unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);
        assert_eq!(service.verify_token(&token.access_token), Ok(42));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_invalid() {
        let other = CredentialService::new(&JwtSettings {
            secret: "another-secret-that-is-also-long-enough-here".into(),
            expiry_minutes: 60,
        });
        let token = other.issue_token(1).unwrap();

        assert_eq!(
            service().verify_token(&token.access_token),
            Err(CredentialError::InvalidToken)
        );
    }

    #[test]
    fn test_expired_token() {
        let service = service();
        let now = Utc::now().timestamp();
        let token = service.encode_claims(&Claims {
            sub: "1".into(),
            exp: now - 120,
            iat: now - 3720,
            jti: "expired".into(),
        });

        assert_eq!(service.verify_token(&token), Err(CredentialError::TokenExpired));
    }

    #[test]
    fn test_malformed_token() {
        assert_eq!(
            service().verify_token("not.a.jwt"),
            Err(CredentialError::InvalidToken)
        );
    }

    #[test]
    fn test_non_numeric_subject_is_invalid() {
        let service = service();
        let now = Utc::now().timestamp();
        let token = service.encode_claims(&Claims {
            sub: "someone".into(),
            exp: now + 60,
            iat: now,
            jti: "x".into(),
        });

        assert_eq!(service.verify_token(&token), Err(CredentialError::InvalidToken));
    }
}
