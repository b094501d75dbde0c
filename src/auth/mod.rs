//! Authentication: bootstrap admin key, personal access keys and session
//! tokens.

mod extractor;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::SessionClaims;

pub use extractor::{AdminOrSession, AuthError, SessionAuth};

/// Issuer claim stamped into every session token.
pub const SESSION_ISSUER: &str = "exam-portal";
/// Personal access key prefix.
const ACCESS_KEY_PREFIX: &str = "pk_";

/// Wrapper type for the bootstrap admin key.
/// Uses `SecretString` to prevent accidental logging and zeroize on drop.
#[derive(Clone)]
pub struct AdminKey(Option<SecretString>);

impl AdminKey {
    pub fn new(key: Option<SecretString>) -> Self {
        Self(key)
    }

    /// Constant-time comparison against the configured key.
    ///
    /// Always false when no admin key is configured.
    pub fn verify(&self, provided: &str) -> bool {
        match &self.0 {
            Some(secret) => secret
                .expose_secret()
                .as_bytes()
                .ct_eq(provided.as_bytes())
                .into(),
            None => false,
        }
    }
}

impl std::fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(_) => write!(f, "AdminKey([REDACTED])"),
            None => write!(f, "AdminKey(None)"),
        }
    }
}

/// Signs and verifies HS256 session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    secret: SecretString,
    ttl_secs: u64,
}

impl SessionKeys {
    pub fn new(secret: SecretString, ttl_secs: u64) -> Self {
        Self { secret, ttl_secs }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Issue a token for a profile.
    pub fn issue(&self, user_id: Uuid, username: &str) -> AppResult<String> {
        let now = Utc::now();
        let ttl = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);
        let exp = now.timestamp().saturating_add(ttl);

        let claims = SessionClaims {
            sub: user_id.to_string(),
            iss: SESSION_ISSUER.to_string(),
            exp: exp.max(0) as usize,
            iat: now.timestamp().max(0) as usize,
            username: username.to_string(),
        };

        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &key).map_err(signing_error)
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, String> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[SESSION_ISSUER]);
        validation.validate_aud = false;

        let token_data = decode::<SessionClaims>(token, &key, &validation)
            .map_err(|e| format!("Invalid session token: {}", e))?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("secret", &"[REDACTED]")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

/// Generate a new personal access key. Returned to the user once.
pub fn generate_access_key() -> String {
    let random_bytes: [u8; 24] = rand::random();
    format!("{}{}", ACCESS_KEY_PREFIX, hex::encode(random_bytes))
}

/// Hash an access key using SHA-256.
pub fn hash_access_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-time check of a presented key against a stored hash.
pub fn verify_access_key(provided: &str, stored_hash: &str) -> bool {
    hash_access_key(provided)
        .as_bytes()
        .ct_eq(stored_hash.as_bytes())
        .into()
}

fn signing_error(err: jsonwebtoken::errors::Error) -> AppError {
    AppError::Internal(format!("Failed to create session token: {}", err))
}
