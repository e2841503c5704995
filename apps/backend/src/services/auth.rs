//! Credential checks, password hashing and session tokens.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{ApiError, Result};

/// Minimum length for both username and password.
pub const MIN_CREDENTIAL_LEN: usize = 6;

const BCRYPT_COST: u32 = 10;

/// Reject usernames or passwords shorter than [`MIN_CREDENTIAL_LEN`].
pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().chars().count() < MIN_CREDENTIAL_LEN
        || password.chars().count() < MIN_CREDENTIAL_LEN
    {
        return Err(ApiError::BadRequest(format!(
            "Username and password must be at least {} characters",
            MIN_CREDENTIAL_LEN
        )));
    }
    Ok(())
}

/// Hash a password with bcrypt.
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| ApiError::Internal(e.to_string()))
}

/// Check a password against a stored bcrypt hash. Malformed hashes never match.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

/// Fresh bearer token handed to the client.
pub fn new_session_token() -> String {
    Uuid::new_v4().to_string()
}

/// SHA-256 hex digest of a token, as stored in the sessions table.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
