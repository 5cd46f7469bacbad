use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use once_cell::sync::Lazy;
use password_hash::{PasswordHash, SaltString};

use super::StoreError;

/// Hash a password into an Argon2id PHC string.
pub fn hash_password(password: &str) -> Result<String, StoreError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| StoreError::PasswordHash(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| StoreError::PasswordHash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| StoreError::PasswordHash(e.to_string()))
}

/// Check a password against a stored PHC string. Unparseable hashes never verify.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

// Same parameters as real account hashes, so a miss costs as much as a hit.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("tourdesk-no-such-account").ok());

/// Run a full verification that can never succeed.
///
/// Used when no account matches a login attempt, so unknown emails take as
/// long to reject as wrong passwords.
pub fn verify_missing_account(password: &str) -> bool {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(hash, password);
    }
    false
}
