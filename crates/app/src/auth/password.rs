//! Password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use once_cell::sync::Lazy;

use crate::auth::AuthServiceError;

/// Hash of a random throwaway password, verified against when a login names an
/// unknown user so that both failure paths pay for one Argon2id verification.
static DECOY_PASSWORD_HASH: Lazy<Option<String>> = Lazy::new(|| {
    let throwaway = SaltString::generate(&mut OsRng);

    hash_password(throwaway.as_str()).ok()
});

/// Hash a password with Argon2id and a fresh random salt.
///
/// Returns the PHC string, which embeds the algorithm parameters and salt.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(AuthServiceError::PasswordHash)
}

/// Verify a password by recomputing its hash against the stored PHC string.
pub(crate) fn verify_password(password: &str, hash: &str) -> Result<(), AuthServiceError> {
    let parsed_hash = PasswordHash::new(hash).map_err(AuthServiceError::PasswordHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthServiceError::InvalidCredentials)
}

/// Compute the decoy hash up front so the first unknown-user login is not slower.
pub(crate) fn prepare_decoy_hash() {
    Lazy::force(&DECOY_PASSWORD_HASH);
}

/// Burn one verification against the decoy hash. Always fails.
pub(crate) fn verify_decoy(password: &str) -> AuthServiceError {
    if let Some(hash) = DECOY_PASSWORD_HASH.as_deref() {
        let _mismatch = verify_password(password, hash);
    }

    AuthServiceError::InvalidCredentials
}
