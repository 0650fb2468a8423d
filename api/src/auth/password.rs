//! Argon2 password hashing.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use tracing::{debug, instrument};

use crate::error::{AppError, AppResult};

/// Hashes a plain-text password into a PHC string.
#[instrument(name = "password::hash", skip(password))]
pub fn hash(password: &str) -> AppResult<String> {
    if password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    debug!("Password hashed");
    Ok(password_hash)
}

/// Checks `password` against a stored PHC string.
///
/// A mismatch is `Ok(false)`; only a corrupt stored hash is an error.
#[instrument(name = "password::verify", skip_all)]
pub fn verify(stored_hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
