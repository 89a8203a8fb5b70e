//! Client password hashing.
//!
//! Stored hashes are Argon2id PHC strings (`$argon2id$v=19$...`), so the
//! parameters and salt travel with each hash and old rows keep verifying if
//! the defaults change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a client's plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Check `password` against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; `Err` means the stored hash itself is unusable.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
