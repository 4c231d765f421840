//! bcrypt password hashing.
//!
//! Both functions are CPU-bound; async callers run them on a blocking thread.

use crate::error::AuthError;
use crate::generate_secret;

/// Hash `password` with the given bcrypt cost.
///
/// # Errors
///
/// Returns `AuthError::Hashing` for a cost outside bcrypt's 4..=31 range.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// A hash of a random throwaway secret, at `cost`.
///
/// Login verifies against it when the account does not exist, so unknown and
/// known accounts cost the same bcrypt work. No password matches it.
///
/// # Errors
///
/// Returns `AuthError::Hashing` for an invalid cost, or `AuthError::Other` if
/// the OS random source is unavailable.
pub fn decoy_hash(cost: u32) -> Result<String, AuthError> {
    hash_password(&generate_secret()?, cost)
}

/// Check `password` against a stored hash.
///
/// A malformed stored hash counts as a mismatch and is logged.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is malformed");
            false
        }
    }
}
