//! # gw-auth
//!
//! Credential checks and session tokens for gradewatch.
//!
//! Passwords are stored as bcrypt hashes. Sessions are HS256 bearer tokens
//! whose claims resolve to a [`gw_core::access::Caller`].

pub mod claims;
pub mod error;
pub mod password;
pub mod token;

pub use claims::SessionClaims;
pub use error::AuthError;
pub use token::{IssuedToken, TokenSigner};

/// Extract the token from an `Authorization: Bearer <token>` header value.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Generate a random hex secret suitable for `auth.token_secret`.
///
/// # Errors
///
/// Returns `AuthError::Other` if the OS random source is unavailable.
pub fn generate_secret() -> Result<String, AuthError> {
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes).map_err(|e| AuthError::Other(format!("random source: {e}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}
