//! HS256 session tokens.

use chrono::{DateTime, TimeDelta, Utc};
use gw_core::access::Caller;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;

use crate::claims::SessionClaims;
use crate::error::AuthError;

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens with one shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// # Errors
    ///
    /// Returns `AuthError::NotConfigured` for an empty secret.
    pub fn new(secret: &str, ttl_hours: u32) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::NotConfigured);
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: TimeDelta::hours(i64::from(ttl_hours)),
        })
    }

    /// Issue a token for `caller`, valid from now for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Other` if signing fails.
    pub fn issue(&self, caller: Caller, national_id: Option<String>) -> Result<IssuedToken, AuthError> {
        let claims = SessionClaims::new(caller, national_id, Utc::now(), self.ttl);
        let expires_at = claims.expires_at().unwrap_or_else(Utc::now);
        Ok(IssuedToken {
            token: self.sign(&claims)?,
            expires_at,
        })
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Other` if signing fails.
    pub fn sign(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Other(format!("token signing failed: {e}")))
    }

    /// Verify signature and expiry and return the claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenExpired` for an expired token and
    /// `AuthError::InvalidToken` for anything else that fails validation.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }

    /// Verify a token and resolve the caller it names.
    ///
    /// # Errors
    ///
    /// Same as [`Self::verify`] and [`SessionClaims::to_caller`].
    pub fn authenticate(&self, token: &str) -> Result<(Caller, SessionClaims), AuthError> {
        let claims = self.verify(token)?;
        Ok((claims.to_caller()?, claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_core::enums::Role;
    use pretty_assertions::assert_eq;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret", 24).unwrap()
    }

    #[test]
    fn issued_token_verifies() {
        let signer = signer();
        let issued = signer
            .issue(Caller::Student { id: 7 }, Some("GOMJ050312HDFRRN09".into()))
            .unwrap();
        let (caller, claims) = signer.authenticate(&issued.token).unwrap();
        assert_eq!(caller, Caller::Student { id: 7 });
        assert_eq!(claims.national_id.as_deref(), Some("GOMJ050312HDFRRN09"));
        assert!(issued.expires_at > Utc::now());
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = signer();
        let claims = SessionClaims::new(
            Caller::Tutor { id: 3 },
            None,
            Utc::now() - TimeDelta::hours(48),
            TimeDelta::hours(24),
        );
        let token = signer.sign(&claims).unwrap();
        assert!(matches!(signer.verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other = TokenSigner::new("another-secret", 24).unwrap();
        let issued = other.issue(Caller::Admin { id: 1 }, None).unwrap();
        assert!(matches!(
            signer().verify(&issued.token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            signer().verify("not.a.token"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn empty_secret_is_not_configured() {
        assert!(matches!(TokenSigner::new("", 24), Err(AuthError::NotConfigured)));
    }

    #[test]
    fn role_survives_signing() {
        let signer = signer();
        for role in [Role::Student, Role::Tutor, Role::Admin] {
            let issued = signer.issue(Caller::new(role, 11), None).unwrap();
            assert_eq!(signer.verify(&issued.token).unwrap().role, role);
        }
    }
}
