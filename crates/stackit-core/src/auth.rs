//! Bearer credential verification port.
//!
//! The identity gate in `stackit-api` hands the raw token to a
//! [`TokenVerifier`] and receives the caller's user ID back. Signature
//! schemes live in `stackit-infra`.

use std::sync::Arc;

use stackit_types::error::AuthError;
use stackit_types::identity::{Caller, UserId};

/// Verifies a bearer token and yields the subject it was issued to.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<UserId, AuthError>;
}

/// Shared, type-erased verifier held by application state.
pub type DynTokenVerifier = Arc<dyn TokenVerifier>;

/// Parse an `Authorization` header value and verify the bearer token in it.
///
/// `None` means the header was absent.
pub fn authenticate(
    verifier: &dyn TokenVerifier,
    authorization: Option<&str>,
) -> Result<Caller, AuthError> {
    let header = authorization.ok_or(AuthError::MissingCredential)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::MalformedCredential("expected 'Bearer <token>'".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }

    let user_id = verifier.verify(token)?;
    Ok(Caller { user_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts tokens of the form `user:<id>`.
    struct PrefixVerifier;

    impl TokenVerifier for PrefixVerifier {
        fn verify(&self, token: &str) -> Result<UserId, AuthError> {
            token
                .strip_prefix("user:")
                .map(UserId::from)
                .ok_or_else(|| AuthError::InvalidToken("unknown token".to_string()))
        }
    }

    #[test]
    fn test_authenticate_valid_bearer() {
        let caller = authenticate(&PrefixVerifier, Some("Bearer user:u1")).unwrap();
        assert_eq!(caller.user_id, UserId::from("u1"));
    }

    #[test]
    fn test_authenticate_missing_header() {
        let err = authenticate(&PrefixVerifier, None).unwrap_err();
        assert!(matches!(err, AuthError::MissingCredential));
    }

    #[test]
    fn test_authenticate_wrong_scheme() {
        let err = authenticate(&PrefixVerifier, Some("Basic dTE6cHc=")).unwrap_err();
        assert!(matches!(err, AuthError::MalformedCredential(_)));
    }

    #[test]
    fn test_authenticate_empty_token() {
        let err = authenticate(&PrefixVerifier, Some("Bearer   ")).unwrap_err();
        assert!(matches!(err, AuthError::MissingCredential));
    }

    #[test]
    fn test_authenticate_rejected_token() {
        let err = authenticate(&PrefixVerifier, Some("Bearer nope")).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }
}
