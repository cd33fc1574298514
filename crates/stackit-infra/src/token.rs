//! HS256 bearer token verification.
//!
//! Tokens are compact JWS strings (`header.payload.signature`, base64url
//! without padding). Only `HS256` is accepted. The subject is read from the
//! `userId` claim, falling back to the registered `sub` claim. `exp` is
//! honored when present, with a small clock leeway.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use stackit_core::auth::TokenVerifier;
use stackit_types::error::AuthError;
use stackit_types::identity::UserId;

type HmacSha256 = Hmac<Sha256>;

/// Seconds of clock skew tolerated when checking `exp`.
pub const DEFAULT_LEEWAY_SECS: i64 = 30;

/// Errors constructing a verifier.
#[derive(Debug, thiserror::Error)]
pub enum TokenSetupError {
    #[error("token secret must not be empty")]
    EmptySecret,

    #[error("invalid token secret: {0}")]
    InvalidKey(String),
}

/// Claims this service reads from a token payload. Unknown claims are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiry, seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued-at, seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Claims for `user_id` expiring `ttl_secs` from now.
    pub fn for_user(user_id: &str, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            user_id: Some(user_id.to_string()),
            sub: None,
            exp: Some(now + ttl_secs),
            iat: Some(now),
        }
    }

    fn subject(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .or(self.sub.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct Header {
    alg: String,
}

/// Verifies HS256 tokens against a shared secret.
///
/// Holds a keyed HMAC state; each verification clones it.
pub struct Hs256TokenVerifier {
    keyed: HmacSha256,
    leeway_secs: i64,
}

impl Hs256TokenVerifier {
    pub fn new(secret: SecretString) -> Result<Self, TokenSetupError> {
        let key = secret.expose_secret().as_bytes();
        if key.is_empty() {
            return Err(TokenSetupError::EmptySecret);
        }
        let keyed = HmacSha256::new_from_slice(key)
            .map_err(|e| TokenSetupError::InvalidKey(e.to_string()))?;
        Ok(Self {
            keyed,
            leeway_secs: DEFAULT_LEEWAY_SECS,
        })
    }

    pub fn with_leeway(mut self, leeway_secs: i64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// Produce a signed token for the given claims.
    ///
    /// Used by the `dev-token` command and tests; the server never issues tokens.
    pub fn sign(&self, claims: &TokenClaims) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD
            .encode(serde_json::to_vec(claims).unwrap_or_else(|_| b"{}".to_vec()));
        let signing_input = format!("{header}.{payload}");
        let signature =
            URL_SAFE_NO_PAD.encode(self.mac(signing_input.as_bytes()).finalize().into_bytes());
        format!("{signing_input}.{signature}")
    }

    fn mac(&self, input: &[u8]) -> HmacSha256 {
        let mut mac = self.keyed.clone();
        mac.update(input);
        mac
    }

    fn verify_claims(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::InvalidToken("expected three segments".to_string()));
        };

        let header: Header = decode_segment(header_b64, "header")?;
        if header.alg != "HS256" {
            return Err(AuthError::InvalidToken(format!(
                "unsupported algorithm '{}'",
                header.alg
            )));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AuthError::InvalidToken("signature is not base64url".to_string()))?;

        let signing_input_len = header_b64.len() + 1 + payload_b64.len();
        self.mac(token[..signing_input_len].as_bytes())
            .verify_slice(&signature)
            .map_err(|_| AuthError::InvalidToken("signature mismatch".to_string()))?;

        let claims: TokenClaims = decode_segment(payload_b64, "payload")?;

        if let Some(exp) = claims.exp {
            let now = chrono::Utc::now().timestamp();
            if now > exp.saturating_add(self.leeway_secs) {
                return Err(AuthError::Expired);
            }
        }

        Ok(claims)
    }
}

impl TokenVerifier for Hs256TokenVerifier {
    fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.verify_claims(token)?;
        claims
            .subject()
            .map(UserId::from)
            .ok_or_else(|| AuthError::InvalidToken("token has no subject".to_string()))
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(
    segment: &str,
    what: &str,
) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| AuthError::InvalidToken(format!("{what} is not base64url")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::InvalidToken(format!("{what} is not valid JSON: {e}")))
}
