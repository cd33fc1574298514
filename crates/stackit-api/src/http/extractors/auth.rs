//! Bearer token identity gate.
//!
//! Extracting [`AuthenticatedCaller`] verifies `Authorization: Bearer <token>`
//! with the state's token verifier and yields the caller's identity.
//! Handlers that take it never run for unauthenticated requests.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use stackit_core::auth::authenticate;
use stackit_types::error::AuthError;
use stackit_types::identity::Caller;

use crate::http::error::AppError;
use crate::state::AppState;

/// Verified identity of the requesting user.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub Caller);

impl FromRequestParts<AppState> for AuthenticatedCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                AppError::Auth(AuthError::MalformedCredential(
                    "authorization header is not valid ASCII".to_string(),
                ))
            })?),
            None => None,
        };

        match authenticate(state.verifier.as_ref(), header) {
            Ok(caller) => Ok(AuthenticatedCaller(caller)),
            Err(e) => {
                tracing::debug!(path = %parts.uri.path(), error = %e, "rejected credential");
                Err(AppError::Auth(e))
            }
        }
    }
}
