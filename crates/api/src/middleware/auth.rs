//! Application-token permission gate for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use exmage_core::error::CoreError;
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the caller presented a recognized application token.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(_auth: AppTokenAuth) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
///
/// Checks the `Authorization` header is present, then that the bearer
/// token matches a configured application token. There are no
/// capability-level checks beyond that.
#[derive(Debug, Clone)]
pub struct AppTokenAuth;

impl FromRequestParts<AppState> for AppTokenAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Application Passwords authentication required.".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "You are not currently logged in.".into(),
            ))
        })?;

        let fingerprint = token_fingerprint(token);
        if !state
            .config
            .app_token_fingerprints
            .iter()
            .any(|f| f == &fingerprint)
        {
            return Err(AppError::Core(CoreError::Unauthorized(
                "You are not currently logged in.".into(),
            )));
        }

        Ok(AppTokenAuth)
    }
}

/// SHA-256 hex fingerprint of an application token.
///
/// Tokens are configured and compared as fingerprints so the raw
/// credentials never sit in long-lived state.
pub fn token_fingerprint(token: &str) -> String {
    let hash = Sha256::digest(token.as_bytes());
    format!("{hash:x}")
}
