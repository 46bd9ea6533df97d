/*
 * Responsibility
 * - Decide admit / reject from the `Authorization` header value alone
 * - No I/O, no shared mutable state (safe to call concurrently)
 */
use axum::http::HeaderValue;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::services::auth::{Claims, TokenVerifier};

const BEARER: &str = "Bearer";

#[derive(Debug, Clone)]
pub struct TokenGate {
    verifier: TokenVerifier,
}

impl TokenGate {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            verifier: TokenVerifier::new(config),
        }
    }

    /// `Ok(claims)` admits the request; `Err` carries the rejection.
    pub fn admit(&self, authorization: Option<&HeaderValue>) -> Result<Claims, AuthError> {
        let token = extract_bearer(authorization).ok_or(AuthError::NoToken)?;
        self.verifier.verify(token).map_err(AuthError::InvalidToken)
    }
}

/// Second space-separated segment of `Bearer <token>`; anything else is `None`.
pub fn extract_bearer(authorization: Option<&HeaderValue>) -> Option<&str> {
    let value = authorization?.to_str().ok()?;
    let mut parts = value.split(' ');

    let scheme = parts.next()?;
    if !scheme.eq_ignore_ascii_case(BEARER) {
        return None;
    }

    parts.next().filter(|token| !token.is_empty())
}
