/*
 * Responsibility
 * - AuthError: rejection outcomes of the token gate + IntoResponse (status / body)
 * - AppError: process-level failures (config, bind, serve)
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::ConfigError;

pub const NO_TOKEN_MESSAGE: &str = "Access denied. No token provided.";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token.";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Header absent or not `Bearer <token>`.
    #[error("no token provided")]
    NoToken,
    /// The cause stays server-side; the response body is generic.
    #[error("invalid token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::NoToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::NoToken => NO_TOKEN_MESSAGE,
            AuthError::InvalidToken(_) => INVALID_TOKEN_MESSAGE,
        };

        (self.status(), message).into_response()
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
