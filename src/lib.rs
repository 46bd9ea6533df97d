//! Stateless bearer-token authentication for axum services.
//!
//! `TokenGate` verifies `Authorization: Bearer <token>` against a shared HMAC secret.
//! `middleware::auth::access::apply` mounts it on a router and stores the decoded
//! `Claims` in request extensions for handlers (see `api::v1::extractors::AuthUser`).
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
