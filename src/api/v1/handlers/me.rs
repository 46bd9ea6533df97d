/*
 * Responsibility
 * - GET /me (token gate の内側)
 * - 検証済み Claims をそのまま返す
 */
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::v1::extractors::AuthUser;
use crate::services::auth::Claims;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub sub: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub claims: Claims,
}

pub async fn me(AuthUser(claims): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        sub: claims.sub().map(str::to_string),
        expires_at: claims.expires_at(),
        claims,
    })
}
