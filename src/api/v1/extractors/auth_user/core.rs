use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AuthError;
use crate::services::auth::Claims;

/// Handler で Claims を受け取るための extractor
/// middleware が Claims を request.extensions() に insert 済みである前提
/// 見つからない場合は NoToken (401) を返す（ミドルウェア未設定のルート）
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(AuthError::NoToken)
    }
}
