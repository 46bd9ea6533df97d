//! Bearer token gate: verify the access token, then put `Claims` into extensions.
//!
//! - 401 `Access denied. No token provided.` when the header is missing or not `Bearer <token>`
//! - 400 `Invalid token.` when verification fails (the cause is logged, not returned)
//! - Otherwise the next handler runs exactly once and its response is returned as is

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AuthError;
use crate::state::AppState;

/// Put the token gate in front of every route of `router`.
///
/// ```ignore
/// // api::v1::routes
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = match state.gate.admit(req.headers().get(header::AUTHORIZATION)) {
        Ok(claims) => claims,
        Err(AuthError::InvalidToken(err)) => {
            tracing::warn!(
                error = %err,
                kind = ?err.kind(),
                method = %req.method(),
                path = %req.uri().path(),
                "access token verification failed"
            );
            return Err(AuthError::InvalidToken(err));
        }
        Err(err) => return Err(err),
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{
        Extension, Json,
        body::to_bytes,
        http::{HeaderValue, StatusCode},
        routing::get,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::services::auth::Claims;
    use crate::services::auth::test_support::{capture_logs, gate, now, sign, sign_with};

    /// Router whose only handler echoes the attached claims and counts its calls.
    fn app(calls: Arc<AtomicUsize>) -> Router {
        let state = AppState::new(Arc::new(gate()));
        let router = Router::new().route(
            "/me",
            get(move |Extension(claims): Extension<Claims>| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Json(claims)
                }
            }),
        );

        apply(router, state.clone()).with_state(state)
    }

    async fn call(authorization: Option<&str>) -> (StatusCode, String, usize) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut req = Request::builder().uri("/me");
        if let Some(v) = authorization {
            req = req.header(header::AUTHORIZATION, HeaderValue::from_str(v).unwrap());
        }

        let res = app(calls.clone())
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (
            status,
            String::from_utf8(body.to_vec()).unwrap(),
            calls.load(Ordering::SeqCst),
        )
    }

    #[tokio::test]
    async fn missing_header_is_401_and_skips_the_handler() {
        let (status, body, calls) = call(None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Access denied. No token provided.");
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn non_bearer_header_is_401() {
        let (status, body, calls) = call(Some("Basic dXNlcjpwYXNz")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Access denied. No token provided.");
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn structurally_invalid_token_is_400() {
        let (status, body, calls) = call(Some("Bearer abc.def.ghi")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid token.");
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn token_from_another_secret_is_400() {
        let token = sign_with(
            jsonwebtoken::Algorithm::HS256,
            b"someone-else",
            &json!({"sub": "alice", "exp": now() + 60}),
        );

        let (status, body, calls) = call(Some(&format!("Bearer {token}"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid token.");
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn expired_token_is_400() {
        let token = sign(&json!({"sub": "alice", "exp": now() - 30}));

        let (status, body, calls) = call(Some(&format!("Bearer {token}"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid token.");
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler_once_with_its_claims() {
        let payload = json!({"sub": "alice", "scope": "read", "exp": now() + 60});
        let token = sign(&payload);

        let (status, body, calls) = call(Some(&format!("Bearer {token}"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(calls, 1);
        let echoed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(echoed, payload);
    }

    const FAILURE_LOG: &str = "access token verification failed";

    #[tokio::test]
    async fn verification_failure_is_logged_without_the_token() {
        let token = sign_with(
            jsonwebtoken::Algorithm::HS256,
            b"someone-else",
            &json!({"sub": "alice", "exp": now() + 60}),
        );

        let (logs, _guard) = capture_logs();
        let (status, _, _) = call(Some(&format!("Bearer {token}"))).await;
        let (malformed, _, _) = call(Some("Bearer abc.def.ghi")).await;
        let logs = logs.contents();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(malformed, StatusCode::BAD_REQUEST);
        assert_eq!(logs.matches(FAILURE_LOG).count(), 2);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("InvalidSignature"));
        assert!(!logs.contains(&token));
        assert!(!logs.contains("abc.def.ghi"));
    }

    #[tokio::test]
    async fn missing_token_and_success_are_not_logged() {
        let token = sign(&json!({"sub": "alice", "exp": now() + 60}));

        let (logs, _guard) = capture_logs();
        let (missing, _, _) = call(None).await;
        let (admitted, _, _) = call(Some(&format!("Bearer {token}"))).await;
        let logs = logs.contents();

        assert_eq!(missing, StatusCode::UNAUTHORIZED);
        assert_eq!(admitted, StatusCode::OK);
        assert!(!logs.contains(FAILURE_LOG));
        assert!(!logs.contains("access token"));
    }
}
