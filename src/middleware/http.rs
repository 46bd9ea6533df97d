//! Transport middleware shared by every route, gated or not.
//!
//! Responsibility:
//! - `x-request-id`: keep the caller's, otherwise mint one, echo it on the response
//! - one `request` span per call carrying method / path / request id, so the
//!   token gate's verification warnings are correlated with the access log
//! - body size and time limits from `HttpConfig`

use axum::Router;
use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::http::{Request, StatusCode, header::HeaderName};
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::HttpConfig;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn apply(router: Router, config: &HttpConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    // Outermost first: the id must exist before the span is opened.
    let layers = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_layer_error))
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
        .layer(TimeoutLayer::new(config.timeout))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes));

    router.layer(layers)
}

fn request_span<B>(req: &Request<B>) -> Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = %request_id,
    )
}

async fn handle_layer_error(err: BoxError) -> StatusCode {
    if err.is::<Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
