/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::access::apply (token gate) / http::apply (request id, trace, limits)
 */
pub mod auth;
pub mod http;
