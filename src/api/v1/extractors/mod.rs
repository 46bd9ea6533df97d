/*
 * Responsibility
 * - handler 向け extractor の公開ポイント
 */
pub mod auth_user;

pub use auth_user::AuthUser;
