/*
 * Responsibility
 * - Bearer token authentication (shared-secret JWT)
 * - Public surface: TokenGate / TokenVerifier / Claims / SharedSecret
 */
pub mod claims;
pub mod gate;
pub mod secret;
pub mod verifier;

pub use claims::Claims;
pub use gate::TokenGate;
pub use secret::SharedSecret;
pub use verifier::TokenVerifier;

#[cfg(test)]
pub(crate) mod test_support;
