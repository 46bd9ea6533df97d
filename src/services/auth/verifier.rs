use jsonwebtoken::{DecodingKey, Validation, errors::Error as JwtError};

use crate::config::AuthConfig;
use crate::services::auth::Claims;

/// Shared-secret (HMAC) token verifier.
///
/// `jsonwebtoken::Validation` checks:
/// - signature and `alg` against the allow-list
/// - `exp` / `nbf` when present (`require_exp` makes `exp` mandatory)
/// - `iss` / `aud` only when configured
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::default();
        validation.algorithms = config.algorithms.clone();
        validation.leeway = config.leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;

        if !config.require_exp {
            validation.required_spec_claims.clear();
        }

        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        if config.audience.is_empty() {
            validation.validate_aud = false;
        } else {
            validation.set_audience(config.audience.as_slice());
        }

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify the signature and registered claims, then hand back the payload.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
