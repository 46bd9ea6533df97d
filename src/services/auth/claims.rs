use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded payload of a verified token.
///
/// Kept as a raw JSON object so the claims equal the signed payload exactly,
/// including members this service has no opinion about.
/// The middleware stores it in request extensions; the type itself is the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// `sub`, when it is a string.
    pub fn sub(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    pub fn exp(&self) -> Option<i64> {
        self.get("exp").and_then(numeric_date)
    }

    pub fn iat(&self) -> Option<i64> {
        self.get("iat").and_then(numeric_date)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp().and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

// NumericDate may be fractional (RFC 7519 4.1.4)
fn numeric_date(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
}
