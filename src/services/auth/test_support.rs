//! Token minting and log capture for tests. Issuance is not part of the service itself.
use std::io;
use std::sync::{Arc, Mutex};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use tracing::subscriber::DefaultGuard;

use crate::config::AuthConfig;
use crate::services::auth::{SharedSecret, TokenGate};

pub const SECRET: &[u8] = b"test-shared-secret";

pub fn auth_config() -> AuthConfig {
    AuthConfig::new(SharedSecret::new(SECRET))
}

pub fn gate() -> TokenGate {
    TokenGate::new(&auth_config())
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn sign<T: Serialize>(claims: &T) -> String {
    sign_with(Algorithm::HS256, SECRET, claims)
}

pub fn sign_with<T: Serialize>(alg: Algorithm, secret: &[u8], claims: &T) -> String {
    let mut header = Header::new(alg);
    header.typ = Some("JWT".to_string());
    jsonwebtoken::encode(&header, claims, &EncodingKey::from_secret(secret))
        .expect("HMAC signing should not fail")
}

/// In-memory sink for a thread-local `fmt` subscriber.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's events into a buffer until the guard drops.
/// Works with `#[tokio::test]` (current-thread runtime).
pub fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();

    (buffer, tracing::subscriber::set_default(subscriber))
}
