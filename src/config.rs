/*
 * Responsibility
 * - Load settings from the environment (PORT, APP_ENV, JWT_* ...)
 * - Validate them up front (missing or malformed values fail startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::services::auth::SharedSecret;

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings consumed by the token gate.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: SharedSecret,
    pub algorithms: Vec<Algorithm>,
    pub leeway_seconds: u64,
    pub require_exp: bool,
    pub issuer: Option<String>,
    pub audience: Vec<String>,
}

impl AuthConfig {
    /// HMAC defaults around the given secret: HS256/384/512, no leeway.
    /// `exp` is checked when present but not demanded.
    pub fn new(secret: SharedSecret) -> Self {
        Self {
            secret,
            algorithms: HMAC_ALGORITHMS.to_vec(),
            leeway_seconds: 0,
            require_exp: false,
            issuer: None,
            audience: Vec::new(),
        }
    }
}

/// Transport limits applied in front of every route (`middleware::http`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    pub body_limit_bytes: usize,
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: 1024 * 1024,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub auth: AuthConfig,
    pub http: HttpConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup` instead of the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .map(SharedSecret::new)
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let mut auth = AuthConfig::new(secret);

        if let Some(raw) = lookup("JWT_ALGORITHMS") {
            auth.algorithms = parse_algorithms(&raw)?;
        }

        if let Some(raw) = lookup("JWT_LEEWAY_SECONDS") {
            auth.leeway_seconds = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("JWT_LEEWAY_SECONDS"))?;
        }

        if let Some(raw) = lookup("JWT_REQUIRE_EXP") {
            auth.require_exp = parse_bool(&raw).ok_or(ConfigError::Invalid("JWT_REQUIRE_EXP"))?;
        }

        auth.issuer = lookup("JWT_ISSUER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        auth.audience = lookup("JWT_AUDIENCE")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mut http = HttpConfig::default();

        if let Some(raw) = lookup("HTTP_BODY_LIMIT_BYTES") {
            http.body_limit_bytes = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("HTTP_BODY_LIMIT_BYTES"))?;
        }

        if let Some(raw) = lookup("HTTP_TIMEOUT_SECONDS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("HTTP_TIMEOUT_SECONDS"))?;
            http.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            addr,
            app_env,
            auth,
            http,
        })
    }
}

fn parse_algorithms(raw: &str) -> Result<Vec<Algorithm>, ConfigError> {
    let mut algorithms = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let alg = Algorithm::from_str(name).map_err(|_| ConfigError::Invalid("JWT_ALGORITHMS"))?;
        // A shared secret can only verify HMAC signatures.
        if !HMAC_ALGORITHMS.contains(&alg) {
            return Err(ConfigError::Invalid("JWT_ALGORITHMS"));
        }
        if !algorithms.contains(&alg) {
            algorithms.push(alg);
        }
    }

    if algorithms.is_empty() {
        return Err(ConfigError::Invalid("JWT_ALGORITHMS"));
    }
    Ok(algorithms)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
