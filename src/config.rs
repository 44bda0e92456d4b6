/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, APP_ENV, JWT 検証鍵, iss/aud など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

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

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Key material used to verify access tokens.
#[derive(Clone, PartialEq, Eq)]
pub enum VerificationKey {
    /// Ed25519 public key (SPKI PEM), verified as `EdDSA`.
    Ed25519Pem(String),
    /// Shared secret, verified as `HS256`.
    HmacSecret(String),
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        match self {
            Self::Ed25519Pem(_) => f.write_str("Ed25519Pem(..)"),
            Self::HmacSecret(_) => f.write_str("HmacSecret(..)"),
        }
    }
}

/// Limits applied by the HTTP-level middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpLimits {
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl Default for HttpLimits {
    fn default() -> Self {
        Self {
            // login payloads are tiny
            body_limit_bytes: 64 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub http: HttpLimits,

    pub verification_key: VerificationKey,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub access_token_leeway_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (env in production, a map in tests).
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

        let defaults = HttpLimits::default();
        let body_limit_bytes = match lookup("HTTP_BODY_LIMIT_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or(ConfigError::Invalid("HTTP_BODY_LIMIT_BYTES"))?,
            None => defaults.body_limit_bytes,
        };
        let request_timeout = match lookup("HTTP_REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|v| *v > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid("HTTP_REQUEST_TIMEOUT_SECONDS"))?,
            None => defaults.request_timeout,
        };
        let http = HttpLimits {
            body_limit_bytes,
            request_timeout,
        };

        let algorithm = lookup("AUTH_JWT_ALGORITHM").unwrap_or_else(|| "EdDSA".to_string());

        let verification_key = match algorithm.trim().to_ascii_uppercase().as_str() {
            "EDDSA" => {
                let pem = lookup("ACCESS_JWT_PUBLIC_KEY_PEM")
                    .filter(|v| !v.trim().is_empty())
                    .ok_or(ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PEM"))?
                    .replace("\\n", "\n");
                VerificationKey::Ed25519Pem(pem)
            }
            "HS256" => {
                let secret = lookup("AUTH_JWT_SECRET")
                    .filter(|v| !v.is_empty())
                    .ok_or(ConfigError::Missing("AUTH_JWT_SECRET"))?;
                VerificationKey::HmacSecret(secret)
            }
            _ => return Err(ConfigError::Invalid("AUTH_JWT_ALGORITHM")),
        };

        let auth_issuer = lookup("AUTH_ISSUER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let auth_audience = lookup("AUTH_AUDIENCE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let access_token_leeway_seconds = match lookup("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 60,
        };

        Ok(Self {
            addr,
            app_env,
            http,
            verification_key,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_with_hmac_secret() {
        let config = Config::from_lookup(lookup_from(&[
            ("AUTH_JWT_ALGORITHM", "HS256"),
            ("AUTH_JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(
            config.verification_key,
            VerificationKey::HmacSecret("s3cret".into())
        );
        assert_eq!(config.auth_issuer, None);
        assert_eq!(config.auth_audience, None);
        assert_eq!(config.access_token_leeway_seconds, 60);
        assert_eq!(config.http, HttpLimits::default());
    }

    #[test]
    fn http_limits_are_configurable() {
        let config = Config::from_lookup(lookup_from(&[
            ("AUTH_JWT_ALGORITHM", "HS256"),
            ("AUTH_JWT_SECRET", "s3cret"),
            ("HTTP_BODY_LIMIT_BYTES", "1024"),
            ("HTTP_REQUEST_TIMEOUT_SECONDS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.http.body_limit_bytes, 1024);
        assert_eq!(config.http.request_timeout, Duration::from_secs(5));

        let err = Config::from_lookup(lookup_from(&[
            ("AUTH_JWT_ALGORITHM", "HS256"),
            ("AUTH_JWT_SECRET", "s3cret"),
            ("HTTP_REQUEST_TIMEOUT_SECONDS", "0"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("HTTP_REQUEST_TIMEOUT_SECONDS"));
    }

    #[test]
    fn eddsa_is_the_default_and_expands_escaped_newlines() {
        let config = Config::from_lookup(lookup_from(&[
            ("ACCESS_JWT_PUBLIC_KEY_PEM", "-----BEGIN PUBLIC KEY-----\\nabc\\n"),
            ("PORT", "8080"),
            ("APP_ENV", "prod"),
            ("AUTH_ISSUER", " https://issuer.example "),
            ("AUTH_AUDIENCE", "api"),
            ("ACCESS_TOKEN_LEEWAY_SECONDS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(
            config.verification_key,
            VerificationKey::Ed25519Pem("-----BEGIN PUBLIC KEY-----\nabc\n".into())
        );
        assert_eq!(config.auth_issuer.as_deref(), Some("https://issuer.example"));
        assert_eq!(config.auth_audience.as_deref(), Some("api"));
        assert_eq!(config.access_token_leeway_seconds, 5);
    }

    #[test]
    fn missing_key_material_fails() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PEM"));

        let err = Config::from_lookup(lookup_from(&[("AUTH_JWT_ALGORITHM", "hs256")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("AUTH_JWT_SECRET"));
    }

    #[test]
    fn invalid_values_fail() {
        let err = Config::from_lookup(lookup_from(&[("AUTH_JWT_ALGORITHM", "none")])).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("AUTH_JWT_ALGORITHM"));

        let err = Config::from_lookup(lookup_from(&[
            ("AUTH_JWT_ALGORITHM", "HS256"),
            ("AUTH_JWT_SECRET", "x"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PORT"));
    }

    #[test]
    fn key_material_is_not_printed() {
        let key = VerificationKey::HmacSecret("top-secret".into());
        assert!(!format!("{key:?}").contains("top-secret"));
    }
}
