//! Process configuration, read from the environment once at startup.
//!
//! Variables are supplied by the runtime environment; nothing is loaded from
//! files.

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// Load and validate configuration from process environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// - `JWT_SECRET`: required, non-empty
    /// - `HOST`: default `0.0.0.0`
    /// - `PORT`: default `5000`
    /// - `TOKEN_TTL_SECS`: default 360000 (100 hours), must be positive
    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            Some(_) => return Err(AppError::config("JWT_SECRET must not be empty")),
            None => return Err(AppError::config("JWT_SECRET must be set")),
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let token_ttl = match lookup("TOKEN_TTL_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::config(format!(
                        "TOKEN_TTL_SECS must be a positive number of seconds, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_TOKEN_TTL,
        };

        Ok(Self {
            host,
            port,
            security: SecurityConfig::new(jwt_secret.into_bytes()).with_token_ttl(token_ttl),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.security.jwt_secret, b"s3cret".to_vec());
        assert_eq!(config.security.token_ttl, Duration::from_secs(360_000));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("JWT_SECRET", "s3cret"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("TOKEN_TTL_SECS", "3600"),
        ])
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.security.token_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_missing_or_empty_secret_is_fatal() {
        assert!(matches!(load(&[]), Err(AppError::Config { .. })));
        assert!(matches!(
            load(&[("JWT_SECRET", "")]),
            Err(AppError::Config { .. })
        ));
    }

    #[test]
    fn test_invalid_port() {
        match load(&[("JWT_SECRET", "s"), ("PORT", "http")]) {
            Err(AppError::Config { detail }) => assert!(detail.contains("PORT")),
            other => panic!("expected config error, got {other:?}"),
        }
        assert!(load(&[("JWT_SECRET", "s"), ("PORT", "70000")]).is_err());
    }

    #[test]
    fn test_invalid_ttl() {
        assert!(load(&[("JWT_SECRET", "s"), ("TOKEN_TTL_SECS", "0")]).is_err());
        assert!(load(&[("JWT_SECRET", "s"), ("TOKEN_TTL_SECS", "-5")]).is_err());
        assert!(load(&[("JWT_SECRET", "s"), ("TOKEN_TTL_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = load(&[("JWT_SECRET", "do-not-print-me")]).unwrap();
        assert!(!format!("{config:?}").contains("do-not-print-me"));
    }
}
