//! Runtime configuration, read once from the environment at startup.

use crate::store::Connection;
use axum::http::HeaderValue;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_CORS_ORIGIN: &str = "https://mhdali818.github.io";
pub const DEFAULT_IMAGES_DIR: &str = "images";

#[derive(Debug, Clone)]
pub struct Config {
    /// `DB_CONNECTION`, required.
    pub connection: Connection,
    pub port: u16,
    /// The one origin allowed to call the API cross-origin.
    pub cors_origin: HeaderValue,
    /// Directory served under `/images`.
    pub images_dir: PathBuf,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let connection = match lookup("DB_CONNECTION") {
            Some(raw) => parse("DB_CONNECTION", raw)?,
            None => {
                warn!("DB_CONNECTION is not set");
                return Err(ConfigError::Missing("DB_CONNECTION"));
            }
        };

        Ok(Self {
            connection,
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            cors_origin: try_load(&lookup, "CORS_ORIGIN", DEFAULT_CORS_ORIGIN)?,
            images_dir: try_load(&lookup, "IMAGES_DIR", DEFAULT_IMAGES_DIR)?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    parse(key, raw)
}

fn parse<T: FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    raw.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value: raw,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_the_connection_is_set() {
        let config = load(&[("DB_CONNECTION", "memory://")]).unwrap();
        assert_eq!(config.connection, Connection::Memory);
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origin, DEFAULT_CORS_ORIGIN);
        assert_eq!(config.images_dir, PathBuf::from("images"));
    }

    #[test]
    fn connection_is_required() {
        let err = load(&[("PORT", "8080")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DB_CONNECTION"));
    }

    #[test]
    fn unsupported_connection_is_fatal() {
        let err = load(&[("DB_CONNECTION", "postgres://localhost/db")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_CONNECTION", .. }));
    }

    #[test]
    fn bad_port_is_fatal() {
        let err = load(&[("DB_CONNECTION", "memory://"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn overrides_are_honoured() {
        let config = load(&[
            ("DB_CONNECTION", "file:///srv/booking"),
            ("PORT", "8080"),
            ("CORS_ORIGIN", "http://localhost:5173"),
            ("IMAGES_DIR", "/srv/images"),
        ])
        .unwrap();
        assert_eq!(
            config.connection,
            Connection::Directory(PathBuf::from("/srv/booking"))
        );
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origin, "http://localhost:5173");
        assert_eq!(config.images_dir, PathBuf::from("/srv/images"));
    }
}
