//! Runtime configuration, read from the environment at startup.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PROXY_TARGET: &str = "http://127.0.0.1:8000";
pub const DEFAULT_ADDR: &str = "0.0.0.0:5173";
pub const DEFAULT_STATIC_DIR: &str = "crates/beacon-frontend/dist";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BEACON_DEV_ADDR is not a socket address: {value}")]
    InvalidAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
    #[error("BEACON_PROXY_TARGET must be an http(s) URL, got {0:?}")]
    InvalidTarget(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevServerConfig {
    /// Where the dev server listens.
    pub addr: SocketAddr,
    /// Backend that `/api`, `/health` and `/ready` are forwarded to, without a trailing slash.
    pub proxy_target: String,
    /// Built frontend, served for every other path.
    pub static_dir: PathBuf,
}

impl DevServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset and empty values take the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let addr = get("BEACON_DEV_ADDR", DEFAULT_ADDR);
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidAddr { value: addr, source })?;

        let proxy_target = get("BEACON_PROXY_TARGET", DEFAULT_PROXY_TARGET);
        if !(proxy_target.starts_with("http://") || proxy_target.starts_with("https://")) {
            return Err(ConfigError::InvalidTarget(proxy_target));
        }
        let proxy_target = proxy_target.trim_end_matches('/').to_string();

        Ok(Self {
            addr,
            proxy_target,
            static_dir: PathBuf::from(get("BEACON_STATIC_DIR", DEFAULT_STATIC_DIR)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = DevServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr, "0.0.0.0:5173".parse().unwrap());
        assert_eq!(config.proxy_target, "http://127.0.0.1:8000");
        assert_eq!(config.static_dir, PathBuf::from("crates/beacon-frontend/dist"));
    }

    #[test]
    fn overrides_and_trims_target() {
        let config = DevServerConfig::from_lookup(lookup(&[
            ("BEACON_DEV_ADDR", "127.0.0.1:9000"),
            ("BEACON_PROXY_TARGET", "https://api.example.com/"),
            ("BEACON_STATIC_DIR", "/srv/beacon"),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.proxy_target, "https://api.example.com");
        assert_eq!(config.static_dir, PathBuf::from("/srv/beacon"));
    }

    #[test]
    fn empty_value_falls_back_to_default() {
        let config = DevServerConfig::from_lookup(lookup(&[("BEACON_PROXY_TARGET", "  ")])).unwrap();
        assert_eq!(config.proxy_target, DEFAULT_PROXY_TARGET);
    }

    #[test]
    fn rejects_bad_values() {
        let err = DevServerConfig::from_lookup(lookup(&[("BEACON_DEV_ADDR", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddr { ref value, .. } if value == "localhost"));

        let err =
            DevServerConfig::from_lookup(lookup(&[("BEACON_PROXY_TARGET", "127.0.0.1:8000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTarget(_)));
    }
}
