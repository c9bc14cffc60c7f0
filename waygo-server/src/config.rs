//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::auth::AuthConfig;
use crate::transport::TransportConfig;

/// Placeholder credentials used when none are configured. TransportAPI
/// rejects them, so every transit lookup serves the fallback dataset.
pub const PLACEHOLDER_APP_ID: &str = "YOUR_APP_ID";
pub const PLACEHOLDER_APP_KEY: &str = "YOUR_APP_KEY";

const DEFAULT_DATA_DIR: &str = "./waygo-data";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub transport: TransportConfig,
    pub auth: AuthConfig,
    /// Directory for persisted favourites, session and theme
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let app_id = get("TRANSPORT_APP_ID").unwrap_or_else(|| {
            warn!("TRANSPORT_APP_ID not set, transit lookups will use fallback data");
            PLACEHOLDER_APP_ID.to_string()
        });
        let app_key = get("TRANSPORT_APP_KEY").unwrap_or_else(|| {
            warn!("TRANSPORT_APP_KEY not set, transit lookups will use fallback data");
            PLACEHOLDER_APP_KEY.to_string()
        });

        let mut transport = TransportConfig::new(app_id, app_key);
        if let Some(url) = get("TRANSPORT_BASE_URL") {
            transport = transport.with_base_url(url);
        }

        let mut auth = AuthConfig::new();
        if let Some(url) = get("AUTH_BASE_URL") {
            auth = auth.with_base_url(url);
        }

        let data_dir = get("WAYGO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let addr = get("WAYGO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr.parse().map_err(|_| ConfigError::InvalidAddr {
            var: "WAYGO_BIND_ADDR",
            value: addr.clone(),
        })?;

        Ok(Self {
            transport,
            auth,
            data_dir,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.transport.app_id, PLACEHOLDER_APP_ID);
        assert_eq!(config.transport.app_key, PLACEHOLDER_APP_KEY);
        assert_eq!(config.transport.base_url, "https://transportapi.com/v3/uk");
        assert_eq!(config.auth.base_url, "https://dummyjson.com");
        assert_eq!(config.data_dir, PathBuf::from("./waygo-data"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TRANSPORT_APP_ID", "id123"),
            ("TRANSPORT_APP_KEY", "key456"),
            ("TRANSPORT_BASE_URL", "http://localhost:8080"),
            ("AUTH_BASE_URL", "http://localhost:8081"),
            ("WAYGO_DATA_DIR", "/var/lib/waygo"),
            ("WAYGO_BIND_ADDR", "0.0.0.0:8000"),
        ]))
        .unwrap();

        assert_eq!(config.transport.app_id, "id123");
        assert_eq!(config.transport.app_key, "key456");
        assert_eq!(config.transport.base_url, "http://localhost:8080");
        assert_eq!(config.auth.base_url, "http://localhost:8081");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/waygo"));
        assert_eq!(config.bind_addr.port(), 8000);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[("TRANSPORT_APP_ID", "  ")])).unwrap();
        assert_eq!(config.transport.app_id, PLACEHOLDER_APP_ID);
    }

    #[test]
    fn invalid_bind_addr() {
        let err = AppConfig::from_lookup(lookup(&[("WAYGO_BIND_ADDR", "localhost")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "WAYGO_BIND_ADDR is not a valid socket address: localhost"
        );
    }
}
