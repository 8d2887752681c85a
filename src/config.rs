//! Server configuration from the environment.

use std::env;
use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HOST_VAR: &str = "KEYED_ORDERS_HOST";
pub const PORT_VAR: &str = "KEYED_ORDERS_PORT";

const DEFAULT_HOST: [u8; 4] = [127, 0, 0, 1];
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid port: {value}")]
    InvalidPort { var: &'static str, value: String },

    #[error("{var} is not a valid IP address: {value}")]
    InvalidHost { var: &'static str, value: String },
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    /// Reads `KEYED_ORDERS_HOST` and `KEYED_ORDERS_PORT`, falling back to
    /// `127.0.0.1:5000` for whichever is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = match env::var(HOST_VAR) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidHost { var: HOST_VAR, value })?,
            Err(_) => IpAddr::from(DEFAULT_HOST),
        };

        let port = match env::var(PORT_VAR) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort { var: PORT_VAR, value })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        env::remove_var(HOST_VAR);
        env::remove_var(PORT_VAR);
    }

    #[test]
    #[serial]
    fn defaults_when_unset() {
        clear();
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear();
        env::set_var(HOST_VAR, "0.0.0.0");
        env::set_var(PORT_VAR, "8081");
        let config = ServerConfig::from_env().unwrap();
        clear();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8081");
    }

    #[test]
    #[serial]
    fn rejects_bad_port() {
        clear();
        env::set_var(PORT_VAR, "eighty");
        let err = ServerConfig::from_env().unwrap_err();
        clear();

        assert_eq!(
            err,
            ConfigError::InvalidPort { var: PORT_VAR, value: "eighty".to_string() }
        );
    }

    #[test]
    #[serial]
    fn rejects_bad_host() {
        clear();
        env::set_var(HOST_VAR, "localhost:80");
        let err = ServerConfig::from_env().unwrap_err();
        clear();

        assert!(matches!(err, ConfigError::InvalidHost { .. }));
    }
}
