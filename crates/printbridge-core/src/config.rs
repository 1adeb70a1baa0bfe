// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Connector configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PrintBridgeError, Result};

/// Settings for talking to the local print server and caching PPDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Print server host name (CUPS `ServerName`).
    pub server_host: String,
    /// Print server port (default 631).
    pub server_port: u16,
    /// Maximum number of simultaneously borrowed connections.
    pub max_connections: usize,
    /// Timeout for establishing a new connection.
    pub connect_timeout_secs: u64,
    /// Connections older than this are reconnected before their next request.
    pub max_connection_age_secs: u64,
    /// How long a released connection waits for a new borrower before it is
    /// closed.
    pub idle_grace_millis: u64,
    /// Directory holding one PPD file per cached printer.
    pub ppd_cache_dir: PathBuf,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            server_host: "localhost".into(),
            server_port: 631,
            max_connections: 5,
            connect_timeout_secs: 10,
            max_connection_age_secs: 120,
            idle_grace_millis: 100,
            ppd_cache_dir: std::env::temp_dir().join("printbridge-ppd"),
        }
    }
}

impl ConnectorConfig {
    /// Apply `CUPS_SERVER` and `IPP_PORT` from the environment, the same
    /// variables the CUPS client library consults.
    ///
    /// `CUPS_SERVER` may carry a port (`host:port`); a socket path (leading
    /// `/`) is ignored since only TCP is supported.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(server) = std::env::var("CUPS_SERVER") {
            self.apply_server(&server);
        }
        if let Ok(port) = std::env::var("IPP_PORT")
            && let Ok(port) = port.trim().parse()
        {
            self.server_port = port;
        }
        self
    }

    fn apply_server(&mut self, server: &str) {
        let server = server.trim();
        if server.is_empty() || server.starts_with('/') {
            return;
        }
        match server.rsplit_once(':') {
            Some((host, port)) if !host.contains(':') => {
                if let Ok(port) = port.parse() {
                    self.server_port = port;
                }
                self.server_host = host.to_owned();
            }
            _ => self.server_host = server.to_owned(),
        }
    }

    /// Reject settings that would make the pool unusable.
    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(PrintBridgeError::Config(
                "max_connections must be greater than 0".into(),
            ));
        }
        if self.server_port == 0 {
            return Err(PrintBridgeError::Config("server_port must not be 0".into()));
        }
        if self.server_host.is_empty() {
            return Err(PrintBridgeError::Config("server_host must not be empty".into()));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn max_connection_age(&self) -> Duration {
        Duration::from_secs(self.max_connection_age_secs)
    }

    pub fn idle_grace(&self) -> Duration {
        Duration::from_millis(self.idle_grace_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ConnectorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_connection_age(), Duration::from_secs(120));
    }

    #[test]
    fn zero_connections_rejected() {
        let config = ConnectorConfig {
            max_connections: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PrintBridgeError::Config(_))));
    }

    #[test]
    fn server_with_port_is_split() {
        let mut config = ConnectorConfig::default();
        config.apply_server("print.example.org:8631");
        assert_eq!(config.server_host, "print.example.org");
        assert_eq!(config.server_port, 8631);
    }

    #[test]
    fn socket_path_is_ignored() {
        let mut config = ConnectorConfig::default();
        config.apply_server("/run/cups/cups.sock");
        assert_eq!(config.server_host, "localhost");
    }

    #[test]
    fn round_trips_through_json() {
        let config = ConnectorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ConnectorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.server_port, config.server_port);
    }
}
