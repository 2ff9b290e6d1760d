//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::Result;
use shared::config::CollectionConfig;
use std::net::SocketAddr;

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `CALCMON_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `CALCMON_PORT`: The port to listen on (default: 8080)
/// - `CALCMON_COLLECT_INTERVAL_SECS`: Pause between aggregation passes (default: 60)
/// - `CALCMON_LOOKBACK_HOURS`: Lookback window size in hours (default: 24)
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// Collection schedule and lookback window settings.
    pub collection: CollectionConfig,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `CALCMON_PORT` is set but cannot be parsed as a valid port number
    /// - `CALCMON_COLLECT_INTERVAL_SECS` or `CALCMON_LOOKBACK_HOURS` is set
    ///   but cannot be parsed, is zero, or is out of range
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("CALCMON_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("CALCMON_PORT")
            .ok()
            .map(|p| p.parse::<u16>())
            .transpose()?
            .unwrap_or(8080);

        let interval_secs = std::env::var("CALCMON_COLLECT_INTERVAL_SECS")
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()?
            .unwrap_or(60);

        let lookback_hours = std::env::var("CALCMON_LOOKBACK_HOURS")
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()?
            .unwrap_or(24);

        let collection = CollectionConfig::new(interval_secs, lookback_hours);
        collection
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid collection config: {e}"))?;

        Ok(Self {
            host,
            port,
            collection,
        })
    }

    /// Returns the socket address for binding.
    ///
    /// # Panics
    ///
    /// Panics if the host and port combination cannot be parsed as a valid socket address.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address from config")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            collection: CollectionConfig::default(),
        }
    }
}
