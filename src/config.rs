//! Bridge connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{DurationSecondsWithFrac, serde_as};

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Where the bridge lives and how long to wait for it.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use milight_rs::BridgeConfig;
///
/// let config = BridgeConfig::new("192.168.1.50").with_timeout(Duration::from_secs(2));
/// assert_eq!(config.port, 5987);
/// assert_eq!(config.peer(), "192.168.1.50:5987");
/// ```
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BridgeConfig {
    pub address: String,
    #[serde(default = "BridgeConfig::default_port")]
    pub port: u16,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    #[serde(rename = "timeout_secs", default = "BridgeConfig::default_timeout")]
    pub timeout: Duration,
}

impl BridgeConfig {
    pub const DEFAULT_PORT: u16 = 5987;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(address: &str) -> Self {
        BridgeConfig {
            address: address.to_string(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a config from a timeout in (possibly fractional) seconds.
    pub fn with_timeout_secs(self, secs: f64) -> Result<Self> {
        let timeout = Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidTimeout)?;
        Ok(self.with_timeout(timeout))
    }

    /// `address:port` string handed to the socket.
    pub fn peer(&self) -> String {
        if self.address.contains(':') && !self.address.starts_with('[') {
            format!("[{}]:{}", self.address, self.port)
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::InvalidTimeout);
        }
        Ok(())
    }

    fn default_port() -> u16 {
        Self::DEFAULT_PORT
    }

    fn default_timeout() -> Duration {
        Self::DEFAULT_TIMEOUT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let config: BridgeConfig = serde_json::from_str(r#"{"address": "10.0.0.2"}"#).unwrap();
        assert_eq!(config, BridgeConfig::new("10.0.0.2"));
    }

    #[test]
    fn test_fractional_timeout_from_json() {
        let config: BridgeConfig = serde_json::from_str(
            r#"{"address": "10.0.0.2", "port": 8899, "timeout_secs": 0.25}"#,
        )
        .unwrap();
        assert_eq!(config.port, 8899);
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_timeouts() {
        let config = BridgeConfig::new("10.0.0.2");
        assert_eq!(
            config.clone().with_timeout_secs(-1.0).unwrap_err(),
            Error::InvalidTimeout
        );
        assert_eq!(
            config.clone().with_timeout_secs(f64::NAN).unwrap_err(),
            Error::InvalidTimeout
        );
        assert_eq!(
            config.with_timeout(Duration::ZERO).validate().unwrap_err(),
            Error::InvalidTimeout
        );
    }

    #[test]
    fn test_ipv6_peer() {
        assert_eq!(BridgeConfig::new("::1").peer(), "[::1]:5987");
    }
}
