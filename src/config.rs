//! Configuration for gearadmin
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

/// Configuration for an administrative session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server address (host:port)
    pub server_addr: String,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Disable Nagle's algorithm on the connection
    pub tcp_nodelay: bool,

    // -------------------------------------------------------------------------
    // Session Configuration
    // -------------------------------------------------------------------------
    /// How long to wait for a server response before failing with a timeout
    pub response_timeout: Duration,

    /// Granularity of a single readiness wait inside the poll loop
    ///
    /// Bounds how late past the response deadline a poll tick can return.
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:4730".to_string(),
            connect_timeout: Duration::from_secs(10),
            tcp_nodelay: true,
            response_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server address (host:port)
    pub fn server_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.server_addr = addr.into();
        self
    }

    /// Set the TCP connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn tcp_nodelay(mut self, nodelay: bool) -> Self {
        self.config.tcp_nodelay = nodelay;
        self
    }

    /// Set the response timeout
    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.config.response_timeout = timeout;
        self
    }

    /// Set the poll interval (readiness wait granularity)
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
