//! Construction parameters for the remote logger.
//!
//! [`ClientConfig`] carries everything the facade and its connection worker
//! need. [`ClientConfigBuilder`] validates user-supplied values before a
//! client is built. Nothing here is read from files; the embedding
//! application supplies every value.

use std::time::Duration;

use thiserror::Error;

use crate::{caller::CallerCapture, rate_limited_warner::DEFAULT_WARN_INTERVAL};

/// Application name used when the caller does not supply one.
pub const DEFAULT_APP_NAME: &str = "default";
/// Host the listener is expected on.
pub const DEFAULT_HOST: &str = "localhost";
/// Port the listener is expected on.
pub const DEFAULT_PORT: u16 = 4455;
/// Fixed delay between a failure and the next connection attempt.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(3000);
/// Timeout applied to the TCP connect and WebSocket handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// How often the worker checks an idle connection for a listener close.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Default bounded channel capacity between the facade and the worker.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16_384;

/// Errors raised while validating a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A field holds a value the client cannot run with.
    #[error("invalid remote logger configuration: {0}")]
    InvalidConfig(String),
}

/// Everything needed to build a [`RemoteLoggerClient`](crate::RemoteLoggerClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub app: String,
    pub host: String,
    pub port: u16,
    pub retry_delay: Duration,
    pub connect_timeout: Duration,
    pub poll_interval: Duration,
    pub capacity: usize,
    pub warn_interval: Duration,
    pub caller_capture: CallerCapture,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app: DEFAULT_APP_NAME.into(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            retry_delay: DEFAULT_RETRY_DELAY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            capacity: DEFAULT_CHANNEL_CAPACITY,
            warn_interval: DEFAULT_WARN_INTERVAL,
            caller_capture: CallerCapture::default(),
        }
    }
}

impl ClientConfig {
    /// Default configuration for `app` talking to `port`.
    pub fn new(app: impl Into<String>, port: u16) -> Self {
        Self {
            app: app.into(),
            port,
            ..Self::default()
        }
    }

    /// WebSocket URL of the listener.
    pub fn url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }

    /// Override the listener host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the delay between a failure and the next attempt.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Override how callers are identified.
    pub fn with_caller_capture(mut self, capture: CallerCapture) -> Self {
        self.caller_capture = capture;
        self
    }
}

macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value.is_zero() {
            return Err(ConfigError::InvalidConfig(format!(
                "{} must be greater than zero",
                $field
            )));
        }
    }};
}

/// Integer counterpart of `Duration::is_zero` for `ensure_positive!`.
trait IsZero {
    fn is_zero(&self) -> bool;
}

impl IsZero for usize {
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl IsZero for u16 {
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

/// Validating builder for [`ClientConfig`].
#[derive(Clone, Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.config.app = app.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    pub fn with_warn_interval(mut self, interval: Duration) -> Self {
        self.config.warn_interval = interval;
        self
    }

    pub fn with_caller_capture(mut self, capture: CallerCapture) -> Self {
        self.config.caller_capture = capture;
        self
    }

    /// Validate the accumulated values and return the configuration.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let config = self.config;
        if config.app.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("app must not be empty".into()));
        }
        if config.host.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("host must not be empty".into()));
        }
        ensure_positive!(config.port, "port");
        ensure_positive!(config.capacity, "capacity");
        ensure_positive!(config.retry_delay, "retry_delay");
        ensure_positive!(config.connect_timeout, "connect_timeout");
        ensure_positive!(config.poll_interval, "poll_interval");
        Ok(config)
    }
}
