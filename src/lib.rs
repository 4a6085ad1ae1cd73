//! Development-time remote logging.
//!
//! [`create_logger`] returns a [`Logger`] that, in development mode, forwards
//! console-style log calls to a listener on `ws://localhost:<port>` and
//! prints them locally whenever no listener is reachable. Outside
//! development mode the logger is inert.
//!
//! ```rust,no_run
//! use remote_logger_client::{create_logger, remote_log};
//!
//! let logger = create_logger("shop", 4455);
//! remote_log!(logger, "checkout", 42);
//! ```

pub mod caller;
pub mod client;
pub mod config;
pub mod connection;
pub mod console;
pub mod environment;
pub mod factory;
#[cfg(feature = "log-compat")]
pub mod log_compat;
pub mod log_record;
mod macros;
pub mod rate_limited_warner;

#[cfg(test)]
mod test_utils;

pub use caller::CallerCapture;
pub use client::RemoteLoggerClient;
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError};
pub use connection::{ConnectionManager, ConnectionState};
pub use console::Console;
pub use environment::{
    AmbientEnvironment, EnvironmentProbe, StaticEnvironment, clear_global_mode, is_development,
    set_global_mode,
};
pub use factory::{Logger, create_default_logger, create_logger, create_logger_with};
#[cfg(feature = "log-compat")]
pub use log_compat::{RemoteLogAdapter, install_global_logger};
pub use log_record::{LogRecord, to_log_value};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}
