//! The logger facade.
//!
//! [`RemoteLoggerClient::log`] never panics and never waits on the network.
//! When the connection is open the arguments travel to the listener as a
//! [`LogRecord`]; otherwise they are printed to the local console.

use std::panic::Location;

use log::warn;
use serde_json::Value;

use crate::{
    caller::{self, CallerCapture},
    config::ClientConfig,
    connection::{ConnectionManager, ConnectionState, Transport},
    console::Console,
    log_record::{LogRecord, console_line},
};

/// Live logger bound to its own [`ConnectionManager`].
#[derive(Debug)]
pub struct RemoteLoggerClient {
    app: String,
    caller_capture: CallerCapture,
    console: Console,
    connection: ConnectionManager,
}

impl RemoteLoggerClient {
    /// Connect to `ws://localhost:<port>` as `app`, printing locally to stdout.
    pub fn new(app: impl Into<String>, port: u16) -> Self {
        Self::with_config(ClientConfig::new(app, port))
    }

    /// Build from a full configuration, printing locally to stdout.
    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_console(config, Console::stdout())
    }

    /// Build from a configuration and an explicit local console.
    pub fn with_console(config: ClientConfig, console: Console) -> Self {
        let connection = ConnectionManager::new(&config, console.clone());
        Self::assemble(config, console, connection)
    }

    /// Build on top of a custom transport.
    pub fn with_transport<T: Transport>(
        config: ClientConfig,
        console: Console,
        transport: T,
    ) -> Self {
        let connection = ConnectionManager::with_transport(&config, console.clone(), transport);
        Self::assemble(config, console, connection)
    }

    fn assemble(config: ClientConfig, console: Console, connection: ConnectionManager) -> Self {
        Self {
            app: config.app,
            caller_capture: config.caller_capture,
            console,
            connection,
        }
    }

    /// Application name stamped on every record.
    pub fn app(&self) -> &str {
        &self.app
    }

    /// Whether records currently go to the listener.
    pub fn is_connected(&self) -> bool {
        self.connection.is_open()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Log `values`, remotely when connected, locally otherwise.
    ///
    /// Returns `self` so calls can be chained.
    #[track_caller]
    pub fn log<I>(&self, values: I) -> &Self
    where
        I: IntoIterator<Item = Value>,
    {
        let capture = self.caller_capture;
        let location = Location::caller();
        self.dispatch(values.into_iter().collect(), || {
            caller::capture_at(capture, location)
        })
    }

    /// Log `values` attributed to an already known caller locator.
    pub fn log_from<I>(&self, caller: impl Into<String>, values: I) -> &Self
    where
        I: IntoIterator<Item = Value>,
    {
        let caller = caller.into();
        self.dispatch(values.into_iter().collect(), move || caller)
    }

    fn dispatch(&self, message: Vec<Value>, caller: impl FnOnce() -> String) -> &Self {
        if !self.connection.is_open() {
            self.console.write_line(&console_line(&message));
            return self;
        }
        let record = LogRecord::new(self.app.as_str(), message, caller());
        match record.to_frame() {
            Ok(frame) => {
                self.connection.send(frame);
            }
            Err(err) => warn!("remote logger could not encode a record: {err}"),
        }
        self
    }
}
