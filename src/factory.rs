//! Construction-time switch between a live logger and an inert stub.

use serde_json::Value;

use crate::{
    client::RemoteLoggerClient,
    config::ClientConfig,
    console::Console,
    environment::{AmbientEnvironment, EnvironmentProbe},
};

/// Logger returned by the factory.
///
/// The mode is fixed at construction: a [`Logger::Disabled`] logger stays
/// silent for its whole lifetime.
#[derive(Debug)]
pub enum Logger {
    /// Development mode: forwards to the listener or the local console.
    Remote(RemoteLoggerClient),
    /// Any other mode: accepts everything and does nothing.
    Disabled,
}

impl Logger {
    /// Log `values`. A disabled logger ignores them without side effects.
    #[track_caller]
    pub fn log<I>(&self, values: I) -> &Self
    where
        I: IntoIterator<Item = Value>,
    {
        if let Logger::Remote(client) = self {
            client.log(values);
        }
        self
    }

    /// Log `values` attributed to a known caller locator.
    pub fn log_from<I>(&self, caller: impl Into<String>, values: I) -> &Self
    where
        I: IntoIterator<Item = Value>,
    {
        if let Logger::Remote(client) = self {
            client.log_from(caller, values);
        }
        self
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Logger::Remote(_))
    }

    /// The live client, when enabled.
    pub fn client(&self) -> Option<&RemoteLoggerClient> {
        match self {
            Logger::Remote(client) => Some(client),
            Logger::Disabled => None,
        }
    }
}

/// Create a logger for `app` talking to `ws://localhost:<port>`, enabled only
/// when the ambient environment is in development mode.
pub fn create_logger(app: impl Into<String>, port: u16) -> Logger {
    create_logger_with(&AmbientEnvironment, ClientConfig::new(app, port), Console::stdout())
}

/// [`create_logger`] with the default application name and port.
pub fn create_default_logger() -> Logger {
    create_logger_with(&AmbientEnvironment, ClientConfig::default(), Console::stdout())
}

/// Create a logger deciding the mode through `probe`.
///
/// In development mode the returned client starts connecting immediately.
pub fn create_logger_with<P>(probe: &P, config: ClientConfig, console: Console) -> Logger
where
    P: EnvironmentProbe + ?Sized,
{
    if !probe.is_development() {
        return Logger::Disabled;
    }
    Logger::Remote(RemoteLoggerClient::with_console(config, console))
}
