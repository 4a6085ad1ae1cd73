//! Handle owning the connection worker.

use std::thread;

use crossbeam_channel::TrySendError;
use log::warn;
use parking_lot::Mutex;

use crate::{config::ClientConfig, console::Console, rate_limited_warner::RateLimitedWarner};

use super::{
    state::{ConnectionState, SharedState},
    transport::{Transport, WebSocketTransport},
    worker::{FrameSender, spawn_worker},
};

/// Owns one outbound connection and the thread keeping it alive.
///
/// The worker begins connecting as soon as the manager is built and retries
/// forever. Dropping the manager is the only way to stop it.
pub struct ConnectionManager {
    tx: Option<FrameSender>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
    state: SharedState,
    warner: RateLimitedWarner,
}

impl ConnectionManager {
    /// Connect to the WebSocket listener described by `config`.
    pub fn new(config: &ClientConfig, console: Console) -> Self {
        Self::with_transport(config, console, WebSocketTransport::from_config(config))
    }

    /// Connect through a custom transport.
    pub fn with_transport<T: Transport>(
        config: &ClientConfig,
        console: Console,
        transport: T,
    ) -> Self {
        let state = SharedState::new(ConnectionState::Connecting);
        let warner = RateLimitedWarner::new(config.warn_interval);
        match spawn_worker(config, Box::new(transport), state.clone(), console) {
            Ok((tx, handle)) => Self {
                tx: Some(tx),
                handle: Mutex::new(Some(handle)),
                state,
                warner,
            },
            Err(err) => {
                warn!("remote logger could not start its connection worker: {err}");
                state.set(ConnectionState::Closed);
                Self {
                    tx: None,
                    handle: Mutex::new(None),
                    state,
                    warner,
                }
            }
        }
    }

    /// True only while the connection exists and is open.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Hand a text frame to the worker without blocking.
    ///
    /// Returns `false` when the frame was dropped.
    pub fn send(&self, frame: String) -> bool {
        let Some(tx) = self.tx.as_ref() else {
            self.record_drop("worker is not running");
            return false;
        };
        match tx.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.record_drop("queue full");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                self.record_drop("worker stopped");
                false
            }
        }
    }

    fn record_drop(&self, reason: &str) {
        self.warner.record_drop();
        self.warner.warn_if_due(|count| {
            warn!("remote logger dropped {count} frames; {reason}");
        });
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain queued frames and exit.
        self.tx.take();
        let Some(handle) = self.handle.lock().take() else {
            return;
        };
        if handle.join().is_err() {
            warn!("remote logger connection worker panicked");
        }
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("state", &self.state.get())
            .finish()
    }
}
