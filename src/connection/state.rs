//! Connection health shared between the worker and the facade.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU8, Ordering},
    },
};

/// Health of the single connection owned by a [`ConnectionManager`](super::ConnectionManager).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    /// An attempt is in flight or about to start.
    Connecting = 0,
    /// The listener accepted the connection; frames can be sent.
    Open = 1,
    /// The last attempt failed or the connection dropped; a retry is pending.
    Closed = 2,
}

impl ConnectionState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => ConnectionState::Connecting,
            1 => ConnectionState::Open,
            _ => ConnectionState::Closed,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// Lock-free cell publishing the current [`ConnectionState`].
///
/// Only the worker writes; any number of facades read.
#[derive(Clone, Debug)]
pub struct SharedState(Arc<AtomicU8>);

impl SharedState {
    pub fn new(initial: ConnectionState) -> Self {
        Self(Arc::new(AtomicU8::new(initial as u8)))
    }

    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub fn set(&self, state: ConnectionState) {
        self.0.store(state as u8, Ordering::Release);
    }

    /// True only while the connection exists and is open.
    pub fn is_open(&self) -> bool {
        self.get() == ConnectionState::Open
    }
}
