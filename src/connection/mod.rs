//! Connection manager for the remote listener.
//!
//! This module owns the single outbound WebSocket connection used by
//! [`RemoteLoggerClient`](crate::client::RemoteLoggerClient). A background
//! worker thread drives an explicit [`Lifecycle`] state machine: it opens the
//! connection, watches it for a listener-initiated close, and on any failure
//! schedules exactly one reconnect after a fixed delay. The facade only ever
//! observes the published [`ConnectionState`] and hands text frames to the
//! worker, so it never blocks on the network.

mod error;
mod lifecycle;
mod manager;
mod state;
mod transport;
mod worker;


pub use error::ConnectionError;
pub use lifecycle::{Lifecycle, RetryTimer};
pub use manager::ConnectionManager;
pub use state::{ConnectionState, SharedState};
pub use transport::{Connection, Transport, WebSocketTransport};
