//! Failures observed by the connection worker.
//!
//! None of these reach callers of `log`; every variant is routed into the
//! retry path.

use std::io;

use thiserror::Error;

/// Reasons a connection could not be opened or stopped being usable.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Socket-level failure (resolution, connect, read or write).
    #[error("socket error: {0}")]
    Io(#[from] io::Error),
    /// The listener did not complete the WebSocket handshake.
    #[error("websocket handshake failed: {0}")]
    Handshake(String),
    /// Protocol failure reported by the WebSocket layer.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
    /// The listener closed the connection.
    #[error("connection closed by listener")]
    Closed,
}
