//! Transport primitives for the connection worker.
//!
//! [`Transport`] is the seam between the reconnect logic and the network.
//! [`WebSocketTransport`] is the production implementation: a blocking TCP
//! connect with a timeout followed by a WebSocket client handshake. Once
//! open, the socket is only ever read in non-blocking mode so the worker can
//! notice a listener-initiated close without stalling outgoing frames.

use std::{
    io,
    net::{SocketAddr, TcpStream, ToSocketAddrs},
    time::Duration,
};

use tungstenite::{Message, WebSocket};

use crate::config::ClientConfig;

use super::error::ConnectionError;

/// An open, message-oriented connection to the listener.
pub trait Connection: Send {
    /// Send one text frame.
    fn send_text(&mut self, text: String) -> Result<(), ConnectionError>;

    /// Drain pending listener messages without blocking.
    ///
    /// Returns an error once the listener has closed the connection or the
    /// socket failed.
    fn poll(&mut self) -> Result<(), ConnectionError>;

    /// Close the connection politely. Errors are ignored.
    fn close(&mut self);
}

/// Factory for connections to a fixed endpoint.
pub trait Transport: Send + 'static {
    /// Attempt to open a new connection.
    fn connect(&self) -> Result<Box<dyn Connection>, ConnectionError>;

    /// Human readable endpoint, used in diagnostics.
    fn endpoint(&self) -> String;
}

/// WebSocket transport targeting `ws://host:port`.
#[derive(Clone, Debug)]
pub struct WebSocketTransport {
    /// Hostname or IP address of the listener.
    pub host: String,
    /// TCP port of the listener.
    pub port: u16,
    /// Upper bound for the TCP connect and the handshake.
    pub connect_timeout: Duration,
}

impl WebSocketTransport {
    pub fn new(host: impl Into<String>, port: u16, connect_timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.host.clone(), config.port, config.connect_timeout)
    }

    fn url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }

    fn socket_addrs(&self) -> io::Result<Vec<SocketAddr>> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map(|iter| iter.collect())
    }

    fn connect_tcp(&self) -> io::Result<TcpStream> {
        let mut last_err = None;
        for addr in self.socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.connect_timeout) {
                Ok(stream) => {
                    stream.set_nonblocking(false)?;
                    return Ok(stream);
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("{}:{} did not resolve to any address", self.host, self.port),
            )
        }))
    }
}

impl Transport for WebSocketTransport {
    fn connect(&self) -> Result<Box<dyn Connection>, ConnectionError> {
        let stream = self.connect_tcp()?;
        stream.set_nodelay(true)?;
        stream.set_read_timeout(Some(self.connect_timeout))?;
        stream.set_write_timeout(Some(self.connect_timeout))?;
        let (socket, _response) = tungstenite::client(self.url(), stream)
            .map_err(|err| ConnectionError::Handshake(err.to_string()))?;
        Ok(Box::new(WebSocketConnection { socket }))
    }

    fn endpoint(&self) -> String {
        self.url()
    }
}

/// Open WebSocket over a plain TCP stream.
struct WebSocketConnection {
    socket: WebSocket<TcpStream>,
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

impl Connection for WebSocketConnection {
    fn send_text(&mut self, text: String) -> Result<(), ConnectionError> {
        self.socket.send(Message::Text(text))?;
        Ok(())
    }

    fn poll(&mut self) -> Result<(), ConnectionError> {
        self.socket.get_ref().set_nonblocking(true)?;
        let outcome = self.drain_incoming();
        self.socket.get_ref().set_nonblocking(false)?;
        outcome
    }

    fn close(&mut self) {
        if self.socket.close(None).is_ok() {
            let _ = self.socket.flush();
        }
    }
}

impl WebSocketConnection {
    /// Read until the socket has nothing buffered.
    fn drain_incoming(&mut self) -> Result<(), ConnectionError> {
        loop {
            match self.socket.read() {
                Ok(Message::Close(_)) => return Err(ConnectionError::Closed),
                // Listener chatter is not part of the protocol.
                Ok(_) => continue,
                Err(tungstenite::Error::Io(err)) if is_timeout(&err) => return Ok(()),
                Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                    return Err(ConnectionError::Closed);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
