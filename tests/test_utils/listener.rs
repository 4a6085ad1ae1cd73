//! WebSocket listener used as the remote end in integration tests.

use std::{
    net::{SocketAddr, TcpListener},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
    time::Duration,
};

use remote_logger_client::LogRecord;
use tungstenite::Message;

/// Listener collecting every text frame it receives.
pub struct TestListener {
    pub addr: SocketAddr,
    frames: mpsc::Receiver<String>,
    accepted: Arc<AtomicUsize>,
}

impl TestListener {
    /// Serve WebSocket clients on an already bound socket.
    pub fn serve(listener: TcpListener) -> Self {
        let addr = listener.local_addr().expect("listener has address");
        let (tx, frames) = mpsc::channel();
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&accepted);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                counter.fetch_add(1, Ordering::SeqCst);
                let Ok(mut socket) = tungstenite::accept(stream) else {
                    continue;
                };
                let tx = tx.clone();
                thread::spawn(move || {
                    while let Ok(message) = socket.read() {
                        if let Message::Text(text) = message {
                            if tx.send(text).is_err() {
                                break;
                            }
                        }
                    }
                });
            }
        });
        Self {
            addr,
            frames,
            accepted,
        }
    }

    /// TCP connections accepted so far, whether or not they upgraded.
    pub fn connections(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Next raw frame, if one arrives within `timeout`.
    pub fn next_frame(&self, timeout: Duration) -> Option<String> {
        self.frames.recv_timeout(timeout).ok()
    }

    /// Next frame decoded as a record.
    pub fn next_record(&self, timeout: Duration) -> LogRecord {
        let frame = self.next_frame(timeout).expect("frame received");
        serde_json::from_str(&frame).expect("frame decodes as a record")
    }
}
