//! Minimal WebSocket listener collecting text frames.

use std::{
    net::{SocketAddr, TcpListener},
    sync::mpsc,
    thread,
};

use tungstenite::Message;

/// Accept connections on `listener` and forward every text frame.
///
/// When `close_first` is set the first accepted connection is closed by the
/// listener right after the handshake.
pub fn spawn_listener(
    listener: TcpListener,
    close_first: bool,
) -> (SocketAddr, mpsc::Receiver<String>) {
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for (index, stream) in listener.incoming().enumerate() {
            let Ok(stream) = stream else { continue };
            let Ok(mut socket) = tungstenite::accept(stream) else {
                continue;
            };
            if close_first && index == 0 {
                let _ = socket.close(None);
                let _ = socket.flush();
                continue;
            }
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
    (addr, rx)
}
