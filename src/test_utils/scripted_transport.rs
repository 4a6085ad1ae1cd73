//! Transport double with a scripted connection outcome.

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use parking_lot::Mutex;

use crate::connection::{Connection, ConnectionError, Transport};

/// Refuses the first `refuse_first` attempts, then hands out connections
/// that record every frame. Setting [`ScriptedTransport::drop_listener`]
/// makes the current connection report a listener close on its next poll.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    attempts: Arc<AtomicUsize>,
    refuse_first: usize,
    sent: Arc<Mutex<Vec<String>>>,
    listener_gone: Arc<AtomicBool>,
}

impl ScriptedTransport {
    pub fn refusing(refuse_first: usize) -> Self {
        Self {
            refuse_first,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub fn drop_listener(&self) {
        self.listener_gone.store(true, Ordering::SeqCst);
    }
}

impl Transport for ScriptedTransport {
    fn connect(&self) -> Result<Box<dyn Connection>, ConnectionError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.refuse_first {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused").into());
        }
        self.listener_gone.store(false, Ordering::SeqCst);
        Ok(Box::new(ScriptedConnection {
            sent: Arc::clone(&self.sent),
            listener_gone: Arc::clone(&self.listener_gone),
        }))
    }

    fn endpoint(&self) -> String {
        "scripted".into()
    }
}

struct ScriptedConnection {
    sent: Arc<Mutex<Vec<String>>>,
    listener_gone: Arc<AtomicBool>,
}

impl Connection for ScriptedConnection {
    fn send_text(&mut self, text: String) -> Result<(), ConnectionError> {
        if self.listener_gone.load(Ordering::SeqCst) {
            return Err(ConnectionError::Closed);
        }
        self.sent.lock().push(text);
        Ok(())
    }

    fn poll(&mut self) -> Result<(), ConnectionError> {
        if self.listener_gone.swap(false, Ordering::SeqCst) {
            return Err(ConnectionError::Closed);
        }
        Ok(())
    }

    fn close(&mut self) {}
}
