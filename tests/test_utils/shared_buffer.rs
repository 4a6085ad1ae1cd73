//! Shared buffer standing in for the process console.
//!
//! Handlers write whole lines into the buffer through
//! [`remote_logger_client::Console`], and tests read them back.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use remote_logger_client::Console;

/// Thread-safe wrapper around a byte buffer.
///
/// The inner `Arc<Mutex<Vec<u8>>>` is kept private so tests can't
/// accidentally bypass the `Write` implementation or mutate the buffer
/// without locking.
#[derive(Clone, Default)]
pub struct SharedBuf {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuf {
    /// Console writing into this buffer.
    pub fn console(&self) -> Console {
        Console::from_writer(self.clone())
    }

    /// Output lines, newline stripped.
    pub fn lines(&self) -> Vec<String> {
        read_output(&self.buffer)
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Full output.
    pub fn output(&self) -> String {
        read_output(&self.buffer)
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .expect("SharedBuf mutex poisoned")
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn read_output(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8(buffer.lock().expect("Buffer mutex poisoned").clone())
        .expect("Buffer contains invalid UTF-8")
}
