//! In-memory console used to observe local fallback output.

use std::{
    io::{self, Write},
    sync::Arc,
};

use parking_lot::Mutex;

use crate::console::Console;

/// Thread-safe byte buffer implementing `Write`.
#[derive(Clone, Default)]
pub struct SharedBuf {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuf {
    /// Console writing into this buffer.
    pub fn console(&self) -> Console {
        Console::from_writer(self.clone())
    }

    /// Buffer contents decoded as UTF-8.
    pub fn output(&self) -> String {
        String::from_utf8(self.buffer.lock().clone()).expect("buffer holds UTF-8")
    }

    /// Output lines, newline stripped.
    pub fn lines(&self) -> Vec<String> {
        self.output().lines().map(str::to_owned).collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
