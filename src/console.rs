//! Local console sink used for fallback output and connection notices.

use std::{
    fmt,
    io::{self, Write},
    sync::Arc,
};

use log::warn;
use parking_lot::Mutex;

/// Shared, line-oriented writer standing in for the process console.
///
/// Clones write to the same underlying sink, so the connection worker and
/// the facade interleave whole lines.
#[derive(Clone)]
pub struct Console {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    /// Console writing to standard output.
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Console writing to an arbitrary writer.
    pub fn from_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Write `line` followed by a newline and flush.
    pub fn write_line(&self, line: &str) {
        let mut sink = self.sink.lock();
        if let Err(err) = writeln!(sink, "{line}").and_then(|_| sink.flush()) {
            warn!("remote logger console write failed: {err}");
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
