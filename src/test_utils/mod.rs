//! Test-only helpers shared across crate unit tests.
//!
//! This module is only compiled for unit tests and provides the in-memory
//! console, a scripted transport and a real WebSocket listener so individual
//! test modules stay focused on behaviour.

pub mod listener;
pub mod scripted_transport;
pub mod shared_buffer;

use std::{
    thread,
    time::{Duration, Instant},
};

/// Poll `condition` every few milliseconds until it holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
