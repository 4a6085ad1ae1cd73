#![allow(dead_code)]

pub mod fixtures;
pub mod listener;
pub mod shared_buffer;

pub use shared_buffer::{SharedBuf, read_output};

use std::{
    thread,
    time::{Duration, Instant},
};

/// Poll `condition` until it holds or `timeout` passes.
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
