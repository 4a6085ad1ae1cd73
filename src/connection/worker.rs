//! Worker thread driving connection I/O.

use std::{
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use log::{debug, warn};

use crate::{config::ClientConfig, console::Console, rate_limited_warner::RateLimitedWarner};

use super::{
    error::ConnectionError,
    lifecycle::Lifecycle,
    state::{ConnectionState, SharedState},
    transport::{Connection, Transport},
};

/// Text frames waiting to be written to the listener.
pub type FrameSender = Sender<String>;

/// Spawn the worker and return the frame channel feeding it.
///
/// The worker starts connecting immediately and runs until every sender has
/// been dropped. Frames still queued at that point are written before the
/// connection is closed.
pub fn spawn_worker(
    config: &ClientConfig,
    transport: Box<dyn Transport>,
    state: SharedState,
    console: Console,
) -> std::io::Result<(FrameSender, thread::JoinHandle<()>)> {
    let (tx, rx) = bounded(config.capacity);
    let worker = Worker::new(config, transport, state, console);
    let handle = thread::Builder::new()
        .name("remote-logger".into())
        .spawn(move || worker.run(rx))?;
    Ok((tx, handle))
}

pub(super) struct Worker {
    app: String,
    transport: Box<dyn Transport>,
    connection: Option<Box<dyn Connection>>,
    lifecycle: Lifecycle,
    console: Console,
    poll_interval: Duration,
    last_poll: Instant,
    warner: RateLimitedWarner,
}

impl Worker {
    pub(super) fn new(
        config: &ClientConfig,
        transport: Box<dyn Transport>,
        state: SharedState,
        console: Console,
    ) -> Self {
        Self {
            app: config.app.clone(),
            transport,
            connection: None,
            lifecycle: Lifecycle::new(state, config.retry_delay),
            console,
            poll_interval: config.poll_interval,
            last_poll: Instant::now(),
            warner: RateLimitedWarner::new(config.warn_interval),
        }
    }

    fn run(mut self, rx: Receiver<String>) {
        self.connect(Instant::now());
        loop {
            match rx.recv_timeout(self.next_wait(Instant::now())) {
                Ok(frame) => self.send(frame),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            let now = Instant::now();
            if self.lifecycle.retry_due(now) {
                self.connect(now);
            }
            self.poll_if_due(now);
        }
        self.shutdown();
    }

    /// How long the command loop may block before it must check the socket
    /// or fire the pending retry.
    fn next_wait(&self, now: Instant) -> Duration {
        match (&self.connection, self.lifecycle.timer().deadline()) {
            (None, Some(deadline)) => deadline.saturating_duration_since(now),
            _ => self.poll_interval,
        }
    }

    pub(super) fn connect(&mut self, now: Instant) {
        if !self.lifecycle.begin_connect() {
            return;
        }
        match self.transport.connect() {
            Ok(connection) => {
                self.connection = Some(connection);
                self.lifecycle.opened();
                debug!("remote logger connected to {}", self.transport.endpoint());
                self.console
                    .write_line(&format!("[remote-logger-client] [{}] Connected.", self.app));
            }
            Err(err) => self.fail(now, &err),
        }
    }

    /// Route any failure into the single retry path.
    fn fail(&mut self, now: Instant, err: &ConnectionError) {
        if let Some(mut connection) = self.connection.take() {
            connection.close();
        }
        let deadline = self.lifecycle.failed(now);
        debug!(
            "remote logger connection to {} unavailable: {err}; retrying in {:?}",
            self.transport.endpoint(),
            deadline.saturating_duration_since(now)
        );
    }

    pub(super) fn send(&mut self, frame: String) {
        let Some(connection) = self.connection.as_mut() else {
            self.warner.record_drop();
            self.warner.warn_if_due(|count| {
                warn!("remote logger dropped {count} frames; no active connection");
            });
            return;
        };
        if let Err(err) = connection.send_text(frame) {
            self.warner.record_drop();
            self.warner.warn_if_due(|count| {
                warn!("remote logger dropped {count} frames due to write errors: {err}");
            });
            self.fail(Instant::now(), &err);
        }
    }

    /// Check the socket if a poll interval has passed since the last check.
    /// Returns whether it was checked.
    pub(super) fn poll_if_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_poll) < self.poll_interval {
            return false;
        }
        self.last_poll = now;
        self.poll_connection();
        true
    }

    pub(super) fn poll_connection(&mut self) {
        let Some(connection) = self.connection.as_mut() else {
            return;
        };
        if let Err(err) = connection.poll() {
            self.fail(Instant::now(), &err);
        }
    }

    pub(super) fn state(&self) -> ConnectionState {
        self.lifecycle.state()
    }

    fn shutdown(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            connection.close();
        }
        self.lifecycle.stop();
        self.warner.flush(|count| {
            warn!("remote logger dropped {count} frames before shutdown");
        });
    }
}
