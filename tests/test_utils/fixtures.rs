//! rstest fixtures shared by the integration tests.

use std::{net::TcpListener, time::Duration};

use remote_logger_client::{CallerCapture, ClientConfig, ClientConfigBuilder};
use rstest::fixture;

use super::listener::TestListener;

/// A listener on an ephemeral loopback port.
#[fixture]
pub fn listener() -> TestListener {
    TestListener::serve(TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener"))
}

/// A loopback port with nothing listening on it.
#[fixture]
pub fn free_port() -> u16 {
    let probe = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener");
    probe.local_addr().expect("listener has address").port()
}

/// Configuration with short timings for `app` on `port`.
pub fn fast_config(app: &str, port: u16) -> ClientConfig {
    ClientConfigBuilder::new()
        .with_app(app)
        .with_host("127.0.0.1")
        .with_port(port)
        .with_retry_delay(Duration::from_millis(100))
        .with_poll_interval(Duration::from_millis(10))
        .with_connect_timeout(Duration::from_millis(500))
        .with_caller_capture(CallerCapture::Location)
        .build()
        .expect("valid test config")
}
