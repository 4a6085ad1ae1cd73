//! Compatibility bridge for the Rust `log` crate.
//!
//! `RemoteLogAdapter` implements `log::Log` and forwards every enabled record
//! into a [`Logger`] as a single `"[LEVEL] target: message"` argument,
//! attributed to the record's `file:line`. Records emitted by this crate or
//! by its WebSocket layer are never forwarded: each forwarded record makes
//! both of them log again.

use std::sync::OnceLock;

use log::{Metadata, Record};
use serde_json::Value;

use crate::{caller::UNKNOWN_CALLER, factory::Logger};

/// Target prefixes of records the adapter must not forward.
const IGNORED_TARGETS: &[&str] = &["remote_logger_client", "tungstenite"];

/// Adapter implementing the Rust `log::Log` trait on top of a [`Logger`].
#[derive(Debug)]
pub struct RemoteLogAdapter {
    logger: Logger,
}

impl RemoteLogAdapter {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

fn is_ignored_target(target: &str) -> bool {
    IGNORED_TARGETS.iter().any(|ignored| {
        target
            .strip_prefix(*ignored)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

fn is_enabled_by_global_max(level: log::Level) -> bool {
    log::max_level() >= level.to_level_filter()
}

fn record_caller(record: &Record<'_>) -> String {
    match (record.file(), record.line()) {
        (Some(file), Some(line)) => format!("{file}:{line}"),
        (Some(file), None) => file.to_string(),
        _ => UNKNOWN_CALLER.to_string(),
    }
}

/// Single-string rendering of a bridged record.
pub fn format_record(record: &Record<'_>) -> String {
    format!("[{}] {}: {}", record.level(), record.target(), record.args())
}

impl log::Log for RemoteLogAdapter {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.logger.is_enabled()
            && is_enabled_by_global_max(metadata.level())
            && !is_ignored_target(metadata.target())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.logger
            .log_from(record_caller(record), [Value::String(format_record(record))]);
    }

    fn flush(&self) {}
}

static INSTALL_RESULT: OnceLock<bool> = OnceLock::new();

/// Install `logger` as the global Rust logger.
///
/// Returns `true` on success. When a different global logger is already set,
/// installation fails and `false` is returned. Subsequent calls return the
/// cached outcome and drop the logger they were given.
pub fn install_global_logger(logger: Logger) -> bool {
    *INSTALL_RESULT.get_or_init(move || {
        if log::set_boxed_logger(Box::new(RemoteLogAdapter::new(logger))).is_err() {
            return false;
        }
        log::set_max_level(log::LevelFilter::Trace);
        true
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for the `log` crate bridge.

    use super::*;
    use crate::{
        caller::CallerCapture,
        client::RemoteLoggerClient,
        config::ClientConfig,
        test_utils::{scripted_transport::ScriptedTransport, shared_buffer::SharedBuf, wait_until},
    };
    use log::Log;
    use rstest::rstest;
    use std::time::Duration;

    fn adapter(transport: ScriptedTransport, console: &SharedBuf) -> RemoteLogAdapter {
        log::set_max_level(log::LevelFilter::Trace);
        let config = ClientConfig::new("bridge", 9020)
            .with_caller_capture(CallerCapture::Disabled)
            .with_retry_delay(Duration::from_millis(50));
        RemoteLogAdapter::new(Logger::Remote(RemoteLoggerClient::with_transport(
            config,
            console.console(),
            transport,
        )))
    }

    fn record_at<'a>(
        level: log::Level,
        target: &'a str,
        args: std::fmt::Arguments<'a>,
    ) -> Record<'a> {
        Record::builder()
            .args(args)
            .level(level)
            .target(target)
            .file(Some("src/app.rs"))
            .line(Some(42))
            .build()
    }

    #[rstest]
    fn forwards_records_as_a_single_argument() {
        let transport = ScriptedTransport::default();
        let console = SharedBuf::default();
        let adapter = adapter(transport.clone(), &console);
        let client = adapter.logger().client().expect("remote logger");
        assert!(wait_until(Duration::from_secs(1), || client.is_connected()));

        adapter.log(&record_at(log::Level::Error, "app::db", format_args!("lost {}", 3)));

        assert!(wait_until(Duration::from_secs(1), || !transport.sent().is_empty()));
        let frame: serde_json::Value =
            serde_json::from_str(&transport.sent()[0]).expect("frame is JSON");
        assert_eq!(frame["app"], "bridge");
        assert_eq!(frame["message"], serde_json::json!(["[ERROR] app::db: lost 3"]));
        assert_eq!(frame["caller"], "src/app.rs:42");
    }

    #[rstest]
    fn falls_back_to_console_while_offline() {
        let console = SharedBuf::default();
        let adapter = adapter(ScriptedTransport::refusing(usize::MAX), &console);

        adapter.log(&record_at(log::Level::Error, "app", format_args!("offline")));

        assert_eq!(console.lines(), vec!["[ERROR] app: offline"]);
    }

    #[rstest]
    #[case("remote_logger_client")]
    #[case("remote_logger_client::connection::worker")]
    #[case("tungstenite::protocol")]
    fn ignores_its_own_diagnostics(#[case] target: &str) {
        let console = SharedBuf::default();
        let adapter = adapter(ScriptedTransport::refusing(usize::MAX), &console);

        adapter.log(&record_at(log::Level::Error, target, format_args!("loop")));

        assert!(console.output().is_empty());
    }

    #[rstest]
    fn disabled_logger_is_never_enabled() {
        let adapter = RemoteLogAdapter::new(Logger::Disabled);
        let metadata = Metadata::builder()
            .level(log::Level::Error)
            .target("app")
            .build();
        assert!(!adapter.enabled(&metadata));
    }
}
