//! Variadic logging macro.
//!
//! `remote_log!` takes a logger followed by any number of [`serde::Serialize`]
//! arguments, converts each with [`to_log_value`], and calls `log` on the
//! logger. The call site is captured through `#[track_caller]`, so the
//! locator points at the macro invocation.
//!
//! # Examples
//!
//! ```rust,no_run
//! use remote_logger_client::{create_logger, remote_log};
//!
//! let logger = create_logger("shop", 4455);
//! remote_log!(logger, "cart updated", 3, vec!["apple", "pear"]);
//! remote_log!(logger, "chained").log([serde_json::json!("again")]);
//! ```
//!
//! [`to_log_value`]: crate::log_record::to_log_value

/// Log any number of serialisable values through a logger.
///
/// Works with both [`Logger`](crate::Logger) and
/// [`RemoteLoggerClient`](crate::RemoteLoggerClient), and evaluates to the
/// logger reference so calls can be chained.
#[macro_export]
macro_rules! remote_log {
    ($logger:expr $(,)?) => {
        $logger.log(::std::vec::Vec::<$crate::__private::Value>::new())
    };
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.log(::std::vec![$($crate::log_record::to_log_value(&$arg)),+])
    };
}
