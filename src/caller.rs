//! Best-effort identification of the code that issued a log call.
//!
//! Two capture strategies are available. [`CallerCapture::Location`] relies
//! on `#[track_caller]` and is exact and cheap. [`CallerCapture::Backtrace`]
//! renders the current backtrace and runs it through [`locate`], which works
//! on any textual stack whose frames contain `at ` markers, including the
//! `at fn (scheme://path:line:col)` style produced by script runtimes.
//!
//! Every strategy degrades to [`UNKNOWN_CALLER`] rather than failing.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::Location;

use once_cell::sync::Lazy;
use regex::Regex;

/// Locator used when no caller can be determined.
pub const UNKNOWN_CALLER: &str = "Unknown";

/// Substrings identifying frames that belong to this crate.
pub const OWN_FRAME_PATTERNS: &[&str] = &["remote_logger_client", "RemoteLoggerClient"];

static URL_LOCATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(?((?:http|https|file)://[^\s)]+):(\d+):(\d+)\)?")
        .expect("url locator pattern is valid")
});

/// How the client determines the caller locator attached to each record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CallerCapture {
    /// `file:line:column` of the `#[track_caller]` call site.
    #[default]
    Location,
    /// Innermost backtrace frame outside this crate.
    Backtrace,
    /// Always report [`UNKNOWN_CALLER`].
    Disabled,
}

/// Capture the caller locator for the current call site.
#[track_caller]
pub fn capture(mode: CallerCapture) -> String {
    capture_at(mode, Location::caller())
}

/// Capture the caller locator, using `location` as the call site when the
/// mode relies on `#[track_caller]`.
pub fn capture_at(mode: CallerCapture, location: &Location<'_>) -> String {
    match mode {
        CallerCapture::Location => {
            format!(
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            )
        }
        CallerCapture::Backtrace => {
            let backtrace = Backtrace::force_capture();
            match backtrace.status() {
                BacktraceStatus::Captured => locate(&backtrace.to_string()),
                _ => UNKNOWN_CALLER.to_string(),
            }
        }
        CallerCapture::Disabled => UNKNOWN_CALLER.to_string(),
    }
}

/// Pick the caller locator out of a textual stack trace.
///
/// Frames are read innermost first. Everything up to and including the last
/// frame attributed to this crate is skipped; the first remaining frame
/// carrying an `at ` marker is the caller. A `scheme://path:line:col`
/// locator inside that frame is returned on its own, otherwise the trimmed
/// frame text is.
///
/// # Examples
///
/// ```rust
/// use remote_logger_client::caller::locate;
///
/// let stack = "Error\n    at foo (http://host/app.js:10:5)";
/// assert_eq!(locate(stack), "http://host/app.js:10:5");
/// assert_eq!(locate("Error"), "Unknown");
/// ```
pub fn locate(stack: &str) -> String {
    let frames = split_frames(stack);
    let start = frames
        .iter()
        .rposition(|frame| is_own_frame(frame))
        .map_or(0, |idx| idx + 1);
    frames[start..]
        .iter()
        .find(|frame| frame.contains("at "))
        .map_or_else(|| UNKNOWN_CALLER.to_string(), |frame| frame_locator(frame))
}

/// Extract `scheme://path:line:col` from a frame, or return it trimmed.
pub fn frame_locator(frame: &str) -> String {
    match URL_LOCATOR.captures(frame) {
        Some(caps) => format!("{}:{}:{}", &caps[1], &caps[2], &caps[3]),
        None => frame.trim().to_string(),
    }
}

fn is_own_frame(frame: &str) -> bool {
    OWN_FRAME_PATTERNS.iter().any(|p| frame.contains(p))
}

/// Strip the `N: ` index Rust backtraces put in front of each symbol.
fn numbered_symbol(line: &str) -> Option<&str> {
    let (index, symbol) = line.split_once(": ")?;
    (!index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())).then_some(symbol)
}

/// Group stack lines into frames.
///
/// Rust backtraces spread a frame over a numbered symbol line followed by
/// an `at path:line:col` line; those are joined. Every other non-empty line
/// is a frame of its own.
fn split_frames(stack: &str) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    let mut open_symbol = false;
    for line in stack.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(symbol) = numbered_symbol(trimmed) {
            frames.push(symbol.to_string());
            open_symbol = true;
            continue;
        }
        match frames.last_mut() {
            Some(frame) if open_symbol && trimmed.starts_with("at ") => {
                frame.push(' ');
                frame.push_str(trimmed);
                open_symbol = false;
            }
            _ => {
                frames.push(trimmed.to_string());
                open_symbol = false;
            }
        }
    }
    frames
}
