//! Development-mode detection.
//!
//! Three ambient signals can switch the logger on, checked in order:
//!
//! 1. the build-mode flag baked in at compile time from `REMOTE_LOGGER_MODE`;
//! 2. the `APP_ENV` process environment variable, or `NODE_ENV` when
//!    `APP_ENV` is unset, so setups shared with JavaScript tooling keep
//!    working unchanged;
//! 3. the process-global mode set through [`set_global_mode`].
//!
//! Each is compared for equality with [`DEVELOPMENT`]. Decision logic reads
//! them through an [`EnvironmentProbe`] so tests can substitute a fixed
//! environment.

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Value that enables remote logging.
pub const DEVELOPMENT: &str = "development";
/// Process environment variable consulted at runtime.
pub const PROCESS_ENV_VAR: &str = "APP_ENV";
/// Fallback read when [`PROCESS_ENV_VAR`] is unset.
pub const FALLBACK_ENV_VAR: &str = "NODE_ENV";
/// Build-mode flag captured when the crate was compiled.
pub const BUILD_MODE: Option<&str> = option_env!("REMOTE_LOGGER_MODE");

static GLOBAL_MODE: Lazy<RwLock<Option<String>>> = Lazy::new(|| RwLock::new(None));

/// Set the process-global environment mode.
pub fn set_global_mode(mode: impl Into<String>) {
    *GLOBAL_MODE.write() = Some(mode.into());
}

/// Forget the process-global environment mode.
pub fn clear_global_mode() {
    GLOBAL_MODE.write().take();
}

/// Source of the ambient signals that gate activation.
pub trait EnvironmentProbe {
    fn build_mode(&self) -> Option<String>;

    fn process_mode(&self) -> Option<String>;

    fn global_mode(&self) -> Option<String>;

    /// True when any signal equals [`DEVELOPMENT`].
    fn is_development(&self) -> bool {
        self.build_mode().as_deref() == Some(DEVELOPMENT)
            || self.process_mode().as_deref() == Some(DEVELOPMENT)
            || self.global_mode().as_deref() == Some(DEVELOPMENT)
    }
}

/// Probe reading the real build flag, process environment and global mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct AmbientEnvironment;

impl EnvironmentProbe for AmbientEnvironment {
    fn build_mode(&self) -> Option<String> {
        BUILD_MODE.map(str::to_owned)
    }

    fn process_mode(&self) -> Option<String> {
        std::env::var(PROCESS_ENV_VAR)
            .or_else(|_| std::env::var(FALLBACK_ENV_VAR))
            .ok()
    }

    fn global_mode(&self) -> Option<String> {
        GLOBAL_MODE.read().clone()
    }
}

/// Probe returning fixed values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticEnvironment {
    pub build_mode: Option<String>,
    pub process_mode: Option<String>,
    pub global_mode: Option<String>,
}

impl StaticEnvironment {
    /// Environment whose process variable says `development`.
    pub fn development() -> Self {
        Self {
            process_mode: Some(DEVELOPMENT.into()),
            ..Self::default()
        }
    }

    /// Environment with every signal set to `production`.
    pub fn production() -> Self {
        Self {
            build_mode: Some("production".into()),
            process_mode: Some("production".into()),
            global_mode: Some("production".into()),
        }
    }
}

impl EnvironmentProbe for StaticEnvironment {
    fn build_mode(&self) -> Option<String> {
        self.build_mode.clone()
    }

    fn process_mode(&self) -> Option<String> {
        self.process_mode.clone()
    }

    fn global_mode(&self) -> Option<String> {
        self.global_mode.clone()
    }
}

/// Whether the ambient environment asks for development mode.
pub fn is_development() -> bool {
    AmbientEnvironment.is_development()
}
