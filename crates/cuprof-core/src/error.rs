//! Error types for cuprof.

use std::fmt;

use thiserror::Error;

use crate::status::{self, NativeStatus};

/// Result alias used throughout cuprof.
pub type Result<T> = std::result::Result<T, ProfilerError>;

/// Errors surfaced by the profiling layer.
///
/// Only profiler control (`start`/`stop`) can fail natively. Markers,
/// ranges and narrow thread naming never return an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfilerError {
    /// A native profiling call returned a non-success status.
    #[error("{action}: {}", NativeCode(.code))]
    Native {
        /// The native status code.
        code: NativeStatus,
        /// What was being attempted.
        action: &'static str,
    },

    /// The operation is not available on this platform or backend.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Invalid configuration value.
    #[error("invalid profiler configuration: {0}")]
    Config(String),

    /// The native backend is not compiled in or cannot be loaded.
    #[error("profiler backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl ProfilerError {
    /// The native status code, for [`ProfilerError::Native`].
    pub fn native_code(&self) -> Option<NativeStatus> {
        match self {
            ProfilerError::Native { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Turn a native status into a `Result`, tagging failures with `action`.
pub fn check_status(code: NativeStatus, action: &'static str) -> Result<()> {
    if code == status::SUCCESS {
        Ok(())
    } else {
        Err(ProfilerError::Native { code, action })
    }
}

struct NativeCode<'a>(&'a NativeStatus);

impl fmt::Display for NativeCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match status::status_name(*self.0) {
            Some(name) => write!(f, "native status {} ({})", self.0, name),
            None => write!(f, "native status {}", self.0),
        }
    }
}
