//! Process-wide profiler and free-function shortcuts.
//!
//! The process-wide [`Profiler`] is created lazily on first use and lives
//! until the process exits. Install a native backend with [`init_global`]
//! before the first annotation; otherwise the [`NullBackend`] is used.

use std::sync::{Arc, OnceLock};

use crate::backend::{NullBackend, ProfilerBackend};
use crate::color::Color;
use crate::config::ProfilerConfig;
use crate::error::{ProfilerError, Result};
use crate::profiler::Profiler;
use crate::range::{RangeHandle, RangeType};
use crate::scoped::ScopedRange;
use crate::thread::NativeThreadId;

static GLOBAL: OnceLock<Profiler> = OnceLock::new();

/// Install `backend` as the process-wide profiler, configured from the
/// environment.
///
/// Fails if the global profiler already exists, either from an earlier
/// `init_global` or from an annotation made before it.
pub fn init_global(backend: Arc<dyn ProfilerBackend>) -> Result<&'static Profiler> {
    let config = ProfilerConfig::from_env()?;
    let mut installed = false;
    let profiler = GLOBAL.get_or_init(|| {
        installed = true;
        Profiler::with_config(backend, config)
    });
    if installed {
        tracing::info!(backend = profiler.backend_name(), "Installed global profiler");
        Ok(profiler)
    } else {
        Err(ProfilerError::Config(format!(
            "global profiler already initialized with backend '{}'",
            profiler.backend_name()
        )))
    }
}

/// The process-wide profiler.
pub fn global() -> &'static Profiler {
    GLOBAL.get_or_init(|| {
        let config = ProfilerConfig::from_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring invalid profiler environment");
            ProfilerConfig::default()
        });
        Profiler::with_config(Arc::new(NullBackend), config)
    })
}

/// Marker and range shortcuts on the global profiler.
pub mod mark {
    use super::*;

    /// See [`Profiler::point`].
    pub fn point(description: &str, color: Color) {
        global().point(description, color);
    }

    /// See [`Profiler::range_start`].
    #[must_use = "a started range must be ended with `range_end`"]
    pub fn range_start(description: &str, range_type: RangeType, color: Color) -> RangeHandle {
        global().range_start(description, range_type, color)
    }

    /// See [`Profiler::range_end`].
    pub fn range_end(handle: RangeHandle) {
        global().range_end(handle);
    }

    /// See [`Profiler::scoped_range`].
    pub fn scoped_range(
        description: &str,
        range_type: RangeType,
        color: Color,
    ) -> ScopedRange<'static> {
        global().scoped_range(description, range_type, color)
    }
}

/// See [`Profiler::start`].
pub fn start() -> Result<()> {
    global().start()
}

/// See [`Profiler::stop`].
pub fn stop() -> Result<()> {
    global().stop()
}

/// See [`Profiler::name_host_thread`].
pub fn name_host_thread(thread: NativeThreadId, name: &str) {
    global().name_host_thread(thread, name);
}

/// See [`Profiler::name_host_thread_wide`].
pub fn name_host_thread_wide(thread: NativeThreadId, name: &str) -> Result<()> {
    global().name_host_thread_wide(thread, name)
}

/// See [`Profiler::name_this_thread`].
pub fn name_this_thread(name: &str) -> Result<()> {
    global().name_this_thread(name)
}
