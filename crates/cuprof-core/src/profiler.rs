//! The profiler front end: markers, ranges, session control and thread naming.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::{NullBackend, ProfilerBackend};
use crate::color::Color;
use crate::config::{LockPolicy, ProfilerConfig};
use crate::error::{check_status, Result};
use crate::range::{RangeHandle, RangeType};
use crate::scoped::ScopedRange;
use crate::thread::NativeThreadId;

/// Action label attached to session-control failures.
///
/// `stop()` reports failures under the same label as `start()`.
pub const START_ACTION: &str = "Starting to profile";

/// Front end over a [`ProfilerBackend`].
///
/// Every native call goes through [`Profiler::with_backend`], which holds
/// the profiler lock for the full duration of the call when the lock
/// policy is [`LockPolicy::Serialize`]. Share one `Profiler` (for example
/// behind an `Arc`, or via [`crate::global`]) between all threads that
/// must not talk to the native library concurrently.
pub struct Profiler {
    backend: Arc<dyn ProfilerBackend>,
    lock: Mutex<()>,
    lock_policy: LockPolicy,
    enabled: AtomicBool,
}

impl Profiler {
    /// Create a profiler with the default configuration.
    pub fn new(backend: Arc<dyn ProfilerBackend>) -> Self {
        Self::with_config(backend, ProfilerConfig::default())
    }

    /// Create a profiler with an explicit configuration.
    pub fn with_config(backend: Arc<dyn ProfilerBackend>, config: ProfilerConfig) -> Self {
        tracing::debug!(
            backend = backend.name(),
            enabled = config.enabled,
            lock_policy = %config.lock_policy,
            "Created profiler"
        );
        Self {
            backend,
            lock: Mutex::new(()),
            lock_policy: config.lock_policy,
            enabled: AtomicBool::new(config.enabled),
        }
    }

    /// Profiler that drops every call.
    pub fn null() -> Self {
        Self::new(Arc::new(NullBackend))
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Lock policy in use.
    pub fn lock_policy(&self) -> LockPolicy {
        self.lock_policy
    }

    /// Enable or disable annotations.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether annotations are enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Run `f` against the backend, under the profiler lock if the policy
    /// asks for it. The lock is released when `f` returns or unwinds.
    pub fn with_backend<R>(&self, f: impl FnOnce(&dyn ProfilerBackend) -> R) -> R {
        match self.lock_policy {
            LockPolicy::Serialize => {
                let _guard = self.lock.lock();
                f(self.backend.as_ref())
            }
            LockPolicy::Unserialized => f(self.backend.as_ref()),
        }
    }

    /// Emit an instantaneous marker.
    pub fn point(&self, description: &str, color: Color) {
        if !self.is_enabled() {
            return;
        }
        tracing::trace!(description, color = %color, "mark");
        self.with_backend(|backend| backend.mark(description, color));
    }

    /// Emit a black marker.
    pub fn point_default(&self, description: &str) {
        self.point(description, Color::BLACK);
    }

    /// Begin a range. The handle must be passed to exactly one
    /// [`Profiler::range_end`].
    ///
    /// Returns [`RangeHandle::NONE`] without touching the backend when the
    /// profiler is disabled.
    #[must_use = "a started range must be ended with `range_end`"]
    pub fn range_start(
        &self,
        description: &str,
        range_type: RangeType,
        color: Color,
    ) -> RangeHandle {
        self.try_range_start(description, range_type, color)
            .unwrap_or(RangeHandle::NONE)
    }

    /// Begin a range if enabled, reading the enable flag exactly once.
    pub(crate) fn try_range_start(
        &self,
        description: &str,
        range_type: RangeType,
        color: Color,
    ) -> Option<RangeHandle> {
        if !self.is_enabled() {
            return None;
        }
        let handle =
            self.with_backend(|backend| backend.range_start(description, range_type, color));
        tracing::trace!(description, %range_type, color = %color, %handle, "range start");
        Some(handle)
    }

    /// Begin an unspecified, black range.
    #[must_use = "a started range must be ended with `range_end`"]
    pub fn range_start_default(&self, description: &str) -> RangeHandle {
        self.range_start(description, RangeType::Unspecified, Color::BLACK)
    }

    /// End a range.
    ///
    /// Forwarded even while disabled, so a range opened before disabling
    /// still closes. The one exception is [`RangeHandle::NONE`] while
    /// disabled: that is what a disabled [`Profiler::range_start`] hands
    /// out, and it has no native start to pair with.
    pub fn range_end(&self, handle: RangeHandle) {
        if handle.is_none() && !self.is_enabled() {
            return;
        }
        tracing::trace!(%handle, "range end");
        self.with_backend(|backend| backend.range_end(handle));
    }

    /// Begin a range that ends when the returned guard is dropped.
    pub fn scoped_range(
        &self,
        description: &str,
        range_type: RangeType,
        color: Color,
    ) -> ScopedRange<'_> {
        ScopedRange::new(self, description, range_type, color)
    }

    /// Begin a capture session.
    pub fn start(&self) -> Result<()> {
        let status = self.with_backend(|backend| backend.profiler_start());
        self.log_session("start", check_status(status, START_ACTION))
    }

    /// End a capture session.
    pub fn stop(&self) -> Result<()> {
        let status = self.with_backend(|backend| backend.profiler_stop());
        self.log_session("stop", check_status(status, START_ACTION))
    }

    fn log_session(&self, what: &'static str, result: Result<()>) -> Result<()> {
        match &result {
            Ok(()) => tracing::info!(backend = self.backend.name(), "Profiler session {}", what),
            Err(e) => tracing::warn!(
                backend = self.backend.name(),
                error = %e,
                "Profiler session {} failed",
                what
            ),
        }
        result
    }

    /// Name an OS thread. The name is forwarded unmodified.
    pub fn name_host_thread(&self, thread: NativeThreadId, name: &str) {
        tracing::debug!(%thread, name, "Naming host thread");
        self.with_backend(|backend| backend.name_os_thread(thread, name));
    }

    /// Name an OS thread with a wide string.
    ///
    /// Fails with [`ProfilerError::Unsupported`](crate::ProfilerError::Unsupported)
    /// on platforms without a native wide thread-naming call.
    pub fn name_host_thread_wide(&self, thread: NativeThreadId, name: &str) -> Result<()> {
        #[cfg(any(unix, windows))]
        {
            let wide = crate::thread::WideName::new(name);
            tracing::debug!(%thread, name, "Naming host thread (wide)");
            self.with_backend(|backend| backend.name_os_thread_wide(thread, &wide));
            Ok(())
        }
        #[cfg(not(any(unix, windows)))]
        {
            let _ = (thread, name);
            Err(crate::ProfilerError::Unsupported(
                "wide-string thread naming on this platform",
            ))
        }
    }

    /// Name the calling thread.
    pub fn name_this_thread(&self, name: &str) -> Result<()> {
        let thread = NativeThreadId::current()?;
        self.name_host_thread(thread, name);
        Ok(())
    }
}

impl fmt::Debug for Profiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profiler")
            .field("backend", &self.backend.name())
            .field("lock_policy", &self.lock_policy)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordedCall, RecordingBackend};
    use crate::status;

    fn recording() -> (Arc<RecordingBackend>, Profiler) {
        let backend = Arc::new(RecordingBackend::new());
        let profiler = Profiler::new(backend.clone());
        (backend, profiler)
    }

    #[test]
    fn test_point_forwards_description_and_color() {
        let (backend, profiler) = recording();
        profiler.point("checkpoint", Color::GREEN);
        profiler.point_default("plain");
        assert_eq!(
            backend.calls(),
            vec![
                RecordedCall::Mark {
                    description: "checkpoint".into(),
                    color: Color::GREEN,
                },
                RecordedCall::Mark {
                    description: "plain".into(),
                    color: Color::BLACK,
                },
            ]
        );
    }

    #[test]
    fn test_range_start_default_arguments() {
        let (backend, profiler) = recording();
        let handle = profiler.range_start_default("region");
        profiler.range_end(handle);
        match &backend.calls()[0] {
            RecordedCall::RangeStart {
                range_type, color, ..
            } => {
                assert_eq!(*range_type, RangeType::Unspecified);
                assert_eq!(*color, Color::BLACK);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn test_disabled_profiler_drops_annotations() {
        let (backend, profiler) = recording();
        profiler.set_enabled(false);
        assert!(!profiler.is_enabled());

        profiler.point("ignored", Color::RED);
        let handle = profiler.range_start("ignored", RangeType::Kernel, Color::RED);
        assert!(handle.is_none());
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_range_end_forwards_while_disabled() {
        let (backend, profiler) = recording();
        let handle = profiler.range_start("open", RangeType::Kernel, Color::RED);
        profiler.set_enabled(false);
        profiler.range_end(handle);
        assert_eq!(backend.calls()[1], RecordedCall::RangeEnd { handle });
    }

    #[test]
    fn test_disabled_pair_emits_nothing() {
        let (backend, profiler) = recording();
        profiler.set_enabled(false);
        let handle = profiler.range_start("off", RangeType::Kernel, Color::RED);
        profiler.range_end(handle);
        assert_eq!(backend.call_count(), 0);

        // Once re-enabled, NONE is forwarded like any other handle.
        profiler.set_enabled(true);
        profiler.range_end(RangeHandle::NONE);
        assert_eq!(
            backend.calls(),
            vec![RecordedCall::RangeEnd {
                handle: RangeHandle::NONE
            }]
        );
    }

    #[test]
    fn test_start_stop_labels() {
        let (_backend, profiler) = recording();
        profiler.start().unwrap();
        profiler.stop().unwrap();
        let err = profiler.stop().unwrap_err();
        assert_eq!(
            err,
            crate::ProfilerError::Native {
                code: status::PROFILER_ALREADY_STOPPED,
                action: START_ACTION,
            }
        );
    }

    #[test]
    fn test_session_control_ignores_enabled_flag() {
        let (backend, profiler) = recording();
        profiler.set_enabled(false);
        profiler.start().unwrap();
        assert!(backend.session_active());
    }

    #[test]
    fn test_name_host_thread_forwards_bytes() {
        let (backend, profiler) = recording();
        profiler.name_host_thread(NativeThreadId(42), "décodeur #1");
        assert_eq!(
            backend.calls(),
            vec![RecordedCall::NameThread {
                thread: NativeThreadId(42),
                name: "décodeur #1".as_bytes().to_vec(),
            }]
        );
    }

    #[cfg(any(unix, windows))]
    #[test]
    fn test_name_this_thread_uses_current_id() {
        let (backend, profiler) = recording();
        profiler.name_this_thread("main").unwrap();
        let expected = NativeThreadId::current().unwrap();
        assert_eq!(
            backend.calls(),
            vec![RecordedCall::NameThread {
                thread: expected,
                name: b"main".to_vec(),
            }]
        );
    }

    #[cfg(any(unix, windows))]
    #[test]
    fn test_name_host_thread_wide() {
        let (backend, profiler) = recording();
        profiler
            .name_host_thread_wide(NativeThreadId(7), "ワーカー")
            .unwrap();
        match &backend.calls()[0] {
            RecordedCall::NameThreadWide { thread, name } => {
                assert_eq!(*thread, NativeThreadId(7));
                assert_eq!(name, crate::thread::WideName::new("ワーカー").as_units());
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn test_debug_output() {
        let profiler = Profiler::null();
        let debug = format!("{profiler:?}");
        assert!(debug.contains("null"));
        assert!(debug.contains("Serialize"));
    }
}
