//! The seam between cuprof and a native profiling library.

use crate::color::Color;
use crate::range::{RangeHandle, RangeType};
use crate::status::{self, NativeStatus};
use crate::thread::NativeThreadId;
#[cfg(any(unix, windows))]
use crate::thread::WideName;

/// A native profiling library.
///
/// Implementations forward each call to the corresponding native entry
/// point and nothing else. Serialization, enable/disable and error
/// translation live in [`Profiler`](crate::Profiler).
pub trait ProfilerBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Emit an instantaneous marker.
    fn mark(&self, description: &str, color: Color);

    /// Begin a range and return its handle.
    fn range_start(&self, description: &str, range_type: RangeType, color: Color) -> RangeHandle;

    /// End the range identified by `handle`.
    fn range_end(&self, handle: RangeHandle);

    /// Begin a capture session. Returns the native status.
    fn profiler_start(&self) -> NativeStatus;

    /// End a capture session. Returns the native status.
    fn profiler_stop(&self) -> NativeStatus;

    /// Name an OS thread with a narrow string.
    fn name_os_thread(&self, thread: NativeThreadId, name: &str);

    /// Name an OS thread with a wide string.
    #[cfg(any(unix, windows))]
    fn name_os_thread_wide(&self, thread: NativeThreadId, name: &WideName);
}

/// Backend that drops every call. Session control always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl ProfilerBackend for NullBackend {
    fn name(&self) -> &'static str {
        "null"
    }

    fn mark(&self, _description: &str, _color: Color) {}

    fn range_start(
        &self,
        _description: &str,
        _range_type: RangeType,
        _color: Color,
    ) -> RangeHandle {
        RangeHandle::NONE
    }

    fn range_end(&self, _handle: RangeHandle) {}

    fn profiler_start(&self) -> NativeStatus {
        status::SUCCESS
    }

    fn profiler_stop(&self) -> NativeStatus {
        status::SUCCESS
    }

    fn name_os_thread(&self, _thread: NativeThreadId, _name: &str) {}

    #[cfg(any(unix, windows))]
    fn name_os_thread_wide(&self, _thread: NativeThreadId, _name: &WideName) {}
}
