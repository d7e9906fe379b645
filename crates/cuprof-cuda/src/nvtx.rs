//! NVTX backend for Nsight Systems and Nsight Compute.
//!
//! Forwards every call straight to libnvToolsExt, and session control to
//! `cudaProfilerStart` / `cudaProfilerStop` in libcudart.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cuprof_core::{Color, Profiler, RangeType};
//! use cuprof_cuda::NvtxBackend;
//!
//! let profiler = Profiler::new(Arc::new(NvtxBackend::new()?));
//! {
//!     let _range = profiler.scoped_range("kernel_execution", RangeType::Kernel, Color::CYAN);
//!     // ... kernel execution ...
//! }
//! profiler.point("checkpoint", Color::GREEN);
//! ```

use cuprof_core::{
    Color, NativeStatus, NativeThreadId, ProfilerBackend, RangeHandle, RangeType, Result,
};
#[cfg(any(unix, windows))]
use cuprof_core::WideName;

use crate::attributes::{to_c_string, EventAttributes};
use crate::ffi;

/// NVTX-backed [`ProfilerBackend`].
#[derive(Debug)]
pub struct NvtxBackend {
    _private: (),
}

impl NvtxBackend {
    /// Create the backend and name the range-type categories.
    pub fn new() -> Result<Self> {
        let backend = Self { _private: () };
        backend.register_categories();
        tracing::info!("NVTX backend initialized");
        Ok(backend)
    }

    fn register_categories(&self) {
        for range_type in RangeType::ALL {
            let name = to_c_string(range_type.name());
            // SAFETY: `name` is a valid NUL-terminated string for the duration of the call.
            unsafe { ffi::nvtxNameCategoryA(range_type.category(), name.as_ptr()) };
        }
    }
}

impl ProfilerBackend for NvtxBackend {
    fn name(&self) -> &'static str {
        "nvtx"
    }

    fn mark(&self, description: &str, color: Color) {
        let message = to_c_string(description);
        let attrs = EventAttributes::new(&message, RangeType::Unspecified, color);
        // SAFETY: `attrs` and the message it points to outlive the call.
        unsafe { ffi::nvtxMarkEx(attrs.as_ptr()) };
    }

    fn range_start(&self, description: &str, range_type: RangeType, color: Color) -> RangeHandle {
        let message = to_c_string(description);
        let attrs = EventAttributes::new(&message, range_type, color);
        // SAFETY: `attrs` and the message it points to outlive the call.
        let id: ffi::nvtxRangeId_t = unsafe { ffi::nvtxRangeStartEx(attrs.as_ptr()) };
        RangeHandle::from_raw(id)
    }

    fn range_end(&self, handle: RangeHandle) {
        let id: ffi::nvtxRangeId_t = handle.raw();
        // SAFETY: plain value argument; NVTX ignores ids it does not know.
        unsafe { ffi::nvtxRangeEnd(id) };
    }

    fn profiler_start(&self) -> NativeStatus {
        // SAFETY: no arguments; errors are reported through the status.
        unsafe { ffi::cudaProfilerStart() }
    }

    fn profiler_stop(&self) -> NativeStatus {
        // SAFETY: no arguments; errors are reported through the status.
        unsafe { ffi::cudaProfilerStop() }
    }

    fn name_os_thread(&self, thread: NativeThreadId, name: &str) {
        let name = to_c_string(name);
        // SAFETY: `name` is a valid NUL-terminated string for the duration of the call.
        unsafe { ffi::nvtxNameOsThreadA(thread.raw(), name.as_ptr()) };
    }

    #[cfg(any(unix, windows))]
    fn name_os_thread_wide(&self, thread: NativeThreadId, name: &WideName) {
        // SAFETY: `WideName` is always NUL-terminated and outlives the call.
        unsafe { ffi::nvtxNameOsThreadW(thread.raw(), name.as_ptr()) };
    }
}
