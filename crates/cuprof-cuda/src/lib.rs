//! NVTX / CUDA backend for cuprof
//!
//! This crate forwards cuprof markers, ranges and thread names to NVTX and
//! capture-session control to the CUDA runtime profiler API, so they show
//! up in Nsight Systems and Nsight Compute.
//!
//! # Requirements
//!
//! - The `cuda` feature
//! - CUDA Toolkit with libnvToolsExt and libcudart
//!   (`CUDA_PATH` / `CUDA_HOME` point the build at it)
//!
//! Without the `cuda` feature [`NvtxBackend::new`] and [`init`] fail with
//! [`ProfilerError::BackendUnavailable`](cuprof_core::ProfilerError::BackendUnavailable).
//!
//! # Example
//!
//! ```ignore
//! use cuprof_core::{mark, Color, RangeType};
//!
//! cuprof_cuda::init()?;
//! cuprof_core::name_this_thread("main")?;
//! cuprof_core::start()?;
//! {
//!     let _range = mark::scoped_range("kernel-launch", RangeType::Kernel, Color::CYAN);
//!     // ... launch ...
//! }
//! cuprof_core::stop()?;
//! ```

#![warn(missing_docs)]

pub mod attributes;
#[cfg(feature = "cuda")]
mod ffi;
#[cfg(feature = "cuda")]
mod nvtx;

#[cfg(feature = "cuda")]
pub use nvtx::NvtxBackend;

use std::sync::Arc;

use cuprof_core::{Profiler, Result};

/// Install the NVTX backend as the process-wide profiler.
///
/// The configuration is read from the environment; see
/// [`cuprof_core::config`].
pub fn init() -> Result<&'static Profiler> {
    let backend = NvtxBackend::new().map_err(|e| {
        tracing::warn!(error = %e, "NVTX backend unavailable");
        e
    })?;
    cuprof_core::init_global(Arc::new(backend))
}

// Placeholder implementation when CUDA is not available
#[cfg(not(feature = "cuda"))]
mod stub {
    use cuprof_core::{
        Color, NativeStatus, NativeThreadId, ProfilerBackend, ProfilerError, RangeHandle,
        RangeType, Result,
    };

    /// Stub NVTX backend when the `cuda` feature is disabled.
    #[derive(Debug)]
    pub struct NvtxBackend {
        _private: (),
    }

    impl NvtxBackend {
        /// Create fails when CUDA is not available.
        pub fn new() -> Result<Self> {
            Err(ProfilerError::BackendUnavailable(
                "cuprof-cuda built without the `cuda` feature".to_string(),
            ))
        }
    }

    impl ProfilerBackend for NvtxBackend {
        fn name(&self) -> &'static str {
            "nvtx (stub)"
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
            cuprof_core::status::PROFILER_DISABLED
        }

        fn profiler_stop(&self) -> NativeStatus {
            cuprof_core::status::PROFILER_DISABLED
        }

        fn name_os_thread(&self, _thread: NativeThreadId, _name: &str) {}

        #[cfg(any(unix, windows))]
        fn name_os_thread_wide(&self, _thread: NativeThreadId, _name: &cuprof_core::WideName) {}
    }
}

#[cfg(not(feature = "cuda"))]
pub use stub::NvtxBackend;
