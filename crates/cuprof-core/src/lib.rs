//! # cuprof core
//!
//! Markers, ranges, capture-session control and OS-thread naming for
//! NVTX-style GPU profilers, independent of the native library.
//!
//! ## Core abstractions
//!
//! - [`ProfilerBackend`] - the native library seam
//! - [`Profiler`] - lock-serialized front end over a backend
//! - [`ScopedRange`] - range tied to a guard's lifetime
//! - [`Color`], [`RangeType`], [`RangeHandle`] - annotation attributes
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use cuprof_core::prelude::*;
//!
//! let profiler = Profiler::new(Arc::new(NullBackend));
//! profiler.point("checkpoint", Color::GREEN);
//! {
//!     let _range = profiler.scoped_range("kernel-launch", RangeType::Kernel, Color::CYAN);
//!     // ... launch ...
//! }
//! profiler.start()?;
//! profiler.stop()?;
//! # Ok::<(), cuprof_core::ProfilerError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod global;
pub mod profiler;
pub mod range;
pub mod recording;
pub mod scoped;
pub mod status;
pub mod thread;

/// Common imports.
pub mod prelude {
    pub use crate::backend::{NullBackend, ProfilerBackend};
    pub use crate::color::Color;
    pub use crate::config::{LockPolicy, ProfilerConfig};
    pub use crate::error::{ProfilerError, Result};
    pub use crate::profiler::Profiler;
    pub use crate::range::{RangeHandle, RangeType};
    pub use crate::scoped::ScopedRange;
    pub use crate::thread::NativeThreadId;
}

pub use backend::{NullBackend, ProfilerBackend};
pub use color::Color;
pub use config::{LockPolicy, ProfilerConfig, ProfilerConfigBuilder};
pub use error::{check_status, ProfilerError, Result};
pub use global::{
    global, init_global, mark, name_host_thread, name_host_thread_wide, name_this_thread, start,
    stop,
};
pub use profiler::{Profiler, START_ACTION};
pub use range::{RangeHandle, RangeType};
pub use recording::{RecordedCall, RecordingBackend};
pub use scoped::ScopedRange;
pub use status::NativeStatus;
pub use thread::NativeThreadId;
#[cfg(any(unix, windows))]
pub use thread::{WideChar, WideName};
