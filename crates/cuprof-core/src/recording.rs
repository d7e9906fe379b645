//! A backend that records every call, for tests and dry runs.
//!
//! ```
//! use std::sync::Arc;
//! use cuprof_core::{Color, Profiler, RangeType, RecordedCall, RecordingBackend};
//!
//! let backend = Arc::new(RecordingBackend::new());
//! let profiler = Profiler::new(backend.clone());
//! {
//!     let _range = profiler.scoped_range("kernel-launch", RangeType::Kernel, Color::CYAN);
//! }
//! assert_eq!(backend.calls().len(), 2);
//! assert!(matches!(backend.calls()[1], RecordedCall::RangeEnd { .. }));
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::backend::ProfilerBackend;
use crate::color::Color;
use crate::range::{RangeHandle, RangeType};
use crate::status::{self, NativeStatus};
use crate::thread::NativeThreadId;
#[cfg(any(unix, windows))]
use crate::thread::{WideChar, WideName};

/// One call observed by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// A point marker.
    Mark {
        /// Marker text.
        description: String,
        /// Marker color.
        color: Color,
    },
    /// A range start, with the handle that was handed out.
    RangeStart {
        /// Range text.
        description: String,
        /// Range type.
        range_type: RangeType,
        /// Range color.
        color: Color,
        /// Handle returned to the caller.
        handle: RangeHandle,
    },
    /// A range end.
    RangeEnd {
        /// Handle passed in by the caller.
        handle: RangeHandle,
    },
    /// A session start, with the status that was returned.
    ProfilerStart {
        /// Returned status.
        status: NativeStatus,
    },
    /// A session stop, with the status that was returned.
    ProfilerStop {
        /// Returned status.
        status: NativeStatus,
    },
    /// A narrow thread name.
    NameThread {
        /// Target thread.
        thread: NativeThreadId,
        /// Name bytes exactly as received.
        name: Vec<u8>,
    },
    /// A wide thread name.
    #[cfg(any(unix, windows))]
    NameThreadWide {
        /// Target thread.
        thread: NativeThreadId,
        /// Code units without the terminating NUL.
        name: Vec<WideChar>,
    },
}

/// Records calls in order and models a single capture session.
///
/// Handles are handed out starting at 1. Starting an active session
/// reports `PROFILER_ALREADY_STARTED`; stopping an inactive one reports
/// `PROFILER_ALREADY_STOPPED`.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<RecordedCall>>,
    next_handle: AtomicU64,
    session_active: AtomicBool,
    injected_failure: Mutex<Option<NativeStatus>>,
    call_delay: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingBackend {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Forget all recorded calls. Session state is kept.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    /// Whether a capture session is active.
    pub fn session_active(&self) -> bool {
        self.session_active.load(Ordering::SeqCst)
    }

    /// Make the next `profiler_start` or `profiler_stop` return `code`.
    pub fn fail_next(&self, code: NativeStatus) {
        *self.injected_failure.lock() = Some(code);
    }

    /// Sleep for `delay` inside every call. Widens race windows in tests.
    pub fn set_call_delay(&self, delay: Option<Duration>) {
        *self.call_delay.lock() = delay;
    }

    /// Highest number of calls that were ever inside the backend at once.
    pub fn max_concurrent_calls(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: RecordedCall) {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let delay = *self.call_delay.lock();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        self.calls.lock().push(call);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn take_failure(&self) -> Option<NativeStatus> {
        self.injected_failure.lock().take()
    }
}

impl ProfilerBackend for RecordingBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn mark(&self, description: &str, color: Color) {
        self.record(RecordedCall::Mark {
            description: description.to_owned(),
            color,
        });
    }

    fn range_start(&self, description: &str, range_type: RangeType, color: Color) -> RangeHandle {
        let handle = RangeHandle::from_raw(self.next_handle.fetch_add(1, Ordering::SeqCst) + 1);
        self.record(RecordedCall::RangeStart {
            description: description.to_owned(),
            range_type,
            color,
            handle,
        });
        handle
    }

    fn range_end(&self, handle: RangeHandle) {
        self.record(RecordedCall::RangeEnd { handle });
    }

    fn profiler_start(&self) -> NativeStatus {
        let status = match self.take_failure() {
            Some(code) => code,
            None if self.session_active.swap(true, Ordering::SeqCst) => {
                status::PROFILER_ALREADY_STARTED
            }
            None => status::SUCCESS,
        };
        self.record(RecordedCall::ProfilerStart { status });
        status
    }

    fn profiler_stop(&self) -> NativeStatus {
        let status = match self.take_failure() {
            Some(code) => code,
            None if self.session_active.swap(false, Ordering::SeqCst) => status::SUCCESS,
            None => status::PROFILER_ALREADY_STOPPED,
        };
        self.record(RecordedCall::ProfilerStop { status });
        status
    }

    fn name_os_thread(&self, thread: NativeThreadId, name: &str) {
        self.record(RecordedCall::NameThread {
            thread,
            name: name.as_bytes().to_vec(),
        });
    }

    #[cfg(any(unix, windows))]
    fn name_os_thread_wide(&self, thread: NativeThreadId, name: &WideName) {
        self.record(RecordedCall::NameThreadWide {
            thread,
            name: name.as_units().to_vec(),
        });
    }
}
