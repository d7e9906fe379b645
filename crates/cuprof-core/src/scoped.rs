//! Scoped range marker.

use crate::color::Color;
use crate::profiler::Profiler;
use crate::range::{RangeHandle, RangeType};

/// A range that lasts as long as this guard.
///
/// Created by [`Profiler::scoped_range`]. The range starts on creation and
/// ends exactly once when the guard is dropped, including during panic
/// unwinding. The guard is neither `Clone` nor `Copy`.
///
/// A guard created while the profiler is disabled is inactive and ends
/// nothing.
#[must_use = "the range ends as soon as the guard is dropped"]
pub struct ScopedRange<'a> {
    profiler: &'a Profiler,
    handle: Option<RangeHandle>,
}

impl<'a> ScopedRange<'a> {
    pub(crate) fn new(
        profiler: &'a Profiler,
        description: &str,
        range_type: RangeType,
        color: Color,
    ) -> Self {
        let handle = profiler.try_range_start(description, range_type, color);
        Self { profiler, handle }
    }

    /// Whether a range was actually started.
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Handle of the underlying range, if one was started.
    pub fn handle(&self) -> Option<RangeHandle> {
        self.handle
    }
}

impl Drop for ScopedRange<'_> {
    fn drop(&mut self) {
        // No way to ask the native library whether the handle is still open.
        if let Some(handle) = self.handle.take() {
            self.profiler.range_end(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordedCall, RecordingBackend};
    use std::sync::Arc;

    #[test]
    fn test_inactive_when_disabled() {
        let backend = Arc::new(RecordingBackend::new());
        let profiler = Profiler::new(backend.clone());
        profiler.set_enabled(false);
        {
            let range = profiler.scoped_range("off", RangeType::Kernel, Color::RED);
            assert!(!range.is_active());
            assert_eq!(range.handle(), None);
        }
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_guard_ends_range_once() {
        let backend = Arc::new(RecordingBackend::new());
        let profiler = Profiler::new(backend.clone());
        let handle = {
            let range = profiler.scoped_range("on", RangeType::Kernel, Color::RED);
            assert!(range.is_active());
            range.handle().unwrap()
        };
        let ends: Vec<_> = backend
            .calls()
            .into_iter()
            .filter(|c| matches!(c, RecordedCall::RangeEnd { .. }))
            .collect();
        assert_eq!(ends, vec![RecordedCall::RangeEnd { handle }]);
    }
}
