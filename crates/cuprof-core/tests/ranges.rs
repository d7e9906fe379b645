//! Integration tests for range pairing and scoped ranges.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use cuprof_core::prelude::*;
use cuprof_core::{RecordedCall, RecordingBackend};

fn recording() -> (Arc<RecordingBackend>, Profiler) {
    let backend = Arc::new(RecordingBackend::new());
    let profiler = Profiler::new(backend.clone());
    (backend, profiler)
}

fn started_handles(calls: &[RecordedCall]) -> Vec<RangeHandle> {
    calls
        .iter()
        .filter_map(|c| match c {
            RecordedCall::RangeStart { handle, .. } => Some(*handle),
            _ => None,
        })
        .collect()
}

fn ended_handles(calls: &[RecordedCall]) -> Vec<RangeHandle> {
    calls
        .iter()
        .filter_map(|c| match c {
            RecordedCall::RangeEnd { handle } => Some(*handle),
            _ => None,
        })
        .collect()
}

/// Test the kernel-launch scenario: one start, one end, matching handle.
#[test]
fn test_scoped_kernel_launch() {
    let (backend, profiler) = recording();
    let color = Color::from_argb(0xFF12_3456);

    {
        let _range = profiler.scoped_range("kernel-launch", RangeType::Kernel, color);
    }

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    let handle = match &calls[0] {
        RecordedCall::RangeStart {
            description,
            range_type,
            color: c,
            handle,
        } => {
            assert_eq!(description, "kernel-launch");
            assert_eq!(*range_type, RangeType::Kernel);
            assert_eq!(*c, color);
            *handle
        }
        other => panic!("expected range start, got {other:?}"),
    };
    assert_eq!(calls[1], RecordedCall::RangeEnd { handle });
}

/// Test that sequential ranges end with their own handles.
#[test]
fn test_sequential_ranges_preserve_handles() {
    let (backend, profiler) = recording();

    let mut handles = Vec::new();
    for i in 0..5 {
        let handle =
            profiler.range_start(&format!("step-{i}"), RangeType::Unspecified, Color::BLUE);
        profiler.range_end(handle);
        handles.push(handle);
    }

    let calls = backend.calls();
    assert_eq!(started_handles(&calls), handles);
    assert_eq!(ended_handles(&calls), handles);
}

/// Test that nested ranges end in reverse order with matching handles.
#[test]
fn test_nested_ranges_preserve_handles() {
    let (backend, profiler) = recording();

    let outer = profiler.range_start("outer", RangeType::Unspecified, Color::RED);
    let middle = profiler.range_start("middle", RangeType::Kernel, Color::GREEN);
    let inner = profiler.range_start("inner", RangeType::PciExpressTransfer, Color::BLUE);
    profiler.range_end(inner);
    profiler.range_end(middle);
    profiler.range_end(outer);

    let calls = backend.calls();
    assert_eq!(started_handles(&calls), vec![outer, middle, inner]);
    assert_eq!(ended_handles(&calls), vec![inner, middle, outer]);
}

/// Test that nested scoped ranges close innermost first.
#[test]
fn test_nested_scoped_ranges() {
    let (backend, profiler) = recording();

    let (outer, inner) = {
        let outer = profiler.scoped_range("outer", RangeType::Unspecified, Color::RED);
        let inner = {
            let inner = profiler.scoped_range("inner", RangeType::Kernel, Color::GREEN);
            inner.handle().unwrap()
        };
        (outer.handle().unwrap(), inner)
    };

    assert_eq!(ended_handles(&backend.calls()), vec![inner, outer]);
}

/// Test that a panic inside the scope still ends the range exactly once.
#[test]
fn test_scoped_range_ends_on_panic() {
    let (backend, profiler) = recording();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _range = profiler.scoped_range("doomed", RangeType::Kernel, Color::MAGENTA);
        panic!("kernel failed");
    }));
    assert!(result.is_err());

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], RecordedCall::RangeStart { .. }));
    assert_eq!(ended_handles(&calls), started_handles(&calls));
}

/// Test that an early `?` return still ends the range exactly once.
#[test]
fn test_scoped_range_ends_on_error_return() {
    let (backend, profiler) = recording();

    fn fallible() -> Result<()> {
        Err(ProfilerError::Unsupported("simulated failure"))
    }

    fn guarded(profiler: &Profiler) -> Result<()> {
        let _range = profiler.scoped_range("fallible", RangeType::Unspecified, Color::YELLOW);
        fallible()?;
        profiler.point("unreachable", Color::RED);
        Ok(())
    }

    assert!(guarded(&profiler).is_err());

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(ended_handles(&calls), started_handles(&calls));
}

/// Test that moving a guard does not duplicate the end call.
#[test]
fn test_moved_scoped_range_ends_once() {
    let (backend, profiler) = recording();

    let guard = profiler.scoped_range("moved", RangeType::Unspecified, Color::WHITE);
    let boxed = Box::new(guard);
    drop(boxed);

    assert_eq!(ended_handles(&backend.calls()).len(), 1);
}
