//! Native status codes returned by the profiler-control entry points.
//!
//! Values mirror `cudaError_t` from the CUDA runtime for the codes the
//! profiler-control calls can produce.

/// A native status code. Zero means success.
pub type NativeStatus = i32;

/// `cudaSuccess`.
pub const SUCCESS: NativeStatus = 0;
/// `cudaErrorInitializationError`.
pub const INITIALIZATION_ERROR: NativeStatus = 3;
/// `cudaErrorProfilerDisabled`.
pub const PROFILER_DISABLED: NativeStatus = 5;
/// `cudaErrorProfilerNotInitialized`.
pub const PROFILER_NOT_INITIALIZED: NativeStatus = 6;
/// `cudaErrorProfilerAlreadyStarted`.
pub const PROFILER_ALREADY_STARTED: NativeStatus = 7;
/// `cudaErrorProfilerAlreadyStopped`.
pub const PROFILER_ALREADY_STOPPED: NativeStatus = 8;
/// `cudaErrorInsufficientDriver`.
pub const INSUFFICIENT_DRIVER: NativeStatus = 35;
/// `cudaErrorNoDevice`.
pub const NO_DEVICE: NativeStatus = 100;

/// Symbolic name of a status code, if it is one we know.
pub fn status_name(code: NativeStatus) -> Option<&'static str> {
    Some(match code {
        SUCCESS => "cudaSuccess",
        INITIALIZATION_ERROR => "cudaErrorInitializationError",
        PROFILER_DISABLED => "cudaErrorProfilerDisabled",
        PROFILER_NOT_INITIALIZED => "cudaErrorProfilerNotInitialized",
        PROFILER_ALREADY_STARTED => "cudaErrorProfilerAlreadyStarted",
        PROFILER_ALREADY_STOPPED => "cudaErrorProfilerAlreadyStopped",
        INSUFFICIENT_DRIVER => "cudaErrorInsufficientDriver",
        NO_DEVICE => "cudaErrorNoDevice",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        assert_eq!(status_name(SUCCESS), Some("cudaSuccess"));
        assert_eq!(
            status_name(PROFILER_ALREADY_STOPPED),
            Some("cudaErrorProfilerAlreadyStopped")
        );
        assert_eq!(status_name(12345), None);
    }
}
