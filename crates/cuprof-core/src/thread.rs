//! OS thread identifiers and wide-string names for thread naming.

use std::fmt;

use crate::error::Result;
#[cfg(not(any(unix, windows)))]
use crate::error::ProfilerError;

/// Native OS thread identifier, as the profiler's thread-naming calls take it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NativeThreadId(pub u32);

impl NativeThreadId {
    /// Identifier of the calling thread.
    ///
    /// Linux and Android report the kernel thread id, which is what the
    /// profiler's thread list shows. Other unix platforms report
    /// `pthread_self()` truncated to 32 bits. Windows reports
    /// `GetCurrentThreadId()`.
    pub fn current() -> Result<Self> {
        current_native_id().map(Self)
    }

    /// The raw identifier.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NativeThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn current_native_id() -> Result<u32> {
    // SAFETY: gettid takes no arguments and cannot fail.
    let tid = unsafe { libc::syscall(libc::SYS_gettid) };
    Ok(tid as u32)
}

#[cfg(all(unix, not(any(target_os = "linux", target_os = "android"))))]
fn current_native_id() -> Result<u32> {
    // SAFETY: pthread_self is always safe to call and cannot fail.
    let handle = unsafe { libc::pthread_self() };
    Ok(handle as usize as u32)
}

#[cfg(windows)]
fn current_native_id() -> Result<u32> {
    #[link(name = "kernel32")]
    extern "system" {
        fn GetCurrentThreadId() -> u32;
    }
    // SAFETY: GetCurrentThreadId has no preconditions.
    Ok(unsafe { GetCurrentThreadId() })
}

#[cfg(not(any(unix, windows)))]
fn current_native_id() -> Result<u32> {
    Err(ProfilerError::Unsupported(
        "native thread identifier on this platform",
    ))
}

/// Platform `wchar_t`.
#[cfg(unix)]
pub type WideChar = libc::wchar_t;

/// Platform `wchar_t`.
#[cfg(windows)]
pub type WideChar = u16;

/// NUL-terminated wide-string thread name.
///
/// UTF-32 on unix, UTF-16 on Windows. Input is cut at the first NUL, which
/// is where the native call would stop reading anyway.
#[cfg(any(unix, windows))]
#[derive(Clone, PartialEq, Eq)]
pub struct WideName {
    units: Vec<WideChar>,
}

#[cfg(any(unix, windows))]
impl WideName {
    /// Encode `name` into the platform wide encoding.
    pub fn new(name: &str) -> Self {
        let name = name.split('\0').next().unwrap_or_default();
        #[cfg(unix)]
        let mut units: Vec<WideChar> = name.chars().map(|c| c as u32 as WideChar).collect();
        #[cfg(windows)]
        let mut units: Vec<WideChar> = name.encode_utf16().collect();
        units.push(0);
        Self { units }
    }

    /// Code units without the terminating NUL.
    pub fn as_units(&self) -> &[WideChar] {
        &self.units[..self.units.len() - 1]
    }

    /// Code units including the terminating NUL.
    pub fn as_units_with_nul(&self) -> &[WideChar] {
        &self.units
    }

    /// Pointer suitable for a `const wchar_t*` parameter.
    pub fn as_ptr(&self) -> *const WideChar {
        self.units.as_ptr()
    }

    /// Decode back to a `String`, replacing invalid units.
    pub fn to_string_lossy(&self) -> String {
        #[cfg(unix)]
        {
            self.as_units()
                .iter()
                .map(|&u| char::from_u32(u as u32).unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect()
        }
        #[cfg(windows)]
        {
            String::from_utf16_lossy(self.as_units())
        }
    }
}

#[cfg(any(unix, windows))]
impl fmt::Debug for WideName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WideName").field(&self.to_string_lossy()).finish()
    }
}
