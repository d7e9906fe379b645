//! Native entry points in libnvToolsExt and libcudart.
//!
//! Libraries are linked by the build script.

#![allow(non_camel_case_types)]

use std::ffi::c_char;

use cuprof_core::RangeHandle;

use crate::attributes::RawEventAttributes;

/// `nvtxRangeId_t`.
pub type nvtxRangeId_t = u64;
/// `cudaError_t`.
pub type cudaError_t = i32;

// A range handle must be bit-for-bit a native range id.
const _: () = assert!(std::mem::size_of::<RangeHandle>() == std::mem::size_of::<nvtxRangeId_t>());
const _: () = assert!(std::mem::align_of::<RangeHandle>() == std::mem::align_of::<nvtxRangeId_t>());

extern "C" {
    pub fn nvtxMarkEx(event_attrib: *const RawEventAttributes);
    pub fn nvtxRangeStartEx(event_attrib: *const RawEventAttributes) -> nvtxRangeId_t;
    pub fn nvtxRangeEnd(id: nvtxRangeId_t);
    pub fn nvtxNameCategoryA(category: u32, name: *const c_char);
    pub fn nvtxNameOsThreadA(thread_id: u32, name: *const c_char);
    #[cfg(any(unix, windows))]
    pub fn nvtxNameOsThreadW(thread_id: u32, name: *const cuprof_core::WideChar);

    pub fn cudaProfilerStart() -> cudaError_t;
    pub fn cudaProfilerStop() -> cudaError_t;
}
