//! NVTX event attribute structure.
//!
//! Layout-compatible with `nvtxEventAttributes_t` (v2) from `nvToolsExt.h`.

use std::ffi::{c_char, CStr, CString};
use std::marker::PhantomData;
use std::mem;

use cuprof_core::{Color, RangeType};

/// `NVTX_VERSION` understood by libnvToolsExt.
pub const NVTX_VERSION: u16 = 2;
/// `NVTX_EVENT_ATTRIB_STRUCT_SIZE`.
pub const NVTX_EVENT_ATTRIB_STRUCT_SIZE: u16 = mem::size_of::<RawEventAttributes>() as u16;
/// `NVTX_COLOR_ARGB`.
pub const NVTX_COLOR_ARGB: i32 = 1;
/// `NVTX_PAYLOAD_UNKNOWN`.
pub const NVTX_PAYLOAD_UNKNOWN: i32 = 0;
/// `NVTX_MESSAGE_TYPE_ASCII`.
pub const NVTX_MESSAGE_TYPE_ASCII: i32 = 1;

/// Raw `nvtxEventAttributes_t`.
///
/// The payload and message unions are represented by their widest member.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
#[allow(non_snake_case, missing_docs)]
pub struct RawEventAttributes {
    pub version: u16,
    pub size: u16,
    pub category: u32,
    pub colorType: i32,
    pub color: u32,
    pub payloadType: i32,
    pub reserved0: i32,
    pub payload: u64,
    pub messageType: i32,
    pub message: *const c_char,
}

#[cfg(target_pointer_width = "64")]
const _: () = assert!(mem::size_of::<RawEventAttributes>() == 48);

/// Event attributes borrowing their message text.
///
/// The raw struct points into `message`, so it cannot outlive it.
pub struct EventAttributes<'a> {
    raw: RawEventAttributes,
    _message: PhantomData<&'a CStr>,
}

impl<'a> EventAttributes<'a> {
    /// ASCII message, ARGB color and the category of `range_type`.
    pub fn new(message: &'a CStr, range_type: RangeType, color: Color) -> Self {
        Self {
            raw: RawEventAttributes {
                version: NVTX_VERSION,
                size: NVTX_EVENT_ATTRIB_STRUCT_SIZE,
                category: range_type.category(),
                colorType: NVTX_COLOR_ARGB,
                color: color.argb(),
                payloadType: NVTX_PAYLOAD_UNKNOWN,
                reserved0: 0,
                payload: 0,
                messageType: NVTX_MESSAGE_TYPE_ASCII,
                message: message.as_ptr(),
            },
            _message: PhantomData,
        }
    }

    /// Pointer for the native `*Ex` calls.
    pub fn as_ptr(&self) -> *const RawEventAttributes {
        &self.raw
    }

    /// The raw struct.
    pub fn raw(&self) -> &RawEventAttributes {
        &self.raw
    }
}

/// C copy of `text`, cut at the first NUL.
///
/// The native side would stop reading there, so this keeps `c_str()`
/// semantics instead of failing.
pub fn to_c_string(text: &str) -> CString {
    let bytes = text.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    CString::new(&bytes[..end]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_fields() {
        let message = to_c_string("kernel-launch");
        let color = Color::from_argb(0x80FF_8040);
        let attrs = EventAttributes::new(&message, RangeType::Kernel, color);
        let raw = attrs.raw();

        assert_eq!(raw.version, NVTX_VERSION);
        assert_eq!(raw.size as usize, mem::size_of::<RawEventAttributes>());
        assert_eq!(raw.category, 1);
        assert_eq!(raw.colorType, NVTX_COLOR_ARGB);
        assert_eq!(raw.color, 0x80FF_8040);
        assert_eq!(raw.payloadType, NVTX_PAYLOAD_UNKNOWN);
        assert_eq!(raw.messageType, NVTX_MESSAGE_TYPE_ASCII);
        assert_eq!(raw.message, message.as_ptr());
        assert_eq!(attrs.as_ptr(), raw as *const RawEventAttributes);
    }

    #[test]
    fn test_message_pointer_reads_back() {
        let message = to_c_string("transfer");
        let attrs = EventAttributes::new(&message, RangeType::PciExpressTransfer, Color::BLUE);
        // SAFETY: the pointer comes from `message`, which is still alive.
        let text = unsafe { CStr::from_ptr(attrs.raw().message) };
        assert_eq!(text.to_str().unwrap(), "transfer");
        assert_eq!(attrs.raw().category, 2);
    }

    #[test]
    fn test_to_c_string() {
        assert_eq!(to_c_string("plain").as_bytes(), b"plain");
        assert_eq!(to_c_string("cut\0here").as_bytes(), b"cut");
        assert_eq!(to_c_string("").as_bytes(), b"");
        assert_eq!(to_c_string("ünï").as_bytes(), "ünï".as_bytes());
    }
}
