//! Range types and handles.

use std::fmt;

/// Kind of interval a range annotates.
///
/// Forwarded to the profiler as the event category, so ranges of the same
/// type group together in the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum RangeType {
    /// No particular kind.
    #[default]
    Unspecified = 0,
    /// Kernel execution.
    Kernel = 1,
    /// Host/device transfer over PCI Express.
    PciExpressTransfer = 2,
}

impl RangeType {
    /// All range types, in category order.
    pub const ALL: [RangeType; 3] = [
        RangeType::Unspecified,
        RangeType::Kernel,
        RangeType::PciExpressTransfer,
    ];

    /// Category id used for this type.
    pub const fn category(self) -> u32 {
        self as u32
    }

    /// Human-readable category name.
    pub const fn name(self) -> &'static str {
        match self {
            RangeType::Unspecified => "Unspecified",
            RangeType::Kernel => "Kernel",
            RangeType::PciExpressTransfer => "PCIe Transfer",
        }
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque token returned by a range start and consumed by its range end.
///
/// Same width and representation as the native range id. Nothing checks
/// where a handle came from or how many times it is ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct RangeHandle(u64);

impl RangeHandle {
    /// Handle returned when no range was started (profiler disabled or no
    /// tool attached).
    pub const NONE: Self = Self(0);

    /// Wrap a raw native range id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw native range id.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether this is [`RangeHandle::NONE`].
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RangeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "range#{}", self.0)
    }
}

const _: () = assert!(std::mem::size_of::<RangeHandle>() == std::mem::size_of::<u64>());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_type_categories() {
        assert_eq!(RangeType::Unspecified.category(), 0);
        assert_eq!(RangeType::Kernel.category(), 1);
        assert_eq!(RangeType::PciExpressTransfer.category(), 2);
        assert_eq!(RangeType::default(), RangeType::Unspecified);
    }

    #[test]
    fn test_range_handle_raw() {
        let handle = RangeHandle::from_raw(0xDEAD_BEEF_0000_0001);
        assert_eq!(handle.raw(), 0xDEAD_BEEF_0000_0001);
        assert!(!handle.is_none());
        assert!(RangeHandle::NONE.is_none());
        assert_eq!(handle.to_string(), format!("range#{}", 0xDEAD_BEEF_0000_0001u64));
    }
}
