//! Packed ARGB marker colors.

use std::fmt;

/// Marker color, packed as `0xAARRGGBB`.
///
/// The packed value is handed to the native annotation call untouched, so
/// `Color::from_argb(x).argb() == x` for every `x`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Color(u32);

impl Color {
    /// Opaque black. This is the default marker color.
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    /// Red color.
    pub const RED: Self = Self::from_rgb(255, 0, 0);
    /// Green color.
    pub const GREEN: Self = Self::from_rgb(0, 255, 0);
    /// Blue color.
    pub const BLUE: Self = Self::from_rgb(0, 0, 255);
    /// Yellow color.
    pub const YELLOW: Self = Self::from_rgb(255, 255, 0);
    /// Cyan color.
    pub const CYAN: Self = Self::from_rgb(0, 255, 255);
    /// Magenta color.
    pub const MAGENTA: Self = Self::from_rgb(255, 0, 255);
    /// Orange color.
    pub const ORANGE: Self = Self::from_rgb(255, 165, 0);

    /// Wrap an already packed ARGB value.
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Build an opaque color from its components.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_components(255, r, g, b)
    }

    /// Build a color from all four components.
    pub const fn from_components(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Parse `RRGGBB` or `AARRGGBB`, optionally prefixed by `#` or `0x`.
    ///
    /// Six-digit input is treated as opaque.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex
            .strip_prefix('#')
            .or_else(|| hex.strip_prefix("0x"))
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self(0xFF00_0000 | value)),
            8 => Some(Self(value)),
            _ => None,
        }
    }

    /// The packed ARGB value.
    pub const fn argb(self) -> u32 {
        self.0
    }

    /// Alpha component.
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red component.
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green component.
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue component.
    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:08X})", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}
