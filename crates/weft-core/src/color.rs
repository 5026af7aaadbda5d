//! RGB color value type.

use std::fmt;

/// An 8-bit-per-channel RGB color.
///
/// The cell value type used by image-backed generation: sample pixels in,
/// generated pixels out. The engine itself is generic over the cell value
/// type; `Rgb` is what bindings that deal in images use.
///
/// Derives `Eq` and `Hash` because the overlapping model deduplicates
/// patterns by exact cell-wise equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Construct a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}
