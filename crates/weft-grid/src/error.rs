//! Error types for grid construction.

use std::fmt;

/// Errors arising from grid construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The provided data length does not equal `width * height`.
    DimensionMismatch {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Length of the provided data.
        len: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { width, height, len } => write!(
                f,
                "{len} cells provided for a {width}x{height} grid"
            ),
        }
    }
}

impl std::error::Error for GridError {}
