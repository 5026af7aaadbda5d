//! Error types for the Weft generation engine.
//!
//! Two fatal error enums cover the whole engine: [`ConfigError`] for
//! malformed inputs rejected before any generation attempt starts, and
//! [`RunError`] for a run that produced no output at all. Contradictions
//! and per-sample retry exhaustion are deliberately *not* errors — they
//! are ordinary outcomes handled by the retry loop and reported through
//! the run report.

use std::error::Error;
use std::fmt;

/// Fatal configuration errors, detected before the first attempt.
///
/// Construction of a model or generator validates its inputs eagerly;
/// any of these variants means no generation work was started.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The overlapping model's input sample has zero area.
    EmptySample,
    /// The simple-tiled model was given no tiles.
    EmptyTileSet,
    /// The requested output grid has zero area.
    EmptyOutput {
        /// Requested output width.
        width: u32,
        /// Requested output height.
        height: u32,
    },
    /// Zero samples were requested.
    ZeroSamples,
    /// The retry budget is zero, so no attempt could ever run.
    ZeroRetryBudget,
    /// The pattern size is zero or exceeds a sample dimension.
    InvalidPatternSize {
        /// Requested N.
        pattern_size: u32,
        /// Input sample width.
        sample_width: u32,
        /// Input sample height.
        sample_height: u32,
    },
    /// The overlapping symmetry count is outside `1..=8`.
    InvalidSymmetryCount {
        /// The rejected count.
        symmetry: u32,
    },
    /// A symmetry class name did not match any known class.
    UnknownSymmetry {
        /// The rejected name.
        name: String,
    },
    /// A tile image is not square.
    NonSquareTile {
        /// Name of the offending tile.
        name: String,
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
    /// A tile image has zero area.
    EmptyTile {
        /// Name of the offending tile.
        name: String,
    },
    /// A tile's side length differs from the tile set's.
    TileSizeMismatch {
        /// Name of the offending tile.
        name: String,
        /// The tile's side length.
        size: u32,
        /// The side length established by the first tile.
        expected: u32,
    },
    /// Two tiles share a name.
    DuplicateTile {
        /// The duplicated name.
        name: String,
    },
    /// A neighbor rule references an orientation the tile does not have.
    InvalidOrientation {
        /// Name of the tile.
        tile: String,
        /// The rejected orientation index.
        orientation: u32,
        /// Number of orientations the tile's symmetry class yields.
        count: u32,
    },
    /// A tile weight is not finite and positive.
    InvalidWeight {
        /// Name of the offending tile.
        name: String,
        /// The rejected weight.
        weight: f64,
    },
    /// A neighbor rule references an undeclared tile (strict mode only).
    UnknownTile {
        /// The unresolved name.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySample => write!(f, "input sample has zero area"),
            Self::EmptyTileSet => write!(f, "tile set is empty"),
            Self::EmptyOutput { width, height } => {
                write!(f, "output grid {width}x{height} has zero area")
            }
            Self::ZeroSamples => write!(f, "zero samples requested"),
            Self::ZeroRetryBudget => write!(f, "retry budget is zero"),
            Self::InvalidPatternSize {
                pattern_size,
                sample_width,
                sample_height,
            } => write!(
                f,
                "pattern size {pattern_size} invalid for {sample_width}x{sample_height} sample"
            ),
            Self::InvalidSymmetryCount { symmetry } => {
                write!(f, "symmetry count {symmetry} outside 1..=8")
            }
            Self::UnknownSymmetry { name } => {
                write!(f, "'{name}' is not a symmetry class")
            }
            Self::NonSquareTile {
                name,
                width,
                height,
            } => write!(f, "tile '{name}' is {width}x{height}, expected square"),
            Self::EmptyTile { name } => write!(f, "tile '{name}' has zero area"),
            Self::TileSizeMismatch {
                name,
                size,
                expected,
            } => write!(
                f,
                "tile '{name}' has side {size}, tile set uses {expected}"
            ),
            Self::DuplicateTile { name } => write!(f, "tile '{name}' declared twice"),
            Self::InvalidOrientation {
                tile,
                orientation,
                count,
            } => write!(
                f,
                "orientation {orientation} out of range for tile '{tile}' ({count} orientations)"
            ),
            Self::InvalidWeight { name, weight } => {
                write!(f, "tile '{name}' has invalid weight {weight}")
            }
            Self::UnknownTile { name } => {
                write!(f, "neighbor rule references unknown tile '{name}'")
            }
        }
    }
}

impl Error for ConfigError {}

/// Fatal run errors: the run produced no output grids.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The configuration was rejected before any attempt.
    Config(ConfigError),
    /// Every requested sample exhausted its retry budget.
    AllSamplesFailed {
        /// Number of samples that were requested (and all failed).
        samples: u32,
        /// Attempts that were made per sample before giving up.
        retry_budget: u32,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::AllSamplesFailed {
                samples,
                retry_budget,
            } => write!(
                f,
                "all {samples} samples failed after {retry_budget} attempts each"
            ),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::AllSamplesFailed { .. } => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
