//! Dense 2D grid container and boundary topology for Weft.
//!
//! [`Grid<T>`] is the fixed-size container every other component works
//! with: the input sample, the per-cell unit assignment, and the
//! generated output. [`Direction`] enumerates the four axis-aligned
//! neighbour offsets, and [`EdgeBehavior`] decides what happens when a
//! neighbour lookup crosses the boundary:
//!
//! - [`EdgeBehavior::Wrap`]: periodic boundary (torus topology)
//! - [`EdgeBehavior::Absorb`]: out-of-bounds neighbours are omitted, so
//!   edge cells simply have fewer constrained neighbours

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod edge;
pub mod error;
pub mod grid;

pub use direction::Direction;
pub use edge::EdgeBehavior;
pub use error::GridError;
pub use grid::Grid;
