//! Unit-alphabet models for the Weft generation engine.
//!
//! A model turns raw input into three things the solver consumes:
//!
//! 1. a finite alphabet of **units** (indexed by
//!    [`UnitId`](weft_core::UnitId)) with per-unit selection weights,
//! 2. a [`Propagator`]: the immutable `(unit, direction)` compatibility
//!    table,
//! 3. a way to **materialize** a grid of decided units back into cell
//!    values.
//!
//! Two models are provided: [`OverlappingModel`] extracts N×N patterns
//! from a sample grid, [`TiledModel`] expands a declared tile set through
//! its symmetry classes. Both are built once per configuration, are
//! immutable afterwards, and are shared read-only across every attempt
//! and sample of a run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod overlapping;
pub mod propagator;
pub mod symmetry;
pub mod tiled;

pub use overlapping::{OverlappingModel, OverlappingOptions};
pub use propagator::Propagator;
pub use symmetry::Symmetry;
pub use tiled::{NeighborRule, Tile, TiledModel, TiledOptions};
