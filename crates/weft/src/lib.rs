//! Weft: 2D grid generation by constraint collapse.
//!
//! Weft generates grids whose cells locally satisfy adjacency
//! constraints, learned either from a sample grid (the *overlapping*
//! model) or declared as a tile set with neighbor rules (the
//! *simple-tiled* model). Generation repeatedly collapses the
//! lowest-entropy cell to a weighted-random unit and propagates the
//! consequences; a contradicted attempt is thrown away and retried on
//! the next seed, up to a per-sample budget.
//!
//! This is the facade crate: it re-exports the sub-crate APIs and hosts
//! the [`run()`] / [`run_parallel()`] entry points.
//!
//! # Quick start
//!
//! ```rust
//! use weft::prelude::*;
//!
//! // Two solid tiles that may only sit next to each other.
//! let tiles = vec![
//!     Tile::new("black", Grid::new(1, 1, Rgb::new(0, 0, 0)), Symmetry::X, 1.0),
//!     Tile::new("white", Grid::new(1, 1, Rgb::new(255, 255, 255)), Symmetry::X, 1.0),
//! ];
//! let rules = vec![NeighborRule::new("black", 0, "white", 0)];
//! let spec = ModelSpec::Tiled {
//!     tiles,
//!     rules,
//!     options: TiledOptions::default(),
//! };
//!
//! let output = weft::run(spec, &GeneratorOptions::new(4, 1)).unwrap();
//! let row = &output.grids[0];
//! assert_ne!(row.get(0, 0), row.get(1, 0));
//! ```
//!
//! # Modules
//!
//! Each module re-exports one sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `weft-core` | `UnitId`, `Rgb`, error enums |
//! | [`grid`] | `weft-grid` | `Grid<T>`, `Direction`, `EdgeBehavior` |
//! | [`model`] | `weft-model` | the two models, `Symmetry`, `Propagator` |
//! | [`solver`] | `weft-solver` | `Wave`, `Attempt`, `Generator`, reports |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use weft_core as types;
pub use weft_grid as grid;
pub use weft_model as model;
pub use weft_solver as solver;

mod parallel;
mod run;

pub use parallel::run_parallel;
pub use run::{run, ModelSpec, RunOutput};

/// The user-facing surface in one import.
pub mod prelude {
    pub use crate::{ModelSpec, RunOutput};
    pub use weft_core::{ConfigError, Rgb, RunError, UnitId};
    pub use weft_grid::{Direction, EdgeBehavior, Grid};
    pub use weft_model::{
        NeighborRule, OverlappingModel, OverlappingOptions, Propagator, Symmetry, Tile,
        TiledModel, TiledOptions,
    };
    pub use weft_solver::{
        Generator, GeneratorOptions, RunReport, SampleOutcome, SampleReport,
    };
}
