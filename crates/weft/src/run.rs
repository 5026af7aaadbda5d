//! The single run entry point.

use std::hash::Hash;
use weft_core::{ConfigError, RunError, UnitId};
use weft_grid::Grid;
use weft_model::{
    NeighborRule, OverlappingModel, OverlappingOptions, Propagator, Tile, TiledModel,
    TiledOptions,
};
use weft_solver::{Generator, GeneratorOptions, RunReport};

/// Which model to build, with its inputs.
///
/// A closed selector: there is no invalid model kind to reject at
/// run time.
#[derive(Clone, Debug)]
pub enum ModelSpec<T> {
    /// Learn patterns from a sample grid.
    Overlapping {
        /// The grid to extract N×N patterns from.
        sample: Grid<T>,
        /// Extraction options.
        options: OverlappingOptions,
    },
    /// Expand a declared tile set.
    Tiled {
        /// The declared tiles.
        tiles: Vec<Tile<T>>,
        /// Declared horizontal adjacencies, expanded through each
        /// tile's symmetry group.
        rules: Vec<NeighborRule>,
        /// Tile-model options.
        options: TiledOptions,
    },
}

/// A successful run: the generated grids plus the run's metrics.
///
/// `grids` holds one grid per *successful* sample, in sample order; a
/// sample that exhausted its retries is simply absent, with the
/// exhaustion recorded in `report`.
#[derive(Clone, Debug)]
pub struct RunOutput<T> {
    /// The generated value grids. For the overlapping model each grid
    /// is exactly the requested size; for the tiled model each cell
    /// becomes a `tile_size` square block.
    pub grids: Vec<Grid<T>>,
    /// Wall-time and per-sample outcome metrics.
    pub report: RunReport,
}

/// A built model of either kind, ready to drive the generator.
pub(crate) enum Model<T> {
    Overlapping(OverlappingModel<T>),
    Tiled(TiledModel<T>),
}

impl<T: Clone + Eq + Hash> Model<T> {
    pub(crate) fn build(spec: ModelSpec<T>) -> Result<Self, ConfigError> {
        match spec {
            ModelSpec::Overlapping { sample, options } => {
                Ok(Self::Overlapping(OverlappingModel::new(&sample, &options)?))
            }
            ModelSpec::Tiled {
                tiles,
                rules,
                options,
            } => Ok(Self::Tiled(TiledModel::new(tiles, &rules, &options)?)),
        }
    }

    pub(crate) fn propagator(&self) -> &Propagator {
        match self {
            Self::Overlapping(m) => m.propagator(),
            Self::Tiled(m) => m.propagator(),
        }
    }

    pub(crate) fn weights(&self) -> &[f64] {
        match self {
            Self::Overlapping(m) => m.weights(),
            Self::Tiled(m) => m.weights(),
        }
    }

    pub(crate) fn ground(&self) -> Option<UnitId> {
        match self {
            Self::Overlapping(m) => m.ground(),
            Self::Tiled(_) => None,
        }
    }

    pub(crate) fn materialize(&self, cells: &Grid<UnitId>) -> Grid<T> {
        match self {
            Self::Overlapping(m) => m.materialize(cells),
            Self::Tiled(m) => m.materialize(cells),
        }
    }
}

/// Build the model once, generate every requested sample sequentially,
/// and materialize the successful unit grids into value grids.
///
/// # Errors
///
/// [`RunError::Config`] for malformed inputs (no attempt is made), or
/// [`RunError::AllSamplesFailed`] when every sample exhausted its
/// retry budget.
pub fn run<T: Clone + Eq + Hash>(
    spec: ModelSpec<T>,
    options: &GeneratorOptions,
) -> Result<RunOutput<T>, RunError> {
    let model = Model::build(spec)?;
    let generator = Generator::new(
        model.propagator(),
        model.weights(),
        model.ground(),
        options.clone(),
    )?;
    let (unit_grids, report) = generator.generate()?;
    Ok(RunOutput {
        grids: unit_grids.iter().map(|g| model.materialize(g)).collect(),
        report,
    })
}
