//! The overlapping model: N×N pattern extraction from a sample grid.

use crate::propagator::Propagator;
use indexmap::IndexMap;
use std::hash::Hash;
use weft_core::{ConfigError, UnitId};
use weft_grid::{Direction, EdgeBehavior, Grid};

/// Construction options for [`OverlappingModel`].
#[derive(Clone, Copy, Debug)]
pub struct OverlappingOptions {
    /// Side length N of the extracted patterns.
    pub pattern_size: u32,
    /// Read the sample with a periodic boundary, so windows wrap.
    pub periodic_input: bool,
    /// How many of the 8 dihedral variants of each window to count,
    /// in `1..=8`. `1` is just the window itself, `8` is the full group.
    pub symmetry: u32,
    /// Designate a ground pattern from the sample's bottom edge. The
    /// solver pins the output's bottom row to it and bans it elsewhere.
    pub ground: bool,
}

impl Default for OverlappingOptions {
    fn default() -> Self {
        Self {
            pattern_size: 3,
            periodic_input: true,
            symmetry: 8,
            ground: false,
        }
    }
}

/// The overlapping unit alphabet: deduplicated N×N sample windows (and
/// their dihedral variants), weighted by occurrence count, with
/// adjacency derived from pixel-level overlap agreement.
#[derive(Clone, Debug)]
pub struct OverlappingModel<T> {
    pattern_size: u32,
    patterns: Vec<Grid<T>>,
    weights: Vec<f64>,
    propagator: Propagator,
    ground: Option<UnitId>,
}

impl<T: Clone + Eq + Hash> OverlappingModel<T> {
    /// Extract the pattern alphabet from `sample`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptySample`] for a zero-area sample,
    /// [`ConfigError::InvalidSymmetryCount`] outside `1..=8`, and
    /// [`ConfigError::InvalidPatternSize`] when N is zero or exceeds a
    /// sample dimension.
    pub fn new(sample: &Grid<T>, options: &OverlappingOptions) -> Result<Self, ConfigError> {
        if sample.is_empty() {
            return Err(ConfigError::EmptySample);
        }
        if !(1..=8).contains(&options.symmetry) {
            return Err(ConfigError::InvalidSymmetryCount {
                symmetry: options.symmetry,
            });
        }
        let n = options.pattern_size;
        if n == 0 || n > sample.width() || n > sample.height() {
            return Err(ConfigError::InvalidPatternSize {
                pattern_size: n,
                sample_width: sample.width(),
                sample_height: sample.height(),
            });
        }

        let edge = if options.periodic_input {
            EdgeBehavior::Wrap
        } else {
            EdgeBehavior::Absorb
        };
        let (x_count, y_count) = if options.periodic_input {
            (sample.width(), sample.height())
        } else {
            (sample.width() - n + 1, sample.height() - n + 1)
        };
        // Windows whose last row is the sample's bottom row; these are
        // the ground candidates.
        let bottom_y = sample.height() - n;

        let mut table: IndexMap<Grid<T>, f64> = IndexMap::new();
        let mut bottom_windows: Vec<Grid<T>> = Vec::new();
        for y in 0..y_count {
            for x in 0..x_count {
                let Some(window) = sample.window(x, y, n, edge) else {
                    continue;
                };
                if options.ground && y == bottom_y {
                    bottom_windows.push(window.clone());
                }
                for variant in dihedral_variants(window).into_iter().take(options.symmetry as usize)
                {
                    *table.entry(variant).or_insert(0.0) += 1.0;
                }
            }
        }

        let ground = if options.ground {
            most_frequent(&table, &bottom_windows)
        } else {
            None
        };

        let patterns: Vec<Grid<T>> = table.keys().cloned().collect();
        let weights: Vec<f64> = table.values().copied().collect();
        let unit_count = patterns.len() as u32;

        let mut arcs = Vec::new();
        for (a, pa) in patterns.iter().enumerate() {
            for (b, pb) in patterns.iter().enumerate() {
                for direction in Direction::ALL {
                    let (dx, dy) = direction.offset();
                    if overlap_agrees(pa, pb, dx, dy) {
                        arcs.push((UnitId(a as u32), direction, UnitId(b as u32)));
                    }
                }
            }
        }

        Ok(Self {
            pattern_size: n,
            patterns,
            weights,
            propagator: Propagator::from_arcs(unit_count, arcs),
            ground,
        })
    }

    /// Pattern side length N.
    pub fn pattern_size(&self) -> u32 {
        self.pattern_size
    }

    /// Number of distinct patterns in the alphabet.
    pub fn unit_count(&self) -> u32 {
        self.patterns.len() as u32
    }

    /// Per-pattern occurrence weights, indexed by unit ID.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The overlap-derived compatibility table.
    pub fn propagator(&self) -> &Propagator {
        &self.propagator
    }

    /// The designated ground pattern, when the ground option was set.
    pub fn ground(&self) -> Option<UnitId> {
        self.ground
    }

    /// The pattern behind a unit.
    pub fn pattern(&self, unit: UnitId) -> &Grid<T> {
        &self.patterns[unit.index()]
    }

    /// Map each decided cell to its pattern's top-left value. The
    /// output has the same dimensions as the unit grid.
    pub fn materialize(&self, cells: &Grid<UnitId>) -> Grid<T> {
        Grid::from_fn(cells.width(), cells.height(), |x, y| {
            self.patterns[cells.get(x, y).index()].get(0, 0).clone()
        })
    }
}

/// The 8 dihedral variants of a pattern, in the counting order the
/// symmetry option truncates: identity first, each rotation stage
/// followed by its reflection.
fn dihedral_variants<T: Clone>(pattern: Grid<T>) -> [Grid<T>; 8] {
    let r1 = pattern.rotated();
    let r2 = r1.rotated();
    let r3 = r2.rotated();
    let m0 = pattern.reflected();
    let m1 = r1.reflected();
    let m2 = r2.reflected();
    let m3 = r3.reflected();
    [pattern, m0, r1, m1, r2, m2, r3, m3]
}

/// Whether two equally-sized patterns agree on their overlap when `b`
/// is displaced `(dx, dy)` cells from `a`.
fn overlap_agrees<T: Eq>(a: &Grid<T>, b: &Grid<T>, dx: i32, dy: i32) -> bool {
    let n = a.width() as i32;
    let x_lo = dx.max(0);
    let x_hi = (n + dx).min(n);
    let y_lo = dy.max(0);
    let y_hi = (n + dy).min(n);
    for y in y_lo..y_hi {
        for x in x_lo..x_hi {
            if a.get(x as u32, y as u32) != b.get((x - dx) as u32, (y - dy) as u32) {
                return false;
            }
        }
    }
    true
}

/// The unit appearing most often in `windows`, by table identity.
/// Earlier-discovered units win ties.
fn most_frequent<T: Clone + Eq + Hash>(
    table: &IndexMap<Grid<T>, f64>,
    windows: &[Grid<T>],
) -> Option<UnitId> {
    let mut counts = vec![0u32; table.len()];
    for window in windows {
        if let Some(id) = table.get_index_of(window) {
            counts[id] += 1;
        }
    }
    let mut best: Option<(u32, usize)> = None;
    for (id, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        if best.map_or(true, |(max, _)| count > max) {
            best = Some((count, id));
        }
    }
    best.map(|(_, id)| UnitId(id as u32))
}
