//! The simple-tiled model: declared tiles, symmetry expansion, and
//! neighbor-rule expansion.

use crate::propagator::Propagator;
use crate::symmetry::Symmetry;
use indexmap::IndexMap;
use smallvec::SmallVec;
use weft_core::{ConfigError, UnitId};
use weft_grid::{Direction, Grid};

/// A caller-declared tile.
#[derive(Clone, Debug)]
pub struct Tile<T> {
    /// Name the neighbor rules refer to this tile by.
    pub name: String,
    /// Square tile image. All tiles of a set share one side length.
    pub image: Grid<T>,
    /// Symmetry class controlling orientation expansion.
    pub symmetry: Symmetry,
    /// Relative selection weight, split evenly across the tile's
    /// oriented variants. Must be finite and positive.
    pub weight: f64,
}

impl<T> Tile<T> {
    /// Construct a tile.
    pub fn new(name: impl Into<String>, image: Grid<T>, symmetry: Symmetry, weight: f64) -> Self {
        Self {
            name: name.into(),
            image,
            symmetry,
            weight,
        }
    }
}

/// A declared adjacency: `right` (at `right_orientation`) may sit
/// immediately east of `left` (at `left_orientation`).
///
/// Model construction expands each rule through the whole symmetry
/// group, so one declared horizontal pair covers every rotation and
/// reflection of that contact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborRule {
    /// Name of the left tile.
    pub left: String,
    /// Orientation of the left tile.
    pub left_orientation: u32,
    /// Name of the right tile.
    pub right: String,
    /// Orientation of the right tile.
    pub right_orientation: u32,
}

impl NeighborRule {
    /// Construct a rule.
    pub fn new(
        left: impl Into<String>,
        left_orientation: u32,
        right: impl Into<String>,
        right_orientation: u32,
    ) -> Self {
        Self {
            left: left.into(),
            left_orientation,
            right: right.into(),
            right_orientation,
        }
    }
}

/// Construction options for [`TiledModel`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TiledOptions {
    /// Reject rules that reference undeclared tile names instead of
    /// silently dropping them. Off by default: partial rule sets that
    /// mention absent tiles are tolerated, which lets callers reuse one
    /// rule list across tile subsets.
    pub strict_rules: bool,
}

/// One oriented variant of a declared tile.
#[derive(Clone, Debug)]
struct OrientedUnit<T> {
    tile: usize,
    orientation: u32,
    image: Grid<T>,
}

/// The simple-tiled unit alphabet: every declared tile expanded into its
/// oriented variants, with the neighbor rules expanded through the
/// symmetry group into a [`Propagator`].
#[derive(Clone, Debug)]
pub struct TiledModel<T> {
    tile_size: u32,
    tile_names: Vec<String>,
    units: Vec<OrientedUnit<T>>,
    weights: Vec<f64>,
    propagator: Propagator,
}

impl<T: Clone> TiledModel<T> {
    /// Validate the tile set and build the expanded alphabet.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] for an empty tile set, non-square / empty /
    /// size-mismatched tile images, duplicate names, non-positive
    /// weights, out-of-range rule orientations, and (in strict mode)
    /// rules naming undeclared tiles.
    pub fn new(
        tiles: Vec<Tile<T>>,
        rules: &[NeighborRule],
        options: &TiledOptions,
    ) -> Result<Self, ConfigError> {
        if tiles.is_empty() {
            return Err(ConfigError::EmptyTileSet);
        }

        let tile_size = tiles[0].image.width();
        let mut ids: IndexMap<String, usize> = IndexMap::with_capacity(tiles.len());
        for (i, tile) in tiles.iter().enumerate() {
            let (w, h) = (tile.image.width(), tile.image.height());
            if w != h {
                return Err(ConfigError::NonSquareTile {
                    name: tile.name.clone(),
                    width: w,
                    height: h,
                });
            }
            if w == 0 {
                return Err(ConfigError::EmptyTile {
                    name: tile.name.clone(),
                });
            }
            if w != tile_size {
                return Err(ConfigError::TileSizeMismatch {
                    name: tile.name.clone(),
                    size: w,
                    expected: tile_size,
                });
            }
            if !tile.weight.is_finite() || tile.weight <= 0.0 {
                return Err(ConfigError::InvalidWeight {
                    name: tile.name.clone(),
                    weight: tile.weight,
                });
            }
            if ids.insert(tile.name.clone(), i).is_some() {
                return Err(ConfigError::DuplicateTile {
                    name: tile.name.clone(),
                });
            }
        }

        // Expand every tile into its oriented variants. `first_unit[i]`
        // is the unit ID of tile i's orientation 0.
        let mut units = Vec::new();
        let mut weights = Vec::new();
        let mut first_unit: Vec<u32> = Vec::with_capacity(tiles.len());
        for (i, tile) in tiles.iter().enumerate() {
            first_unit.push(units.len() as u32);
            let oriented = oriented_images(&tile.image, tile.symmetry);
            let share = tile.weight / oriented.len() as f64;
            for (orientation, image) in oriented.into_iter().enumerate() {
                units.push(OrientedUnit {
                    tile: i,
                    orientation: orientation as u32,
                    image,
                });
                weights.push(share);
            }
        }

        let mut arcs = Vec::new();
        for rule in rules {
            let (Some(&left), Some(&right)) = (ids.get(&rule.left), ids.get(&rule.right)) else {
                if options.strict_rules {
                    let name = if ids.contains_key(&rule.left) {
                        rule.right.clone()
                    } else {
                        rule.left.clone()
                    };
                    return Err(ConfigError::UnknownTile { name });
                }
                continue;
            };
            let left_sym = tiles[left].symmetry;
            let right_sym = tiles[right].symmetry;
            for (tile, orientation, symmetry) in [
                (left, rule.left_orientation, left_sym),
                (right, rule.right_orientation, right_sym),
            ] {
                if orientation >= symmetry.orientation_count() {
                    return Err(ConfigError::InvalidOrientation {
                        tile: tiles[tile].name.clone(),
                        orientation,
                        count: symmetry.orientation_count(),
                    });
                }
            }

            let left_actions = left_sym.action_map();
            let right_actions = right_sym.action_map();
            for action in 0..8 {
                let lo = left_actions[action][rule.left_orientation as usize];
                let ro = right_actions[action][rule.right_orientation as usize];
                let a = UnitId(first_unit[left] + lo);
                let b = UnitId(first_unit[right] + ro);
                arcs.push((a, action_direction(action), b));
            }
        }

        let unit_count = units.len() as u32;
        Ok(Self {
            tile_size,
            tile_names: tiles.into_iter().map(|t| t.name).collect(),
            units,
            weights,
            propagator: Propagator::from_arcs(unit_count, arcs),
        })
    }

    /// Side length shared by every tile image.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of oriented units in the alphabet.
    pub fn unit_count(&self) -> u32 {
        self.units.len() as u32
    }

    /// Per-unit selection weights, indexed by unit ID.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The expanded compatibility table.
    pub fn propagator(&self) -> &Propagator {
        &self.propagator
    }

    /// The declared tile name and orientation behind a unit.
    pub fn unit_source(&self, unit: UnitId) -> (&str, u32) {
        let u = &self.units[unit.index()];
        (&self.tile_names[u.tile], u.orientation)
    }

    /// Unit IDs of one declared tile's oriented variants, in
    /// orientation order.
    pub fn tile_units(&self, name: &str) -> SmallVec<[UnitId; 8]> {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, u)| self.tile_names[u.tile] == name)
            .map(|(i, _)| UnitId(i as u32))
            .collect()
    }

    /// Blit each decided cell's oriented tile image into its block of
    /// the output. A `width x height` unit grid materializes into a
    /// `width*tile_size x height*tile_size` value grid.
    pub fn materialize(&self, cells: &Grid<UnitId>) -> Grid<T> {
        let size = self.tile_size;
        Grid::from_fn(cells.width() * size, cells.height() * size, |x, y| {
            let unit = cells.get(x / size, y / size);
            self.units[unit.index()].image.get(x % size, y % size).clone()
        })
    }
}

/// A tile's oriented variant images, in orientation order: `k` in
/// `0..4` is `k` counter-clockwise rotations, `4 + k` is the
/// horizontally mirrored image rotated `k` times.
fn oriented_images<T: Clone>(image: &Grid<T>, symmetry: Symmetry) -> Vec<Grid<T>> {
    let mut out = Vec::with_capacity(symmetry.orientation_count() as usize);
    out.push(image.clone());
    match symmetry.orientation_count() {
        1 => {}
        2 => out.push(image.rotated()),
        4 => {
            for _ in 0..3 {
                out.push(out[out.len() - 1].rotated());
            }
        }
        _ => {
            for _ in 0..3 {
                out.push(out[out.len() - 1].rotated());
            }
            out.push(image.reflected());
            for _ in 0..3 {
                out.push(out[out.len() - 1].rotated());
            }
        }
    }
    out
}

/// Direction of the transformed "is east of" relation under each
/// symmetry-group action: rotations turn it, the mirror flips it.
fn action_direction(action: usize) -> Direction {
    let mut direction = if action < 4 {
        Direction::Right
    } else {
        Direction::Right.reflect()
    };
    for _ in 0..(action % 4) {
        direction = direction.rotate_ccw();
    }
    direction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(v: u8) -> Grid<u8> {
        Grid::new(1, 1, v)
    }

    fn model(
        tiles: Vec<Tile<u8>>,
        rules: &[NeighborRule],
    ) -> Result<TiledModel<u8>, ConfigError> {
        TiledModel::new(tiles, rules, &TiledOptions::default())
    }

    // ── Validation ──────────────────────────────────────────────────

    #[test]
    fn empty_tile_set_is_rejected() {
        assert_eq!(model(vec![], &[]).unwrap_err(), ConfigError::EmptyTileSet);
    }

    #[test]
    fn non_square_tile_is_rejected() {
        let bad = Tile::new("wide", Grid::new(2, 1, 0u8), Symmetry::X, 1.0);
        assert!(matches!(
            model(vec![bad], &[]).unwrap_err(),
            ConfigError::NonSquareTile { .. }
        ));
    }

    #[test]
    fn mismatched_tile_sizes_are_rejected() {
        let tiles = vec![
            Tile::new("small", Grid::new(1, 1, 0u8), Symmetry::X, 1.0),
            Tile::new("large", Grid::new(2, 2, 0u8), Symmetry::X, 1.0),
        ];
        assert!(matches!(
            model(tiles, &[]).unwrap_err(),
            ConfigError::TileSizeMismatch { .. }
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let tiles = vec![
            Tile::new("a", px(0), Symmetry::X, 1.0),
            Tile::new("a", px(1), Symmetry::X, 1.0),
        ];
        assert_eq!(
            model(tiles, &[]).unwrap_err(),
            ConfigError::DuplicateTile {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn non_positive_weight_is_rejected() {
        let bad = Tile::new("a", px(0), Symmetry::X, 0.0);
        assert!(matches!(
            model(vec![bad], &[]).unwrap_err(),
            ConfigError::InvalidWeight { .. }
        ));
    }

    #[test]
    fn out_of_range_orientation_is_rejected() {
        let tiles = vec![Tile::new("a", px(0), Symmetry::I, 1.0)];
        let rules = [NeighborRule::new("a", 2, "a", 0)];
        assert_eq!(
            model(tiles, &rules).unwrap_err(),
            ConfigError::InvalidOrientation {
                tile: "a".to_string(),
                orientation: 2,
                count: 2
            }
        );
    }

    // ── Symmetry expansion ──────────────────────────────────────────

    #[test]
    fn orientation_expansion_counts() {
        let tiles = vec![
            Tile::new("full", px(0), Symmetry::X, 1.0),
            Tile::new("bar", px(1), Symmetry::I, 1.0),
            Tile::new("blob", px(2), Symmetry::P, 1.0),
        ];
        let m = model(tiles, &[]).unwrap();
        assert_eq!(m.unit_count(), 1 + 2 + 8);
        assert_eq!(m.tile_units("full").len(), 1);
        assert_eq!(m.tile_units("bar").len(), 2);
        assert_eq!(m.tile_units("blob").len(), 8);
    }

    #[test]
    fn weight_is_split_across_orientations() {
        let tiles = vec![Tile::new("tee", px(0), Symmetry::T, 2.0)];
        let m = model(tiles, &[]).unwrap();
        assert_eq!(m.weights(), &[0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn unit_source_reports_tile_and_orientation() {
        let tiles = vec![
            Tile::new("full", px(0), Symmetry::X, 1.0),
            Tile::new("bar", px(1), Symmetry::I, 1.0),
        ];
        let m = model(tiles, &[]).unwrap();
        assert_eq!(m.unit_source(UnitId(0)), ("full", 0));
        assert_eq!(m.unit_source(UnitId(2)), ("bar", 1));
    }

    // ── Rule expansion ──────────────────────────────────────────────

    #[test]
    fn fully_symmetric_pair_expands_to_all_directions() {
        let tiles = vec![
            Tile::new("a", px(0), Symmetry::X, 1.0),
            Tile::new("b", px(1), Symmetry::X, 1.0),
        ];
        let m = model(tiles, &[NeighborRule::new("a", 0, "b", 0)]).unwrap();
        let p = m.propagator();
        for direction in Direction::ALL {
            assert_eq!(p.allowed(UnitId(0), direction), &[UnitId(1)]);
            assert_eq!(p.allowed(UnitId(1), direction), &[UnitId(0)]);
        }
    }

    #[test]
    fn bar_rule_expands_rotations_consistently() {
        // One horizontal contact between two bar orientations implies
        // the rotated vertical contact, and nothing else.
        let tiles = vec![Tile::new("bar", px(0), Symmetry::I, 1.0)];
        let m = model(tiles, &[NeighborRule::new("bar", 1, "bar", 1)]).unwrap();
        let p = m.propagator();
        let (o0, o1) = (UnitId(0), UnitId(1));
        assert_eq!(p.allowed(o1, Direction::Right), &[o1]);
        assert_eq!(p.allowed(o1, Direction::Left), &[o1]);
        assert!(p.allowed(o1, Direction::Up).is_empty());
        assert_eq!(p.allowed(o0, Direction::Up), &[o0]);
        assert_eq!(p.allowed(o0, Direction::Down), &[o0]);
        assert!(p.allowed(o0, Direction::Right).is_empty());
    }

    #[test]
    fn unknown_tile_names_are_dropped() {
        let tiles = vec![Tile::new("a", px(0), Symmetry::X, 1.0)];
        let rules = [NeighborRule::new("a", 0, "ghost", 0)];
        let m = model(tiles, &rules).unwrap();
        for direction in Direction::ALL {
            assert!(m.propagator().allowed(UnitId(0), direction).is_empty());
        }
    }

    #[test]
    fn strict_mode_rejects_unknown_tile_names() {
        let tiles = vec![Tile::new("a", px(0), Symmetry::X, 1.0)];
        let rules = [NeighborRule::new("a", 0, "ghost", 0)];
        let err = TiledModel::new(tiles, &rules, &TiledOptions { strict_rules: true })
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownTile {
                name: "ghost".to_string()
            }
        );
    }

    // ── Materialization ─────────────────────────────────────────────

    #[test]
    fn materialize_blits_tile_blocks() {
        let image = Grid::from_vec(2, 2, vec![1u8, 2, 3, 4]).unwrap();
        let tiles = vec![Tile::new("q", image, Symmetry::X, 1.0)];
        let m = model(tiles, &[]).unwrap();
        let cells = Grid::new(2, 1, UnitId(0));
        let out = m.materialize(&cells);
        assert_eq!((out.width(), out.height()), (4, 2));
        assert_eq!(out.as_slice(), &[1, 2, 1, 2, 3, 4, 3, 4]);
    }

    #[test]
    fn materialize_uses_oriented_images() {
        // 2x2 image with one marked cell; orientation 1 is one CCW
        // rotation, moving the top-right mark to the top-left.
        let image = Grid::from_vec(2, 2, vec![0u8, 9, 0, 0]).unwrap();
        let tiles = vec![Tile::new("mark", image, Symmetry::T, 1.0)];
        let m = model(tiles, &[]).unwrap();
        let cells = Grid::new(1, 1, UnitId(1));
        let out = m.materialize(&cells);
        assert_eq!(out.as_slice(), &[9, 0, 0, 0]);
    }
}
