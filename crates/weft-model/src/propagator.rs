//! The directional unit-compatibility table.

use weft_core::UnitId;
use weft_grid::Direction;

/// Precomputed adjacency compatibility between units.
///
/// For each unit and each of the four directions, the table holds the
/// sorted set of units allowed in the neighbouring cell. Built once per
/// model configuration and read-only afterwards; attempts and samples
/// share one table.
///
/// Every inserted arc `(a, d, b)` is mirrored as `(b, opposite(d), a)`,
/// so the table is symmetric across opposite directions by construction:
/// `b ∈ allowed(a, d)` iff `a ∈ allowed(b, d.opposite())`.
#[derive(Clone, Debug)]
pub struct Propagator {
    unit_count: u32,
    // allowed[unit][direction.index()]
    allowed: Vec<[Vec<UnitId>; 4]>,
}

impl Propagator {
    /// Build the table from compatibility arcs.
    ///
    /// An arc `(a, d, b)` declares that `b` may occupy the cell one step
    /// in direction `d` from a cell occupied by `a`. The mirrored arc is
    /// inserted automatically and duplicates are collapsed. Unit IDs
    /// must be below `unit_count`.
    pub fn from_arcs(
        unit_count: u32,
        arcs: impl IntoIterator<Item = (UnitId, Direction, UnitId)>,
    ) -> Self {
        let mut allowed: Vec<[Vec<UnitId>; 4]> =
            vec![Default::default(); unit_count as usize];
        for (a, direction, b) in arcs {
            debug_assert!(a.0 < unit_count && b.0 < unit_count);
            allowed[a.index()][direction.index()].push(b);
            allowed[b.index()][direction.opposite().index()].push(a);
        }
        for entry in &mut allowed {
            for list in entry.iter_mut() {
                list.sort_unstable();
                list.dedup();
            }
        }
        Self {
            unit_count,
            allowed,
        }
    }

    /// Number of units in the alphabet.
    pub fn unit_count(&self) -> u32 {
        self.unit_count
    }

    /// Units allowed one step in `direction` from a cell occupied by
    /// `unit`. Sorted ascending.
    pub fn allowed(&self, unit: UnitId, direction: Direction) -> &[UnitId] {
        &self.allowed[unit.index()][direction.index()]
    }

    /// Number of units that support `unit` from `direction`: the units
    /// that, placed one step in `direction.opposite()`, allow `unit`
    /// here. This is the initial per-cell support count the solver
    /// starts from.
    pub fn support_count(&self, unit: UnitId, direction: Direction) -> usize {
        self.allowed(unit, direction.opposite()).len()
    }
}
