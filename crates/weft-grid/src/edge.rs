//! Boundary behavior for grid neighbour lookups.

/// How neighbour lookups treat the grid boundary.
///
/// This is a per-lookup choice, not a property of the grid: the same
/// sample grid is read with [`Wrap`](EdgeBehavior::Wrap) when the input
/// is declared periodic and with [`Absorb`](EdgeBehavior::Absorb)
/// otherwise, and the solver picks the behavior from the run's
/// periodic-output flag.
///
/// # Examples
///
/// ```
/// use weft_grid::{EdgeBehavior, Grid};
///
/// let g: Grid<u8> = Grid::new(4, 4, 0);
///
/// // Wrap: stepping off the left edge lands on the right edge.
/// assert_eq!(g.resolve(-1, 2, EdgeBehavior::Wrap), Some((3, 2)));
///
/// // Absorb: the lookup reports no such cell.
/// assert_eq!(g.resolve(-1, 2, EdgeBehavior::Absorb), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-bounds lookups wrap to the opposite side (torus topology).
    Wrap,
    /// Out-of-bounds lookups resolve to no cell; boundary cells have
    /// fewer neighbours.
    Absorb,
}

/// Resolve a single axis value of range `len` under the given behavior.
///
/// Returns the in-range value, the wrapped value, or `None` for an
/// absorbed out-of-bounds lookup. `len` must be non-zero.
pub fn resolve_axis(val: i64, len: u32, edge: EdgeBehavior) -> Option<u32> {
    let n = i64::from(len);
    if (0..n).contains(&val) {
        return Some(val as u32);
    }
    match edge {
        EdgeBehavior::Absorb => None,
        EdgeBehavior::Wrap => Some(val.rem_euclid(n) as u32),
    }
}
