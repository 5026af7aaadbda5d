//! The four axis-aligned neighbour directions.

use std::fmt;

/// One of the four cardinal neighbour offsets on a 2D grid.
///
/// `y` grows downward, so [`Direction::Up`] is `(0, -1)`. The variant
/// order of [`Direction::ALL`] is fixed and defines the direction axis
/// of every per-direction table in the engine (propagator entries,
/// support counts).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// `(0, -1)`: the cell above.
    Up,
    /// `(-1, 0)`: the cell to the left.
    Left,
    /// `(1, 0)`: the cell to the right.
    Right,
    /// `(0, 1)`: the cell below.
    Down,
}

impl Direction {
    /// All directions, in table order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// Number of directions.
    pub const COUNT: usize = 4;

    /// Position of this direction in [`Direction::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Left => 1,
            Self::Right => 2,
            Self::Down => 3,
        }
    }

    /// The `(dx, dy)` cell offset of this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
        }
    }

    /// The direction pointing the opposite way.
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }

    /// The direction after one 90° counter-clockwise rotation of the
    /// plane (`Right` becomes `Up`, `Up` becomes `Left`, and so on).
    ///
    /// "Counter-clockwise" is as displayed with `y` growing downward,
    /// matching [`Grid::rotated`](crate::Grid::rotated): the same group
    /// element acts on tile images and on neighbour relations.
    pub fn rotate_ccw(self) -> Self {
        match self {
            Self::Right => Self::Up,
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
        }
    }

    /// The direction after mirroring the plane horizontally
    /// (`Left` and `Right` swap, vertical directions are fixed).
    pub fn reflect(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            vertical => vertical,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Down => write!(f, "down"),
        }
    }
}
