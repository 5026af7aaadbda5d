//! The dense 2D grid container.

use crate::direction::Direction;
use crate::edge::{resolve_axis, EdgeBehavior};
use crate::error::GridError;
use smallvec::SmallVec;

/// A fixed-size dense 2D grid, stored row-major.
///
/// `width * height == data.len()` always holds and the grid is never
/// resized after construction. Cells are addressed as `(x, y)` with
/// `x` in `0..width` and `y` in `0..height`; `y` grows downward.
///
/// Zero-area grids are representable — the model crates reject empty
/// *inputs* with their own configuration errors, which keeps "you gave
/// me nothing to sample" a domain-level diagnostic rather than a
/// container panic.
///
/// # Examples
///
/// ```
/// use weft_grid::Grid;
///
/// let g = Grid::from_fn(3, 2, |x, y| x + 10 * y);
/// assert_eq!(*g.get(2, 1), 12);
/// assert_eq!(g.as_slice(), &[0, 1, 2, 10, 11, 12]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// A `width x height` grid with every cell set to `fill`.
    pub fn new(width: u32, height: u32, fill: T) -> Self {
        Self {
            width,
            height,
            data: vec![fill; width as usize * height as usize],
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f(x, y)` for every cell in row-major
    /// order.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// [`GridError::DimensionMismatch`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> Result<Self, GridError> {
        if data.len() != width as usize * height as usize {
            return Err(GridError::DimensionMismatch {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total cell count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if the grid has zero area.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major index of `(x, y)`.
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Read the cell at `(x, y)`. Panics if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> &T {
        &self.data[self.index(x, y)]
    }

    /// Mutably borrow the cell at `(x, y)`. Panics if out of bounds.
    pub fn get_mut(&mut self, x: u32, y: u32) -> &mut T {
        let i = self.index(x, y);
        &mut self.data[i]
    }

    /// Overwrite the cell at `(x, y)`. Panics if out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: T) {
        let i = self.index(x, y);
        self.data[i] = value;
    }

    /// Resolve possibly out-of-bounds coordinates under `edge`.
    ///
    /// Returns the in-bounds cell the lookup lands on, or `None` when
    /// the lookup is absorbed (or the grid is empty).
    pub fn resolve(&self, x: i64, y: i64, edge: EdgeBehavior) -> Option<(u32, u32)> {
        if self.data.is_empty() {
            return None;
        }
        let rx = resolve_axis(x, self.width, edge)?;
        let ry = resolve_axis(y, self.height, edge)?;
        Some((rx, ry))
    }

    /// The neighbour of `(x, y)` one step in `direction`, under `edge`.
    pub fn neighbour(
        &self,
        x: u32,
        y: u32,
        direction: Direction,
        edge: EdgeBehavior,
    ) -> Option<(u32, u32)> {
        let (dx, dy) = direction.offset();
        self.resolve(i64::from(x) + i64::from(dx), i64::from(y) + i64::from(dy), edge)
    }

    /// All neighbours of `(x, y)` under `edge`, in [`Direction::ALL`]
    /// order. Absorbed directions are omitted, so boundary cells yield
    /// fewer than four entries.
    pub fn neighbours(
        &self,
        x: u32,
        y: u32,
        edge: EdgeBehavior,
    ) -> SmallVec<[(Direction, u32, u32); 4]> {
        let mut out = SmallVec::new();
        for direction in Direction::ALL {
            if let Some((nx, ny)) = self.neighbour(x, y, direction, edge) {
                out.push((direction, nx, ny));
            }
        }
        out
    }

    /// The whole grid as a row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the grid, returning its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate cells as `(x, y, &value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(i, v)| {
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            (x, y, v)
        })
    }
}

impl<T: Clone> Grid<T> {
    /// The grid rotated 90° counter-clockwise (as displayed with `y`
    /// growing downward). Width and height swap.
    pub fn rotated(&self) -> Self {
        Self::from_fn(self.height, self.width, |x, y| {
            self.get(self.width - 1 - y, x).clone()
        })
    }

    /// The grid mirrored horizontally.
    pub fn reflected(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(self.width - 1 - x, y).clone()
        })
    }

    /// The `size x size` sub-grid whose top-left corner is `(x, y)`,
    /// reading cells under `edge` (wrapping windows are how the
    /// overlapping model samples a periodic input).
    ///
    /// Returns `None` if any cell of the window is absorbed.
    pub fn window(&self, x: u32, y: u32, size: u32, edge: EdgeBehavior) -> Option<Self> {
        let mut data = Vec::with_capacity(size as usize * size as usize);
        for dy in 0..size {
            for dx in 0..size {
                let (cx, cy) =
                    self.resolve(i64::from(x) + i64::from(dx), i64::from(y) + i64::from(dy), edge)?;
                data.push(self.get(cx, cy).clone());
            }
        }
        Some(Self {
            width: size,
            height: size,
            data,
        })
    }
}
