//! Geometry primitives: [`Cell`] coordinates and the row-major [`CellIter`].
//!
//! Coordinates are `(row, col)` with rows growing downward and columns
//! growing rightward, so a cell maps directly onto an image addressed
//! `[row, col]`.

use std::fmt;
use std::ops::Add;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate. Ordering is row-major (row first, then column).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Offsets of the four cardinal moves, in neighbor order.
    pub const CARDINALS: [Cell; 4] = [
        Cell::new(-1, 0),
        Cell::new(1, 0),
        Cell::new(0, -1),
        Cell::new(0, 1),
    ];

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The four cardinal neighbours: up, down, left, right.
    ///
    /// The order is fixed; search behaviour and recorded history depend on it.
    #[inline]
    pub fn neighbors_4(self) -> [Cell; 4] {
        Self::CARDINALS.map(|d| self + d)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

// ---------------------------------------------------------------------------
// CellIter
// ---------------------------------------------------------------------------

/// Row-major iterator over every cell of a `rows x cols` rectangle anchored
/// at the origin.
#[derive(Clone, Debug)]
pub struct CellIter {
    rows: i32,
    cols: i32,
    cur: Cell,
}

impl CellIter {
    /// Iterate over `rows x cols` cells. Non-positive dimensions yield nothing.
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
            cur: Cell::ZERO,
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl Iterator for CellIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.is_empty() || self.cur.row >= self.rows {
            return None;
        }
        let c = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.cols {
            self.cur.col = 0;
            self.cur.row += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_empty() || self.cur.row >= self.rows {
            return (0, Some(0));
        }
        let remaining_in_row = (self.cols - self.cur.col) as usize;
        let remaining_rows = (self.rows - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * self.cols as usize;
        (total, Some(total))
    }
}

impl ExactSizeIterator for CellIter {}
