//! The [`Grid`] type — an immutable rectangular obstacle map.
//!
//! A grid is built once from ingested data (a 0/1 matrix, a matrix of
//! [`Tile`]s, or the `.`/`#` text form) and is read-only afterwards, so it
//! can be shared freely between searches.

use std::fmt;
use std::str::FromStr;

use crate::error::MalformedGrid;
use crate::geom::{Cell, CellIter};

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Open,
    Wall,
}

impl Tile {
    /// Text form: `.` for open, `#` for wall.
    pub const fn as_char(self) -> char {
        match self {
            Tile::Open => '.',
            Tile::Wall => '#',
        }
    }

    /// Numeric form used by grid files: 0 for open, 1 for wall.
    pub const fn as_bit(self) -> u8 {
        match self {
            Tile::Open => 0,
            Tile::Wall => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular, immutable obstacle map addressed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Tile>,
    rows: i32,
    cols: i32,
}

impl Grid {
    /// Build a grid from rows of tiles. Every row must have the same,
    /// non-zero length.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, MalformedGrid> {
        let ncols = rows.first().map_or(0, Vec::len);
        if ncols == 0 {
            return Err(MalformedGrid::Empty);
        }
        let nrows = rows.len();
        let mut tiles = Vec::with_capacity(nrows * ncols);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(MalformedGrid::Ragged {
                    row: r,
                    expected: ncols,
                    found: row.len(),
                });
            }
            tiles.extend(row);
        }
        Ok(Self {
            tiles,
            rows: nrows as i32,
            cols: ncols as i32,
        })
    }

    /// Build a grid from a 0 (open) / 1 (wall) matrix, as produced by the
    /// grid-file parser.
    pub fn from_bits(bits: &[Vec<u8>]) -> Result<Self, MalformedGrid> {
        let mut rows = Vec::with_capacity(bits.len());
        for (r, row) in bits.iter().enumerate() {
            let row = row
                .iter()
                .enumerate()
                .map(|(c, &value)| match value {
                    0 => Ok(Tile::Open),
                    1 => Ok(Tile::Wall),
                    _ => Err(MalformedGrid::BadValue { row: r, col: c, value }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// The grid as a 0/1 matrix (inverse of [`from_bits`](Grid::from_bits)).
    pub fn to_bits(&self) -> Vec<Vec<u8>> {
        self.tiles
            .chunks(self.cols as usize)
            .map(|row| row.iter().map(|t| t.as_bit()).collect())
            .collect()
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Flat row-major index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols as usize + c.col as usize)
    }

    /// Convert a flat index back to a cell.
    #[inline]
    pub fn cell_at(&self, idx: usize) -> Cell {
        let cols = self.cols as usize;
        Cell::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// The tile at `c`, or `None` if out of bounds.
    #[inline]
    pub fn tile(&self, c: Cell) -> Option<Tile> {
        self.index(c).map(|i| self.tiles[i])
    }

    /// Whether `c` is in bounds and not a wall.
    #[inline]
    pub fn is_open(&self, c: Cell) -> bool {
        self.tile(c) == Some(Tile::Open)
    }

    /// In-bounds open neighbours of `c`, in up, down, left, right order.
    pub fn neighbors(&self, c: Cell) -> impl Iterator<Item = Cell> + '_ {
        c.neighbors_4().into_iter().filter(move |&n| self.is_open(n))
    }

    /// Row-major iterator over every cell.
    pub fn cells(&self) -> CellIter {
        CellIter::new(self.rows, self.cols)
    }

    /// Row-major iterator over open cells.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |&c| self.is_open(c))
    }
}

impl FromStr for Grid {
    type Err = MalformedGrid;

    /// Parse the text form: one line per row, `.` open and `#` wall.
    /// Surrounding whitespace on each line and blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let r = rows.len();
            let row = line
                .chars()
                .enumerate()
                .map(|(c, ch)| match ch {
                    '.' => Ok(Tile::Open),
                    '#' => Ok(Tile::Wall),
                    _ => Err(MalformedGrid::BadChar { row: r, col: c, ch }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.tiles.chunks(self.cols as usize).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for t in row {
                write!(f, "{}", t.as_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bits().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Grid::from_bits(&bits).map_err(serde::de::Error::custom)
    }
}
