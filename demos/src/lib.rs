//! Shared helpers for the gridtrace demo binaries: grid-file loading,
//! endpoint parsing and text rendering of history snapshots.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use gridtrace_core::{Cell, Grid, Tile};
use gridtrace_paths::Snapshot;

/// Errors from reading a grid file.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    /// Not valid JSON5, or not a rectangular 0/1 matrix.
    Parse(json5::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read grid file: {e}"),
            Self::Parse(e) => write!(f, "cannot parse grid file: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<json5::Error> for LoadError {
    fn from(e: json5::Error) -> Self {
        Self::Parse(e)
    }
}

/// Load a grid from a JSON5 file holding an array of rows of 0 (open) and
/// 1 (wall). Plain JSON files load too.
pub fn load_grid(path: impl AsRef<Path>) -> Result<Grid, LoadError> {
    parse_grid(&fs::read_to_string(path)?)
}

/// Parse grid text in the same format as [`load_grid`].
pub fn parse_grid(text: &str) -> Result<Grid, LoadError> {
    Ok(json5::from_str(text)?)
}

/// Parse a `ROW,COL` pair.
pub fn parse_cell(s: &str) -> Result<Cell, String> {
    let (r, c) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got \u{201c}{s}\u{201d}"))?;
    let row = r.trim().parse().map_err(|e| format!("bad row {r:?}: {e}"))?;
    let col = c.trim().parse().map_err(|e| format!("bad column {c:?}: {e}"))?;
    Ok(Cell::new(row, col))
}

/// Glyphs used by [`render_snapshot`].
pub mod glyph {
    pub const WALL: char = '#';
    pub const OPEN: char = '.';
    pub const VISITED: char = 'x';
    pub const FRONTIER: char = 'o';
    pub const PATH: char = '*';
    pub const CURRENT: char = '@';
    pub const START: char = 'S';
    pub const GOAL: char = 'G';
}

/// Render one snapshot over the grid as text, one line per row.
///
/// Later layers win: visited, frontier, path, current, then the endpoints.
pub fn render_snapshot(grid: &Grid, snap: &Snapshot, start: Cell, goal: Cell) -> String {
    let cols = grid.cols() as usize;
    let mut canvas: Vec<char> = grid
        .cells()
        .map(|c| match grid.tile(c) {
            Some(Tile::Wall) => glyph::WALL,
            _ => glyph::OPEN,
        })
        .collect();

    let mut paint = |cells: &[Cell], ch: char| {
        for &c in cells {
            if let Some(i) = grid.index(c) {
                canvas[i] = ch;
            }
        }
    };
    paint(&snap.visited, glyph::VISITED);
    paint(&snap.frontier, glyph::FRONTIER);
    if let Some(path) = &snap.path {
        paint(path, glyph::PATH);
    }
    paint(&[snap.current], glyph::CURRENT);
    paint(&[start], glyph::START);
    paint(&[goal], glyph::GOAL);

    canvas
        .chunks(cols)
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
