use std::fmt;

/// Errors raised when building a [`Grid`](crate::Grid) from ingested data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedGrid {
    /// No rows, or rows without any columns.
    Empty,
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A numeric cell that is neither 0 (open) nor 1 (wall).
    BadValue { row: usize, col: usize, value: u8 },
    /// A text cell that is neither `.` (open) nor `#` (wall).
    BadChar { row: usize, col: usize, ch: char },
}

impl fmt::Display for MalformedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "malformed grid: no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "malformed grid: row {row} has {found} columns, expected {expected}"
            ),
            Self::BadValue { row, col, value } => write!(
                f,
                "malformed grid: value {value} at ({row}, {col}) is neither 0 nor 1"
            ),
            Self::BadChar { row, col, ch } => write!(
                f,
                "malformed grid: character \u{201c}{ch}\u{201d} at ({row}, {col}) is neither '.' nor '#'"
            ),
        }
    }
}

impl std::error::Error for MalformedGrid {}
