//! **gridtrace-core** — core types for grid path searches.
//!
//! This crate provides the leaf data structures shared by the *gridtrace*
//! workspace: `(row, col)` cell coordinates and the immutable obstacle
//! [`Grid`] built from ingested 0/1 matrices or `.`/`#` text.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::MalformedGrid;
pub use geom::{Cell, CellIter};
pub use grid::{Grid, Tile};
