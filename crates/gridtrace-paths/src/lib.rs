//! A* shortest-path search on obstacle grids with a replayable history.
//!
//! [`PathFinder`] finds an optimal 4-directional route between two open
//! cells of a [`Grid`](gridtrace_core::Grid) and records a [`Snapshot`] of
//! the search state at every expansion, so the run can be played back step
//! by step:
//!
//! - **Eager** search with [`PathFinder::find`], returning a [`SearchOutcome`]
//! - **Lazy** search with [`PathFinder::search`], one expansion per
//!   [`Iterator::next`]
//! - **BFS** distance maps with [`distance_map`]
//!
//! Moves cost 1 and the heuristic is always [`manhattan`], which keeps the
//! returned path optimal. Ties in the frontier break on smaller `g`, then on
//! insertion order, so runs and their histories are reproducible.

mod bfs;
mod config;
mod distance;
mod error;
mod finder;
mod frontier;
mod history;
mod reconstruct;
#[cfg(test)]
mod testutil;

pub use bfs::{DistanceMap, distance_map};
pub use config::SearchConfig;
pub use distance::manhattan;
pub use error::{EndpointFault, SearchError};
pub use finder::{PathFinder, Search, SearchOutcome, SearchState};
pub use frontier::{Entry, Frontier};
pub use history::{History, Snapshot};
