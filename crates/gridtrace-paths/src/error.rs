use std::fmt;

use gridtrace_core::Cell;

/// Why a start or goal cell was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFault {
    OutOfBounds,
    Wall,
}

/// Errors returned by [`PathFinder`](crate::PathFinder).
///
/// Failing to reach the goal is not an error: it is reported as
/// [`SearchState::Exhausted`](crate::SearchState::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Start or goal is outside the grid or on a wall. Raised before any
    /// expansion, so no history exists.
    InvalidEndpoint { cell: Cell, fault: EndpointFault },
    /// `pop_min` on an empty frontier. Indicates a bug in the caller.
    EmptyFrontier,
    /// The predecessor chain from `from` did not reach the start within
    /// `steps` steps. Indicates corrupted bookkeeping.
    BrokenChain { from: Cell, steps: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint { cell, fault } => match fault {
                EndpointFault::OutOfBounds => write!(f, "endpoint {cell} is outside the grid"),
                EndpointFault::Wall => write!(f, "endpoint {cell} is a wall"),
            },
            Self::EmptyFrontier => write!(f, "pop from an empty frontier"),
            Self::BrokenChain { from, steps } => write!(
                f,
                "predecessor chain from {from} did not reach the start after {steps} steps"
            ),
        }
    }
}

impl std::error::Error for SearchError {}
