use gridtrace_core::{Cell, Grid};

use crate::error::SearchError;
use crate::finder::{NO_PARENT, Node};

/// Walk predecessors from `goal_idx` back to `start_idx` and return the
/// cells in start-to-goal order.
///
/// The walk is bounded by the grid's cell count; exceeding it, or hitting a
/// node without a predecessor before the start, means the bookkeeping is
/// corrupt.
pub(crate) fn reconstruct(
    grid: &Grid,
    nodes: &[Node],
    start_idx: usize,
    goal_idx: usize,
) -> Result<Vec<Cell>, SearchError> {
    let broken = |steps| SearchError::BrokenChain {
        from: grid.cell_at(goal_idx),
        steps,
    };

    let mut path = vec![grid.cell_at(goal_idx)];
    let mut ci = goal_idx;
    let mut steps = 0;
    while ci != start_idx {
        if steps >= nodes.len() {
            return Err(broken(steps));
        }
        ci = match nodes.get(ci) {
            Some(n) if n.parent != NO_PARENT => n.parent,
            _ => return Err(broken(steps)),
        };
        steps += 1;
        path.push(grid.cell_at(ci));
    }
    path.reverse();
    Ok(path)
}
