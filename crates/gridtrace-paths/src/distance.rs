use gridtrace_core::Cell;

/// Manhattan (L1) distance between two cells.
///
/// This is the search heuristic. For unit-cost 4-directional movement it is
/// admissible and consistent, so the first expansion of the goal is optimal.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> u32 {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}
