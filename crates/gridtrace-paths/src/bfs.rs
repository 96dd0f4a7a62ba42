use std::collections::VecDeque;

use gridtrace_core::{Cell, Grid};

/// Unweighted distances from a single source, computed by breadth-first
/// search over [`Grid::neighbors`].
#[derive(Clone, Debug)]
pub struct DistanceMap<'g> {
    grid: &'g Grid,
    source: Cell,
    dist: Vec<u32>,
    order: Vec<Cell>,
}

const UNREACHED: u32 = u32::MAX;

impl DistanceMap<'_> {
    /// The cell the distances are measured from.
    pub fn source(&self) -> Cell {
        self.source
    }

    /// Shortest 4-directional distance from the source, or `None` if `c` is
    /// unreachable, a wall, or out of bounds.
    pub fn get(&self, c: Cell) -> Option<u32> {
        let d = self.dist[self.grid.index(c)?];
        (d != UNREACHED).then_some(d)
    }

    /// Reachable cells in BFS order, source first. Empty if the source is
    /// not open.
    pub fn reachable(&self) -> &[Cell] {
        &self.order
    }
}

/// Compute the BFS distance map from `source`.
pub fn distance_map(grid: &Grid, source: Cell) -> DistanceMap<'_> {
    let mut dist = vec![UNREACHED; grid.len()];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    if let Some(si) = grid.index(source).filter(|_| grid.is_open(source)) {
        dist[si] = 0;
        order.push(source);
        queue.push_back(source);
    }

    while let Some(c) = queue.pop_front() {
        let Some(ci) = grid.index(c) else {
            continue;
        };
        let next = dist[ci] + 1;
        for n in grid.neighbors(c) {
            let Some(ni) = grid.index(n) else {
                continue;
            };
            if dist[ni] != UNREACHED {
                continue;
            }
            dist[ni] = next;
            order.push(n);
            queue.push_back(n);
        }
    }

    DistanceMap {
        grid,
        source,
        dist,
        order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_around_a_wall() {
        let grid: Grid = "\
            ...
            ##.
            ..."
        .parse()
        .unwrap();
        let dm = distance_map(&grid, Cell::new(0, 0));
        assert_eq!(dm.source(), Cell::new(0, 0));
        assert_eq!(dm.get(Cell::new(0, 0)), Some(0));
        assert_eq!(dm.get(Cell::new(1, 2)), Some(3));
        assert_eq!(dm.get(Cell::new(2, 0)), Some(6));
        assert_eq!(dm.get(Cell::new(1, 0)), None);
        assert_eq!(dm.get(Cell::new(9, 9)), None);
        assert_eq!(dm.get(Cell::new(0, 3)), None);
        assert_eq!(dm.get(Cell::new(-1, 0)), None);
        assert_eq!(dm.reachable().len(), 7);
    }

    #[test]
    fn reachable_stops_at_walls() {
        let grid: Grid = "\
            ..#..
            ..#..
            ..#.."
            .parse()
            .unwrap();
        let dm = distance_map(&grid, Cell::new(1, 0));
        assert_eq!(dm.reachable().len(), 6);
        assert!(dm.reachable().iter().all(|c| c.col < 2));
        assert_eq!(dm.get(Cell::new(0, 4)), None);
    }

    #[test]
    fn wall_source_reaches_nothing() {
        let grid: Grid = ".#.".parse().unwrap();
        let dm = distance_map(&grid, Cell::new(0, 1));
        assert!(dm.reachable().is_empty());
        assert_eq!(dm.get(Cell::new(0, 0)), None);
    }
}
