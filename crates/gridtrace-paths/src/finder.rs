use gridtrace_core::{Cell, Grid};

use crate::config::SearchConfig;
use crate::distance::manhattan;
use crate::error::{EndpointFault, SearchError};
use crate::frontier::Frontier;
use crate::history::{History, Snapshot};
use crate::reconstruct::reconstruct;

/// Sentinel parent index meaning "no predecessor".
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Sentinel `g` meaning "no known route".
pub(crate) const UNREACHED: u32 = u32::MAX;

// ---------------------------------------------------------------------------
// Per-cell bookkeeping
// ---------------------------------------------------------------------------

/// Best known cost, predecessor and closed flag for one cell, stored in a
/// flat array indexed like the grid.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) g: u32,
    pub(crate) parent: usize,
    pub(crate) visited: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHED,
            parent: NO_PARENT,
            visited: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Where a search is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    Running,
    /// The goal was expanded; the path is optimal.
    GoalFound,
    /// The frontier ran dry: no path exists.
    Exhausted,
    /// The expansion budget was spent before the search finished.
    Halted,
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub state: SearchState,
    /// Start-to-goal path, inclusive. `None` unless `state` is `GoalFound`.
    pub path: Option<Vec<Cell>>,
    pub history: History,
    /// Number of cells popped for expansion, the goal included.
    pub expansions: usize,
}

impl SearchOutcome {
    /// Number of moves along the path.
    pub fn cost(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len() - 1)
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// A* search over a shared, read-only [`Grid`].
///
/// Every call starts from fresh bookkeeping; nothing carries over between
/// searches.
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'g> {
    grid: &'g Grid,
    config: SearchConfig,
}

impl<'g> PathFinder<'g> {
    /// Create a finder with the default configuration.
    pub fn new(grid: &'g Grid) -> Self {
        Self::with_config(grid, SearchConfig::default())
    }

    pub fn with_config(grid: &'g Grid, config: SearchConfig) -> Self {
        Self { grid, config }
    }

    /// Run a search to completion and return the path with its full
    /// history.
    ///
    /// Fails with [`SearchError::InvalidEndpoint`] before any expansion if
    /// `start` or `goal` is out of bounds or a wall.
    pub fn find(&self, start: Cell, goal: Cell) -> Result<SearchOutcome, SearchError> {
        self.search(start, goal)?.run()
    }

    /// Begin a lazy search. Each call to [`Iterator::next`] performs one
    /// expansion and yields its snapshot; the terminal snapshot comes last.
    pub fn search(&self, start: Cell, goal: Cell) -> Result<Search<'g>, SearchError> {
        let start_idx = endpoint(self.grid, start)?;
        let goal_idx = endpoint(self.grid, goal)?;

        log::debug!(
            "astar {start} -> {goal} on {}x{} grid",
            self.grid.rows(),
            self.grid.cols()
        );

        let mut nodes = vec![Node::default(); self.grid.len()];
        nodes[start_idx].g = 0;
        let mut frontier = Frontier::new();
        frontier.push(start, 0, manhattan(start, goal));

        Ok(Search {
            grid: self.grid,
            start_idx,
            goal_idx,
            goal,
            nodes,
            frontier,
            visited: Vec::new(),
            state: SearchState::Running,
            path: None,
            pending: None,
            last: start,
            expansions: 0,
            max_expansions: self.config.max_expansions,
            failed: false,
        })
    }
}

fn endpoint(grid: &Grid, c: Cell) -> Result<usize, SearchError> {
    let Some(i) = grid.index(c) else {
        return Err(SearchError::InvalidEndpoint {
            cell: c,
            fault: EndpointFault::OutOfBounds,
        });
    };
    if !grid.is_open(c) {
        return Err(SearchError::InvalidEndpoint {
            cell: c,
            fault: EndpointFault::Wall,
        });
    }
    Ok(i)
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// An in-progress search, driven one expansion at a time.
///
/// Finite and forward-only. Draining it yields exactly the history that
/// [`PathFinder::find`] returns.
#[derive(Debug)]
pub struct Search<'g> {
    grid: &'g Grid,
    start_idx: usize,
    goal_idx: usize,
    goal: Cell,
    nodes: Vec<Node>,
    frontier: Frontier,
    visited: Vec<Cell>,
    state: SearchState,
    path: Option<Vec<Cell>>,
    pending: Option<Snapshot>,
    last: Cell,
    expansions: usize,
    max_expansions: Option<usize>,
    failed: bool,
}

impl<'g> Search<'g> {
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The path, once the goal has been expanded.
    pub fn path(&self) -> Option<&[Cell]> {
        self.path.as_deref()
    }

    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Drive the remaining expansions and collect them into an outcome.
    pub fn run(mut self) -> Result<SearchOutcome, SearchError> {
        let mut history = History::new();
        for snapshot in self.by_ref() {
            let Snapshot {
                current,
                frontier,
                visited,
                path,
            } = snapshot?;
            history.record(current, frontier, visited, path);
        }
        Ok(SearchOutcome {
            state: self.state,
            path: self.path,
            history,
            expansions: self.expansions,
        })
    }

    fn terminal(&self, frontier: Vec<Cell>, path: Option<Vec<Cell>>) -> Snapshot {
        Snapshot {
            current: self.last,
            frontier,
            visited: self.visited.clone(),
            path,
        }
    }

    fn finish(&mut self, state: SearchState) -> Snapshot {
        self.state = state;
        log::debug!(
            "astar ended {state:?} after {} expansions, {} cells closed",
            self.expansions,
            self.visited.len()
        );
        let frontier = match state {
            SearchState::Halted => self.frontier.snapshot(),
            _ => Vec::new(),
        };
        self.terminal(frontier, None)
    }

    /// One loop iteration. Returns the snapshot to yield.
    fn step(&mut self) -> Result<Snapshot, SearchError> {
        let grid = self.grid;
        loop {
            if self.frontier.is_empty() {
                return Ok(self.finish(SearchState::Exhausted));
            }
            if self.max_expansions.is_some_and(|n| self.expansions >= n) {
                return Ok(self.finish(SearchState::Halted));
            }

            let entry = self.frontier.pop_min()?;
            let Some(ci) = grid.index(entry.cell) else {
                continue;
            };
            // Stale duplicate of an already closed cell.
            if self.nodes[ci].visited {
                log::trace!("skip stale {} (g={})", entry.cell, entry.g);
                continue;
            }

            self.expansions += 1;
            self.last = entry.cell;
            log::trace!("expand {} g={} f={}", entry.cell, entry.g, entry.f);
            let snapshot = Snapshot {
                current: entry.cell,
                frontier: self.frontier.snapshot(),
                visited: self.visited.clone(),
                path: None,
            };

            if ci == self.goal_idx {
                let path = reconstruct(grid, &self.nodes, self.start_idx, self.goal_idx)?;
                self.state = SearchState::GoalFound;
                log::debug!(
                    "astar found path of {} moves after {} expansions",
                    path.len() - 1,
                    self.expansions
                );
                self.pending = Some(self.terminal(Vec::new(), Some(path.clone())));
                self.path = Some(path);
                return Ok(snapshot);
            }

            self.nodes[ci].visited = true;
            self.visited.push(entry.cell);
            let tentative_g = self.nodes[ci].g + 1;

            for n in grid.neighbors(entry.cell) {
                let Some(ni) = grid.index(n) else {
                    continue;
                };
                let node = &mut self.nodes[ni];
                if node.visited || tentative_g >= node.g {
                    continue;
                }
                node.g = tentative_g;
                node.parent = ci;
                self.frontier
                    .push(n, tentative_g, tentative_g + manhattan(n, self.goal));
            }

            return Ok(snapshot);
        }
    }
}

impl Iterator for Search<'_> {
    type Item = Result<Snapshot, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(s) = self.pending.take() {
            return Some(Ok(s));
        }
        if self.failed || self.state != SearchState::Running {
            return None;
        }
        let res = self.step();
        self.failed = res.is_err();
        Some(res)
    }
}

impl std::iter::FusedIterator for Search<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::distance_map;
    use crate::testutil::random_grid;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn c(row: i32, col: i32) -> Cell {
        Cell::new(row, col)
    }

    fn assert_valid_path(grid: &Grid, path: &[Cell], start: Cell, goal: Cell) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert!(path.iter().all(|&p| grid.is_open(p)));
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1, "{} -> {} is not a move", w[0], w[1]);
        }
    }

    #[test]
    fn open_3x3_corner_to_corner() {
        let grid: Grid = "...\n...\n...".parse().unwrap();
        let out = PathFinder::new(&grid).find(c(0, 0), c(2, 2)).unwrap();
        assert_eq!(out.state, SearchState::GoalFound);
        assert_eq!(out.cost(), Some(4));
        assert_eq!(
            out.path.as_deref(),
            Some(&[c(0, 0), c(1, 0), c(2, 0), c(2, 1), c(2, 2)][..])
        );
        assert_eq!(out.expansions, 9);
        assert_eq!(out.history.len(), 10);
    }

    #[test]
    fn open_3x3_history_is_exact() {
        let grid: Grid = "...\n...\n...".parse().unwrap();
        let h = PathFinder::new(&grid).find(c(0, 0), c(2, 2)).unwrap().history;

        let currents: Vec<Cell> = h.iter().map(|s| s.current).collect();
        assert_eq!(
            currents,
            vec![
                c(0, 0),
                c(1, 0),
                c(0, 1),
                c(2, 0),
                c(1, 1),
                c(0, 2),
                c(2, 1),
                c(1, 2),
                c(2, 2),
                c(2, 2),
            ]
        );

        let first = h.get(0).unwrap();
        assert!(first.frontier.is_empty());
        assert!(first.visited.is_empty());

        let third = h.get(2).unwrap();
        assert_eq!(third.frontier, vec![c(2, 0), c(1, 1)]);
        assert_eq!(third.visited, vec![c(0, 0), c(1, 0)]);

        let goal_pop = h.get(8).unwrap();
        assert!(goal_pop.frontier.is_empty());
        assert_eq!(goal_pop.visited.len(), 8);
        assert!(goal_pop.path.is_none());

        let terminal = h.last().unwrap();
        assert!(terminal.frontier.is_empty());
        assert_eq!(terminal.visited, goal_pop.visited);
        assert_eq!(h.final_path().map(<[Cell]>::len), Some(5));
    }

    #[test]
    fn forced_detour_through_gap() {
        let grid: Grid = "\
            ...
            ##.
            ..."
        .parse()
        .unwrap();
        let out = PathFinder::new(&grid).find(c(0, 0), c(2, 0)).unwrap();
        let path = out.path.unwrap();
        assert_eq!(path.len() - 1, 6);
        assert!(path.contains(&c(1, 2)));
        assert!(path.contains(&c(0, 2)));
        assert_valid_path(&grid, &path, c(0, 0), c(2, 0));
    }

    #[test]
    fn start_equal_to_goal() {
        let grid: Grid = "..\n..".parse().unwrap();
        let out = PathFinder::new(&grid).find(c(1, 1), c(1, 1)).unwrap();
        assert_eq!(out.state, SearchState::GoalFound);
        assert_eq!(out.path, Some(vec![c(1, 1)]));
        assert_eq!(out.history.final_path(), Some(&[c(1, 1)][..]));
        assert!(!out.history.is_empty());
    }

    #[test]
    fn invalid_endpoints_fail_before_search() {
        let grid: Grid = ".#\n..".parse().unwrap();
        let finder = PathFinder::new(&grid);
        assert_eq!(
            finder.find(c(0, 1), c(1, 1)).unwrap_err(),
            SearchError::InvalidEndpoint {
                cell: c(0, 1),
                fault: EndpointFault::Wall
            }
        );
        assert_eq!(
            finder.find(c(0, 0), c(0, 1)).unwrap_err(),
            SearchError::InvalidEndpoint {
                cell: c(0, 1),
                fault: EndpointFault::Wall
            }
        );
        assert_eq!(
            finder.find(c(0, 0), c(5, 0)).unwrap_err(),
            SearchError::InvalidEndpoint {
                cell: c(5, 0),
                fault: EndpointFault::OutOfBounds
            }
        );
        assert!(finder.search(c(-1, 0), c(0, 0)).is_err());
    }

    #[test]
    fn unreachable_goal_exhausts_start_region() {
        let grid: Grid = "\
            ..#..
            ..#..
            ..#.."
            .parse()
            .unwrap();
        let out = PathFinder::new(&grid).find(c(0, 0), c(2, 4)).unwrap();
        assert_eq!(out.state, SearchState::Exhausted);
        assert!(out.path.is_none());
        assert!(out.history.final_path().is_none());

        let terminal = out.history.last().unwrap();
        assert!(terminal.frontier.is_empty());
        let closed: HashSet<Cell> = terminal.visited.iter().copied().collect();
        let region: HashSet<Cell> = distance_map(&grid, c(0, 0)).reachable().iter().copied().collect();
        assert_eq!(closed, region);
        assert_eq!(terminal.visited.len(), closed.len());
        assert_eq!(out.expansions, 6);
    }

    #[test]
    fn lazy_search_matches_eager() {
        let grid: Grid = "\
            .....
            .###.
            ...#.
            .#...".parse().unwrap();
        let finder = PathFinder::new(&grid);
        let eager = finder.find(c(0, 0), c(2, 2)).unwrap();

        let mut search = finder.search(c(0, 0), c(2, 2)).unwrap();
        assert_eq!(search.state(), SearchState::Running);
        let first = search.next().unwrap().unwrap();
        assert_eq!(first.current, c(0, 0));
        assert_eq!(search.expansions(), 1);
        let mut lazy = vec![first];
        for s in search.by_ref() {
            lazy.push(s.unwrap());
        }
        assert_eq!(search.state(), SearchState::GoalFound);
        assert_eq!(search.path(), eager.path.as_deref());
        assert_eq!(lazy, eager.history.into_vec());
        // Forward-only: nothing more once drained.
        assert!(search.next().is_none());
    }

    #[test]
    fn expansion_budget_halts_between_expansions() {
        let grid: Grid = "....\n....\n....".parse().unwrap();
        let cfg = SearchConfig::default().with_max_expansions(3);
        let out = PathFinder::with_config(&grid, cfg)
            .find(c(0, 0), c(2, 3))
            .unwrap();
        assert_eq!(out.state, SearchState::Halted);
        assert_eq!(out.expansions, 3);
        assert!(out.path.is_none());
        // Three expansions plus the terminal snapshot.
        assert_eq!(out.history.len(), 4);
        let terminal = out.history.last().unwrap();
        assert_eq!(terminal.visited.len(), 3);
        assert!(!terminal.frontier.is_empty());

        let none = PathFinder::with_config(&grid, SearchConfig::default().with_max_expansions(0))
            .find(c(0, 0), c(2, 3))
            .unwrap();
        assert_eq!(none.state, SearchState::Halted);
        assert_eq!(none.history.len(), 1);
        assert_eq!(none.history.last().unwrap().current, c(0, 0));
    }

    #[test]
    fn budget_large_enough_changes_nothing() {
        let grid: Grid = "....\n.##.\n....".parse().unwrap();
        let plain = PathFinder::new(&grid).find(c(0, 0), c(2, 3)).unwrap();
        let cfg = SearchConfig::default().with_max_expansions(plain.expansions);
        let capped = PathFinder::with_config(&grid, cfg).find(c(0, 0), c(2, 3)).unwrap();
        assert_eq!(capped, plain);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let grid = random_grid(&mut rng, 8, 8, 0.25);
            let open: Vec<Cell> = grid.open_cells().collect();
            if open.len() < 2 {
                continue;
            }
            let start = open[rng.random_range(0..open.len())];
            let goal = open[rng.random_range(0..open.len())];
            let finder = PathFinder::new(&grid);
            assert_eq!(finder.find(start, goal).unwrap(), finder.find(start, goal).unwrap());
        }
    }

    #[test]
    fn path_lengths_match_bfs_oracle() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..60 {
            let grid = random_grid(&mut rng, 7, 9, 0.3);
            let open: Vec<Cell> = grid.open_cells().collect();
            if open.is_empty() {
                continue;
            }
            let start = open[rng.random_range(0..open.len())];
            let oracle = distance_map(&grid, start);
            let finder = PathFinder::new(&grid);
            for &goal in &open {
                let out = finder.find(start, goal).unwrap();
                match oracle.get(goal) {
                    Some(d) => {
                        assert_eq!(out.state, SearchState::GoalFound);
                        let path = out.path.unwrap();
                        assert_eq!(path.len() - 1, d as usize, "{start} -> {goal}");
                        assert_valid_path(&grid, &path, start, goal);
                    }
                    None => {
                        assert_eq!(out.state, SearchState::Exhausted);
                        assert!(out.path.is_none());
                        let closed: HashSet<Cell> =
                            out.history.last().unwrap().visited.iter().copied().collect();
                        let region: HashSet<Cell> = oracle.reachable().iter().copied().collect();
                        assert_eq!(closed, region, "{start} -> {goal}");
                    }
                }
            }
        }
    }

    #[test]
    fn history_is_monotonic() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..30 {
            let grid = random_grid(&mut rng, 10, 10, 0.3);
            let open: Vec<Cell> = grid.open_cells().collect();
            if open.len() < 2 {
                continue;
            }
            let start = open[0];
            let goal = open[open.len() - 1];
            let h = PathFinder::new(&grid).find(start, goal).unwrap().history;

            let expansions = &h.as_slice()[..h.len() - 1];
            let mut seen = HashSet::new();
            for s in expansions {
                assert!(seen.insert(s.current), "{} expanded twice", s.current);
                assert!(!s.visited.contains(&s.current));
            }
            for w in h.as_slice().windows(2) {
                assert!(w[0].visited.len() <= w[1].visited.len());
                assert_eq!(w[1].visited[..w[0].visited.len()], w[0].visited[..]);
            }
        }
    }
}
