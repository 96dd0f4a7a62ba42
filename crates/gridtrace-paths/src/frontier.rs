use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridtrace_core::Cell;

use crate::error::SearchError;

/// A frontier entry: a discovered cell with its path cost `g` and estimated
/// total cost `f`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub cell: Cell,
    pub g: u32,
    pub f: u32,
    seq: u64,
}

impl Entry {
    /// Composite priority key; smaller pops first. `seq` is unique per
    /// frontier, so no two entries compare equal.
    #[inline]
    fn key(&self) -> (u32, u32, u64) {
        (self.f, self.g, self.seq)
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open set ordered by ascending `f`, then ascending `g`, then insertion
/// order.
///
/// A cell may be held several times; callers skip stale entries on pop.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `cell` with path cost `g` and priority `f`.
    pub fn push(&mut self, cell: Cell, g: u32, f: u32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { cell, g, f, seq });
    }

    /// Remove and return the entry with the smallest key.
    pub fn pop_min(&mut self) -> Result<Entry, SearchError> {
        self.heap.pop().ok_or(SearchError::EmptyFrontier)
    }

    /// Whether no entries are held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of held entries, stale duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Cells currently held, in pop order.
    pub fn snapshot(&self) -> Vec<Cell> {
        let mut entries: Vec<&Entry> = self.heap.iter().collect();
        entries.sort_unstable_by_key(|e| e.key());
        entries.into_iter().map(|e| e.cell).collect()
    }
}
