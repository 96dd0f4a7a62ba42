//! Recorded search history for step-by-step replay.
//!
//! A [`History`] is an append-only sequence of [`Snapshot`]s. A finished
//! search records one snapshot per expansion followed by exactly one
//! terminal snapshot: it carries the path when the goal was found, and
//! `None` when the frontier ran dry or the expansion budget was spent.

use std::slice;

use gridtrace_core::Cell;

/// Search state at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// The cell being expanded.
    pub current: Cell,
    /// Cells held by the frontier, in pop order.
    pub frontier: Vec<Cell>,
    /// Expanded cells, in expansion order.
    pub visited: Vec<Cell>,
    /// Start-to-goal path, only on the terminal snapshot of a successful run.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub path: Option<Vec<Cell>>,
}

/// Append-only snapshot sequence owned by one search run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one snapshot.
    pub fn record(
        &mut self,
        current: Cell,
        frontier: Vec<Cell>,
        visited: Vec<Cell>,
        path: Option<Vec<Cell>>,
    ) {
        self.push(Snapshot {
            current,
            frontier,
            visited,
            path,
        });
    }

    /// Append an already built snapshot.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Snapshot> {
        self.snapshots.get(i)
    }

    /// The most recent snapshot; the terminal one for a finished run.
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// The path carried by the terminal snapshot, if any.
    pub fn final_path(&self) -> Option<&[Cell]> {
        self.last().and_then(|s| s.path.as_deref())
    }

    /// Snapshots in recorded order.
    pub fn iter(&self) -> slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn as_slice(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn into_vec(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

impl IntoIterator for History {
    type Item = Snapshot;
    type IntoIter = std::vec::IntoIter<Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.into_iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Snapshot;
    type IntoIter = slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

impl FromIterator<Snapshot> for History {
    fn from_iter<I: IntoIterator<Item = Snapshot>>(iter: I) -> Self {
        Self {
            snapshots: iter.into_iter().collect(),
        }
    }
}

impl Extend<Snapshot> for History {
    fn extend<I: IntoIterator<Item = Snapshot>>(&mut self, iter: I) {
        self.snapshots.extend(iter);
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn history_serializes_as_plain_array() {
        let mut h = History::new();
        h.record(Cell::new(1, 2), vec![Cell::new(1, 3)], vec![], None);
        let json = serde_json::to_value(&h).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["current"]["row"], 1);
        assert!(json[0].get("path").is_none());
        let back: History = serde_json::from_value(json).unwrap();
        assert_eq!(back, h);
    }
}
