/// Tunables for a [`PathFinder`](crate::PathFinder).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Stop after this many expansions with
    /// [`SearchState::Halted`](crate::SearchState::Halted). `None` means no
    /// limit. The budget is only checked between expansions.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Set the expansion budget.
    pub fn with_max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = Some(n);
        self
    }
}
