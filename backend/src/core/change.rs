//! Mutation outcome reported by every mutator on the template

/// Whether a mutation altered persisted state
///
/// Callers use this to decide whether to batch or emit notifications.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Changed,
    Unchanged,
}

impl Change {
    pub fn is_changed(self) -> bool {
        matches!(self, Change::Changed)
    }

    /// Combine two outcomes: changed if either changed
    pub fn or(self, other: Change) -> Change {
        if self.is_changed() || other.is_changed() {
            Change::Changed
        } else {
            Change::Unchanged
        }
    }
}

impl From<bool> for Change {
    fn from(changed: bool) -> Self {
        if changed {
            Change::Changed
        } else {
            Change::Unchanged
        }
    }
}
