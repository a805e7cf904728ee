//! Identity-keyed tracking of composites entered during one traversal.

use std::collections::HashSet;

use crate::probe::Identity;

/// How a [`VisitedSet`] decides that a composite has been seen before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CycleTracking {
    /// Only composites on the current descent path count. A sub-tree shared
    /// by two sibling branches is walked at both places; only genuine
    /// back-references are reported.
    #[default]
    ActivePath,
    /// Every composite entered anywhere in the traversal counts, so any
    /// repeated occurrence is reported, shared DAG nodes included.
    EverVisited,
}

/// The set of composites a traversal is currently inside of.
///
/// Created fresh per top-level call and dropped when it returns; never shared
/// between calls.
#[derive(Debug, Default)]
pub struct VisitedSet {
    tracking: CycleTracking,
    entered: HashSet<Identity>,
}

impl VisitedSet {
    pub fn new(tracking: CycleTracking) -> Self {
        Self {
            tracking,
            entered: HashSet::new(),
        }
    }

    /// Record `id` before descending into it. Returns `false` when it has
    /// already been entered, in which case the caller must not descend.
    pub fn enter(&mut self, id: Identity) -> bool {
        self.entered.insert(id)
    }

    /// Record that the traversal has returned from `id`.
    pub fn leave(&mut self, id: Identity) {
        if self.tracking == CycleTracking::ActivePath {
            self.entered.remove(&id);
        }
    }

    pub fn tracking(&self) -> CycleTracking {
        self.tracking
    }
}
