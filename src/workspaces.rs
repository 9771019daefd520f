//! Workspace occupancy tracking.
//!
//! [`Tracker`] produces a coherent [`WorkspaceState`] snapshot on demand
//! by re-querying the window manager through a
//! [`WorkspaceQuery`](crate::traits::WorkspaceQuery) backend.  The state
//! is recomputed wholesale on every refresh — there is no incremental
//! update and nothing is persisted.
//!
//! Query failures are absorbed here: a field whose query fails keeps its
//! previous value, so the indicator renders the last known state instead
//! of crashing or flickering to empty.

use crate::traits::WorkspaceQuery;
use log::debug;
use std::collections::BTreeSet;

/// Snapshot of the workspace situation as last refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceState {
    current: Option<i32>,
    occupied: BTreeSet<i32>,
}

impl WorkspaceState {
    /// The active workspace id, exactly as reported by the window
    /// manager (may be negative for special workspaces).  Defaults to 1
    /// when no query has ever succeeded.
    pub fn current(&self) -> i32 {
        self.current.unwrap_or(1)
    }

    /// Whether workspace `id` holds any windows.
    pub fn is_occupied(&self, id: i32) -> bool {
        self.occupied.contains(&id)
    }

    /// Highest occupied workspace id, or 0 when none are tracked.
    pub fn max_occupied(&self) -> i32 {
        self.occupied.iter().next_back().copied().unwrap_or(0)
    }

    /// Whether the snapshot describes a workspace the indicator should
    /// show for.
    ///
    /// Special/none workspaces report non-positive ids; a show request
    /// arriving while one is active is suppressed entirely — no
    /// animation, no render.
    pub fn is_showable(&self) -> bool {
        self.current() > 0
    }
}

/// Maintains a [`WorkspaceState`] by querying a backend on demand.
pub struct Tracker<Q: WorkspaceQuery> {
    query: Q,
    state: WorkspaceState,
    persistent_slots: usize,
    max_slots: usize,
}

impl<Q: WorkspaceQuery> Tracker<Q> {
    /// Create a tracker over `query`.
    ///
    /// `persistent_slots` is the minimum number of dots ever rendered;
    /// `max_slots` the hard cap.  Occupancy only ever tracks ids in
    /// `[1, max_slots]`.
    pub fn new(query: Q, persistent_slots: usize, max_slots: usize) -> Self {
        Self {
            query,
            state: WorkspaceState::default(),
            persistent_slots,
            max_slots,
        }
    }

    /// The most recent snapshot.
    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    /// Re-query the window manager and rebuild the snapshot.
    ///
    /// Never fails: a failed or unparsable query leaves the affected
    /// field at its previous value.
    pub fn refresh(&mut self) {
        match self.query.active_workspace() {
            Ok(id) => self.state.current = Some(id),
            Err(e) => debug!("active-workspace query failed: {}", e),
        }

        match self.query.workspace_ids() {
            Ok(ids) => {
                self.state.occupied = ids
                    .into_iter()
                    .filter(|&id| id >= 1 && id <= self.max_slots as i32)
                    .collect();
            }
            Err(e) => debug!("workspace-list query failed: {}", e),
        }
    }

    /// How many dot slots to render.
    ///
    /// The larger of the current workspace id and the highest occupied
    /// id, floored at `persistent_slots` and capped at `max_slots`.
    /// This keeps the pill at a stable minimum width and a bounded
    /// maximum width.
    pub fn dot_count(&self) -> usize {
        let hi = self
            .state
            .current()
            .max(self.state.max_occupied())
            .max(self.persistent_slots as i32);
        hi.min(self.max_slots as i32) as usize
    }
}
