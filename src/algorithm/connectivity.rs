//! Union-find over tiles with open-exit accounting
//!
//! Every component tracks how many pipe ends on its boundary are still
//! unmatched. A component whose exits reach zero before it covers the whole
//! board is sealed off from the remaining tiles and can never become part of
//! a single spanning network, so such merges are refused.
//!
//! All operations go through the [`TileStore`], which keeps parent pointers and
//! component counters inside the current search scope.

use crate::algorithm::overlay::TileStore;
use crate::spatial::tiles::TileId;

/// Outcome of testing a prospective merge without performing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeCheck {
    /// Both tiles already share a component, so the edge would close a loop
    SameComponent,
    /// The merged component would have no open exits yet miss some tiles
    SealsLoop,
    /// The merge keeps the network completable
    Open,
}

/// Successful union outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Union {
    /// Roots already matched, nothing changed
    AlreadyJoined,
    /// Two components merged under the given root
    Merged(TileId),
}

/// Refused merge that would seal an incomplete component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedLoop {
    /// Root the merge would have produced
    pub root: TileId,
}

impl TileStore<'_> {
    /// Root of the tile's component, compressing the path on the way
    pub fn find(&mut self, id: TileId) -> TileId {
        let mut path = Vec::new();
        let mut current = id;
        loop {
            let Some(parent) = self.read(current).map(|state| state.component) else {
                break;
            };
            if parent == current {
                break;
            }
            path.push(current);
            current = parent;
        }

        let root = current;
        for node in path {
            let compress = self.read(node).is_some_and(|state| state.component != root);
            if compress {
                if let Some(state) = self.write(node) {
                    state.component = root;
                }
            }
        }
        root
    }

    fn component_totals(&self, root: TileId) -> (usize, u32) {
        self.read(root)
            .map_or((0, 0), |state| (state.component_size, state.component_exits))
    }

    /// Test whether joining the components of `a` and `b` keeps the board solvable
    pub fn merge_check(&mut self, a: TileId, b: TileId) -> MergeCheck {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return MergeCheck::SameComponent;
        }
        let (size_a, exits_a) = self.component_totals(root_a);
        let (size_b, exits_b) = self.component_totals(root_b);
        match (exits_a + exits_b).checked_sub(2) {
            Some(0) | None if size_a + size_b < self.tile_count() => MergeCheck::SealsLoop,
            _ => MergeCheck::Open,
        }
    }

    /// Join the components of `a` and `b` across one matched pipe edge
    ///
    /// The smaller component is attached under the larger one and the edge's
    /// two pipe ends are subtracted from the combined exits.
    ///
    /// # Errors
    ///
    /// Returns `ClosedLoop` without touching any state when the merged
    /// component would have no exits left while not covering every tile
    pub fn union(&mut self, a: TileId, b: TileId) -> Result<Union, ClosedLoop> {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return Ok(Union::AlreadyJoined);
        }

        let (size_a, exits_a) = self.component_totals(root_a);
        let (size_b, exits_b) = self.component_totals(root_b);
        let (root, child) = if size_a >= size_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        let size = size_a + size_b;
        let exits = match (exits_a + exits_b).checked_sub(2) {
            Some(exits) if exits > 0 || size >= self.tile_count() => exits,
            _ => return Err(ClosedLoop { root }),
        };

        if let Some(state) = self.write(child) {
            state.component = root;
        }
        if let Some(state) = self.write(root) {
            state.component_size = size;
            state.component_exits = exits;
        }
        Ok(Union::Merged(root))
    }

    /// Size of the component containing the tile
    pub fn component_size(&mut self, id: TileId) -> usize {
        let root = self.find(id);
        self.component_totals(root).0
    }
}
