use crate::spatial::tiles::{TileId, TileState};
use std::collections::HashMap;

/// Copy-on-write view of tile states with a stack of speculative scopes
///
/// Reads resolve from the most recent scope down to the canonical states.
/// Writes copy the tile's current effective state into the top scope the
/// first time it is touched there, so discarding a scope rolls back every
/// speculative change without cloning the whole puzzle. With no scope open,
/// writes go straight to the canonical states.
#[derive(Debug)]
pub struct TileStore<'a> {
    canonical: &'a mut [TileState],
    scopes: Vec<HashMap<TileId, TileState>>,
}

impl<'a> TileStore<'a> {
    /// Wrap canonical states with an empty scope stack
    pub const fn new(canonical: &'a mut [TileState]) -> Self {
        Self {
            canonical,
            scopes: Vec::new(),
        }
    }

    /// Number of tiles in the canonical arena
    pub const fn tile_count(&self) -> usize {
        self.canonical.len()
    }

    /// Number of open scopes
    pub const fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Open a new speculative scope
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Discard the most recent scope and every change made inside it
    ///
    /// Returns false when no scope was open
    pub fn pop_scope(&mut self) -> bool {
        self.scopes.pop().is_some()
    }

    /// Fold every open scope into the canonical states
    ///
    /// Scopes are applied oldest first so later overrides win. The stack is
    /// empty afterwards.
    pub fn commit(&mut self) {
        for scope in self.scopes.drain(..) {
            for (id, state) in scope {
                if let Some(slot) = self.canonical.get_mut(id.index()) {
                    *slot = state;
                }
            }
        }
    }

    /// Effective state of a tile
    pub fn read(&self, id: TileId) -> Option<&TileState> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&id))
            .or_else(|| self.canonical.get(id.index()))
    }

    /// Writable state of a tile in the top scope
    pub fn write(&mut self, id: TileId) -> Option<&mut TileState> {
        if self.scopes.is_empty() {
            return self.canonical.get_mut(id.index());
        }
        let materialized = self
            .scopes
            .last()
            .is_some_and(|scope| scope.contains_key(&id));
        if !materialized {
            let seed = self.read(id)?.clone();
            self.scopes.last_mut()?.insert(id, seed);
        }
        self.scopes.last_mut()?.get_mut(&id)
    }

    /// Number of remaining configurations, zero for unknown tiles
    pub fn domain_len(&self, id: TileId) -> usize {
        self.read(id)
            .map_or(0, |state| state.possible_configurations.len())
    }

    /// Whether the tile has already been collapsed and joined to its neighbors
    pub fn is_applied(&self, id: TileId) -> bool {
        self.read(id)
            .is_some_and(|state| state.solve_order.is_some())
    }

    /// Whether every tile has exactly one configuration left
    pub fn all_determined(&self) -> bool {
        (0..self.canonical.len()).all(|index| self.domain_len(TileId(index)) == 1)
    }

    /// Number of tiles copied into the top scope
    pub fn scoped_len(&self) -> usize {
        self.scopes.last().map_or(0, HashMap::len)
    }
}
