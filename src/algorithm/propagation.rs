use crate::{
    algorithm::bitset::ConfigurationSet,
    algorithm::connectivity::{MergeCheck, Union},
    algorithm::overlay::TileStore,
    math::rotation::{Configuration, connection_count, is_connection},
    spatial::{Board, TileId, TileState},
};
use std::collections::VecDeque;

/// Monotonic counter handing out the order in which tiles become determined
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SolveOrder {
    next: usize,
}

impl SolveOrder {
    /// Start counting from zero
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Take the next index
    pub const fn assign(&mut self) -> usize {
        let order = self.next;
        self.next += 1;
        order
    }

    /// Number of indices handed out so far
    pub const fn issued(&self) -> usize {
        self.next
    }
}

/// Why a tile could not be kept consistent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContradictionKind {
    /// Every configuration of the tile was ruled out
    EmptyDomain,
    /// A confirmed connection would close a loop or seal an incomplete component
    ClosedLoop,
    /// A determined tile disagrees with an already determined neighbor
    Disagreement,
    /// A determined tile points a stub past the board edge
    OffGrid,
}

/// A tile state that cannot be part of any solution
///
/// This is an expected outcome during search, not an error: the candidate
/// that led here is simply ruled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    /// Tile where the contradiction surfaced
    pub tile: TileId,
    /// What went wrong
    pub kind: ContradictionKind,
}

impl Contradiction {
    const fn new(tile: TileId, kind: ContradictionKind) -> Self {
        Self { tile, kind }
    }
}

/// Counters describing propagation work
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PropagationStats {
    /// Number of propagation runs started
    pub runs: usize,
    /// Number of worklist entries examined
    pub tiles_examined: usize,
    /// Number of configurations removed from domains
    pub rejections: usize,
    /// Number of tiles collapsed to a single configuration
    pub collapses: usize,
}

/// Local-consistency propagation over the scoped tile states
///
/// Owns the scope stack and the solve-order counter so that the search layer
/// can open and discard scopes around propagation runs.
#[derive(Debug)]
pub struct Propagator<'a> {
    board: &'a Board,
    store: TileStore<'a>,
    order: SolveOrder,
    /// Work counters accumulated across runs
    pub stats: PropagationStats,
}

impl<'a> Propagator<'a> {
    /// Create a propagator over a board and its canonical states
    pub const fn new(board: &'a Board, states: &'a mut [TileState]) -> Self {
        Self {
            board,
            store: TileStore::new(states),
            order: SolveOrder::new(),
            stats: PropagationStats {
                runs: 0,
                tiles_examined: 0,
                rejections: 0,
                collapses: 0,
            },
        }
    }

    /// The layout being solved
    pub const fn board(&self) -> &'a Board {
        self.board
    }

    /// Scoped tile states
    pub const fn store(&self) -> &TileStore<'a> {
        &self.store
    }

    /// Mutable scoped tile states
    pub const fn store_mut(&mut self) -> &mut TileStore<'a> {
        &mut self.store
    }

    /// Solve-order counter
    pub const fn order(&self) -> SolveOrder {
        self.order
    }

    /// Apply every tile whose domain is already a single configuration
    ///
    /// Tiles whose rotations all coincide start out determined and are never
    /// examined by propagation, so their stubs are joined here.
    ///
    /// # Errors
    ///
    /// Returns the first contradiction raised while applying
    pub fn settle_fixed(&mut self) -> Result<(), Contradiction> {
        let fixed: Vec<TileId> = self
            .board
            .ids()
            .filter(|&id| self.store.domain_len(id) == 1 && !self.store.is_applied(id))
            .collect();
        for id in fixed {
            self.apply_configuration(id)?;
        }
        Ok(())
    }

    /// Propagate from every undetermined tile in row-major order
    ///
    /// # Errors
    ///
    /// Returns the contradiction that aborted the pass
    pub fn propagate_all(&mut self) -> Result<usize, Contradiction> {
        let seeds: Vec<TileId> = self
            .board
            .ids()
            .filter(|&id| self.store.domain_len(id) > 1)
            .collect();
        self.propagate(seeds)
    }

    /// Propagate from a tile and its undetermined neighbors
    ///
    /// # Errors
    ///
    /// Returns the contradiction that aborted the pass
    pub fn propagate_from(&mut self, id: TileId) -> Result<usize, Contradiction> {
        let mut seeds = vec![id];
        seeds.extend(self.undetermined_neighbors(id));
        self.propagate(seeds)
    }

    /// Run the worklist until a fixpoint or a contradiction
    ///
    /// Returns the number of tiles whose domain shrank.
    ///
    /// # Errors
    ///
    /// Returns the contradiction that aborted the pass
    pub fn propagate<I>(&mut self, seeds: I) -> Result<usize, Contradiction>
    where
        I: IntoIterator<Item = TileId>,
    {
        self.stats.runs += 1;
        let mut worklist: VecDeque<TileId> = seeds.into_iter().collect();
        let mut changed = 0;

        while let Some(id) = worklist.pop_front() {
            if self.store.domain_len(id) <= 1 {
                continue;
            }
            self.stats.tiles_examined += 1;

            let candidates = self
                .store
                .read(id)
                .map(|state| state.possible_configurations.to_vec())
                .unwrap_or_default();
            let rejected: Vec<Configuration> = candidates
                .into_iter()
                .filter(|&configuration| !self.configuration_feasible(id, configuration))
                .collect();
            if rejected.is_empty() {
                continue;
            }

            let remaining = match self.store.write(id) {
                Some(state) => {
                    for &configuration in &rejected {
                        state.possible_configurations.remove(configuration);
                    }
                    state.possible_configurations.len()
                }
                None => continue,
            };
            self.stats.rejections += rejected.len();
            changed += 1;

            match remaining {
                0 => return Err(Contradiction::new(id, ContradictionKind::EmptyDomain)),
                1 => self.apply_configuration(id)?,
                _ => {}
            }
            worklist.extend(self.undetermined_neighbors(id));
        }

        Ok(changed)
    }

    fn undetermined_neighbors(&self, id: TileId) -> Vec<TileId> {
        self.board
            .tile(id)
            .map(|tile| {
                tile.neighbors()
                    .iter()
                    .flatten()
                    .copied()
                    .filter(|&neighbor| self.store.domain_len(neighbor) > 1)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Test one candidate configuration against every neighbor direction
    ///
    /// A stub may not point off the board, a stub towards an undetermined
    /// neighbor may not close a loop or seal an incomplete component, and the
    /// neighbor must keep at least one configuration agreeing on the shared
    /// edge.
    pub fn configuration_feasible(&mut self, id: TileId, configuration: Configuration) -> bool {
        let board = self.board;
        let Some(tile) = board.tile(id) else {
            return false;
        };

        for (slot, neighbor) in tile.neighbors().iter().enumerate() {
            let connected = is_connection(configuration, slot);
            let Some(neighbor) = *neighbor else {
                if connected {
                    return false;
                }
                continue;
            };

            if connected
                && self.store.domain_len(neighbor) > 1
                && self.store.merge_check(id, neighbor) != MergeCheck::Open
            {
                return false;
            }

            let Some(reverse) = tile.reverse_slot(slot) else {
                return false;
            };
            if !self.connection_possible(neighbor, reverse, connected) {
                return false;
            }
        }
        true
    }

    /// Whether any remaining configuration of `id` agrees with `connected` in `slot`
    pub fn connection_possible(&self, id: TileId, slot: usize, connected: bool) -> bool {
        self.store.read(id).is_some_and(|state| {
            state
                .possible_configurations
                .iter()
                .any(|configuration| is_connection(configuration, slot) == connected)
        })
    }

    /// Fix a tile to the given configuration and apply it
    ///
    /// # Errors
    ///
    /// Returns the contradiction raised while applying
    pub fn assign(&mut self, id: TileId, configuration: Configuration) -> Result<(), Contradiction> {
        let slots = self.board.slots();
        let Some(state) = self.store.write(id) else {
            return Err(Contradiction::new(id, ContradictionKind::EmptyDomain));
        };
        state.possible_configurations = ConfigurationSet::single(configuration, slots);
        self.apply_configuration(id)
    }

    /// Record a tile that just collapsed to one configuration
    ///
    /// Assigns its solve order, checks it against neighbors that are already
    /// applied, and joins it to every connected neighbor that is not. Applied
    /// neighbors were joined when they collapsed themselves.
    ///
    /// # Errors
    ///
    /// Returns a contradiction when the configuration points off the board,
    /// disagrees with an applied neighbor, would close a loop, or has no
    /// stubs on a board with other tiles
    pub fn apply_configuration(&mut self, id: TileId) -> Result<(), Contradiction> {
        let board = self.board;
        let Some(configuration) = self
            .store
            .read(id)
            .and_then(|state| state.possible_configurations.only())
        else {
            return Err(Contradiction::new(id, ContradictionKind::EmptyDomain));
        };
        let Some(tile) = board.tile(id) else {
            return Err(Contradiction::new(id, ContradictionKind::EmptyDomain));
        };

        if self.store.is_applied(id) {
            return Ok(());
        }
        // A tile without stubs is a sealed component of its own
        if connection_count(configuration) == 0 && self.store.tile_count() > 1 {
            return Err(Contradiction::new(id, ContradictionKind::ClosedLoop));
        }
        let order = self.order.assign();
        if let Some(state) = self.store.write(id) {
            state.solve_order = Some(order);
        }
        self.stats.collapses += 1;

        for (slot, neighbor) in tile.neighbors().iter().enumerate() {
            let connected = is_connection(configuration, slot);
            let Some(neighbor) = *neighbor else {
                if connected {
                    return Err(Contradiction::new(id, ContradictionKind::OffGrid));
                }
                continue;
            };

            if self.store.is_applied(neighbor) {
                let agrees = tile.reverse_slot(slot).is_some_and(|reverse| {
                    self.store
                        .read(neighbor)
                        .and_then(|state| state.possible_configurations.only())
                        .is_some_and(|other| is_connection(other, reverse) == connected)
                });
                if !agrees {
                    return Err(Contradiction::new(id, ContradictionKind::Disagreement));
                }
                continue;
            }

            if connected {
                match self.store.union(id, neighbor) {
                    Ok(Union::Merged(_)) => {}
                    Ok(Union::AlreadyJoined) | Err(_) => {
                        return Err(Contradiction::new(id, ContradictionKind::ClosedLoop));
                    }
                }
            }
        }
        Ok(())
    }

    /// Whether the current effective state is a complete spanning solution
    pub fn is_complete(&mut self, id: TileId) -> bool {
        self.store.component_size(id) == self.store.tile_count() && self.store.all_determined()
    }
}
