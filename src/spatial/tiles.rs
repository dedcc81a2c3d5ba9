//! Tile identity, fixed tile geometry and mutable per-tile solver state
//!
//! A tile is split in two: [`Tile`] holds what never changes after the board
//! is built (position, observed configuration, adjacency), while
//! [`TileState`] holds what the solver narrows down and what a search scope
//! copies on first write.

use crate::algorithm::bitset::ConfigurationSet;
use crate::math::rotation::{Configuration, connection_count};
use std::fmt;

/// Stable arena index of a tile on its board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

impl TileId {
    /// Position of the tile in the board's arena
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable geometry of one tile
#[derive(Debug, Clone)]
pub struct Tile {
    /// Column of the tile
    pub x: usize,
    /// Row of the tile
    pub y: usize,
    /// Configuration as observed before solving
    pub initial_configuration: Configuration,
    neighbors: Vec<Option<TileId>>,
    reverse_slots: Vec<Option<usize>>,
}

impl Tile {
    /// Create a tile with its neighbor in every slot (`None` past the board edge)
    ///
    /// Reverse slots start unknown and are filled in by the board once every
    /// tile exists.
    pub fn new(
        x: usize,
        y: usize,
        initial_configuration: Configuration,
        neighbors: Vec<Option<TileId>>,
    ) -> Self {
        let reverse_slots = vec![None; neighbors.len()];
        Self {
            x,
            y,
            initial_configuration,
            neighbors,
            reverse_slots,
        }
    }

    /// Neighbor in every slot
    pub fn neighbors(&self) -> &[Option<TileId>] {
        &self.neighbors
    }

    /// Neighbor in a single slot
    pub fn neighbor(&self, slot: usize) -> Option<TileId> {
        self.neighbors.get(slot).copied().flatten()
    }

    /// Slot on the neighbor in `slot` that points back at this tile
    pub fn reverse_slot(&self, slot: usize) -> Option<usize> {
        self.reverse_slots.get(slot).copied().flatten()
    }

    pub(crate) fn set_reverse_slot(&mut self, slot: usize, reverse: usize) {
        if let Some(entry) = self.reverse_slots.get_mut(slot) {
            *entry = Some(reverse);
        }
    }

    /// Number of direction slots
    pub const fn slots(&self) -> usize {
        self.neighbors.len()
    }
}

/// Mutable solver state of one tile
///
/// Union-find fields are only meaningful on a component root; on other tiles
/// `component_size` and `component_exits` are stale leftovers of the last time
/// the tile was a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileState {
    /// Configurations not yet ruled out
    pub possible_configurations: ConfigurationSet,
    /// Union-find parent
    pub component: TileId,
    /// Number of tiles in the component (valid on roots)
    pub component_size: usize,
    /// Open pipe ends across the component (valid on roots)
    pub component_exits: u32,
    /// Order in which the tile became determined
    pub solve_order: Option<usize>,
}

impl TileState {
    /// Fresh state for a tile: full rotation orbit, singleton component
    pub fn initial(id: TileId, tile: &Tile) -> Self {
        Self {
            possible_configurations: ConfigurationSet::orbit(
                tile.initial_configuration,
                tile.slots(),
            ),
            component: id,
            component_size: 1,
            component_exits: connection_count(tile.initial_configuration),
            solve_order: None,
        }
    }

    /// Whether exactly one configuration remains
    pub fn is_determined(&self) -> bool {
        self.possible_configurations.len() == 1
    }
}
