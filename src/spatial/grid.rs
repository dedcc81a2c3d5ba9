//! Board geometry, neighbor adjacency and the puzzle container
//!
//! The board is built once from a rectangular grid of observed configurations.
//! Adjacency comes from a [`Topology`] or from a caller-supplied closure and is
//! checked for reciprocity up front, so the solver can rely on every neighbor
//! having a slot that points back.

use crate::io::configuration::{HEXAGONAL_SLOTS, MAX_PUZZLE_DIMENSION, MAX_SLOTS, SQUARE_SLOTS};
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::math::rotation::Configuration;
use crate::spatial::tiles::{Tile, TileId, TileState};
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

/// Regular grid layouts with a built-in neighbor rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// Six slots per tile, rows offset by half a tile on odd rows
    #[default]
    Hexagonal,
    /// Four slots per tile: east, south, west, north
    Square,
}

impl Topology {
    /// Number of direction slots per tile
    pub const fn slots(self) -> usize {
        match self {
            Self::Hexagonal => HEXAGONAL_SLOTS,
            Self::Square => SQUARE_SLOTS,
        }
    }

    /// Coordinates of the neighbor in `slot`, before bounds checking
    ///
    /// Hexagonal slots run east, south-east, south-west, west, north-west,
    /// north-east. Odd rows sit half a tile to the right.
    pub fn neighbor(self, x: usize, y: usize, slot: usize) -> Option<(usize, usize)> {
        match self {
            Self::Hexagonal => {
                let even = y % 2 == 0;
                match slot {
                    0 => Some((x + 1, y)),
                    1 => Some((if even { x } else { x + 1 }, y + 1)),
                    2 => Some((if even { x.checked_sub(1)? } else { x }, y + 1)),
                    3 => Some((x.checked_sub(1)?, y)),
                    4 => Some((if even { x.checked_sub(1)? } else { x }, y.checked_sub(1)?)),
                    5 => Some((if even { x } else { x + 1 }, y.checked_sub(1)?)),
                    _ => None,
                }
            }
            Self::Square => match slot {
                0 => Some((x + 1, y)),
                1 => Some((x, y + 1)),
                2 => Some((x.checked_sub(1)?, y)),
                3 => Some((x, y.checked_sub(1)?)),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hexagonal => write!(f, "hexagonal"),
            Self::Square => write!(f, "square"),
        }
    }
}

impl FromStr for Topology {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hexagonal" | "hex" => Ok(Self::Hexagonal),
            "square" => Ok(Self::Square),
            other => Err(invalid_parameter(
                "topology",
                &other,
                &"expected 'hexagonal' or 'square'",
            )),
        }
    }
}

/// Fixed layout of a puzzle: tiles, adjacency and coordinate lookup
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    slots: usize,
    tiles: Vec<Tile>,
    lookup: Array2<Option<TileId>>,
}

impl Board {
    /// Build a board from a grid of configurations indexed `[y, x]`
    ///
    /// `adjacency(x, y, slot)` names the coordinates of the neighbor in each
    /// slot; coordinates outside the grid count as a board edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot count or dimensions are out of range, a
    /// configuration does not fit in `slots` bits, or a neighbor relation is
    /// not reciprocal
    pub fn with_adjacency<F>(
        slots: usize,
        configurations: &Array2<Configuration>,
        adjacency: F,
    ) -> Result<Self>
    where
        F: Fn(usize, usize, usize) -> Option<(usize, usize)>,
    {
        if slots == 0 || slots > MAX_SLOTS {
            return Err(invalid_parameter(
                "slots",
                &slots,
                &format!("must be between 1 and {MAX_SLOTS}"),
            ));
        }
        let (height, width) = configurations.dim();
        if width == 0 || height == 0 || width > MAX_PUZZLE_DIMENSION || height > MAX_PUZZLE_DIMENSION
        {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{width}x{height}"),
                &format!("each side must be between 1 and {MAX_PUZZLE_DIMENSION}"),
            ));
        }

        let mut lookup = Array2::from_elem((height, width), None);
        for ((y, x), entry) in lookup.indexed_iter_mut() {
            *entry = Some(TileId(y * width + x));
        }

        let mut tiles = Vec::with_capacity(width * height);
        for ((y, x), &configuration) in configurations.indexed_iter() {
            if usize::from(configuration) >> slots != 0 {
                return Err(PuzzleError::InvalidConfiguration {
                    tile: (x, y),
                    configuration,
                    slots,
                });
            }
            let neighbors = (0..slots)
                .map(|slot| {
                    adjacency(x, y, slot)
                        .and_then(|(nx, ny)| lookup.get([ny, nx]).copied().flatten())
                })
                .collect();
            tiles.push(Tile::new(x, y, configuration, neighbors));
        }

        let mut board = Self {
            width,
            height,
            slots,
            tiles,
            lookup,
        };
        board.link_reverse_slots()?;
        Ok(board)
    }

    /// Build a board using a built-in topology
    ///
    /// # Errors
    ///
    /// Same conditions as [`Board::with_adjacency`]
    pub fn new(topology: Topology, configurations: &Array2<Configuration>) -> Result<Self> {
        Self::with_adjacency(topology.slots(), configurations, |x, y, slot| {
            topology.neighbor(x, y, slot)
        })
    }

    fn link_reverse_slots(&mut self) -> Result<()> {
        let mut links = Vec::new();
        for tile in &self.tiles {
            let id = self.tile_at(tile.x, tile.y);
            for (slot, neighbor) in tile.neighbors().iter().enumerate() {
                let Some(neighbor) = *neighbor else {
                    continue;
                };
                let Some(other) = self.tile(neighbor) else {
                    continue;
                };
                let reverse = other
                    .neighbors()
                    .iter()
                    .position(|&candidate| candidate.is_some() && candidate == id);
                match reverse {
                    Some(reverse) => links.push((tile.y * self.width + tile.x, slot, reverse)),
                    None => {
                        return Err(PuzzleError::Topology {
                            tile: (tile.x, tile.y),
                            slot,
                            neighbor: (other.x, other.y),
                        });
                    }
                }
            }
        }
        for (index, slot, reverse) in links {
            if let Some(tile) = self.tiles.get_mut(index) {
                tile.set_reverse_slot(slot, reverse);
            }
        }
        Ok(())
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Direction slots per tile
    pub const fn slots(&self) -> usize {
        self.slots
    }

    /// Total number of tiles
    pub const fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tile geometry by id
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Tile id at grid coordinates
    pub fn tile_at(&self, x: usize, y: usize) -> Option<TileId> {
        self.lookup.get([y, x]).copied().flatten()
    }

    /// All tile ids in row-major scan order
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.lookup.iter().filter_map(|id| *id)
    }

    /// All tiles in row-major scan order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

/// A board together with the canonical solver state of every tile
#[derive(Debug, Clone)]
pub struct Puzzle {
    board: Board,
    states: Vec<TileState>,
}

impl Puzzle {
    /// Build a puzzle from a configuration grid indexed `[y, x]`
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be built
    pub fn new(topology: Topology, configurations: &Array2<Configuration>) -> Result<Self> {
        Ok(Self::from_board(Board::new(topology, configurations)?))
    }

    /// Build a puzzle with a custom neighbor rule
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be built
    pub fn with_adjacency<F>(
        slots: usize,
        configurations: &Array2<Configuration>,
        adjacency: F,
    ) -> Result<Self>
    where
        F: Fn(usize, usize, usize) -> Option<(usize, usize)>,
    {
        Ok(Self::from_board(Board::with_adjacency(
            slots,
            configurations,
            adjacency,
        )?))
    }

    /// Wrap a board with fresh per-tile state
    pub fn from_board(board: Board) -> Self {
        let states = board
            .tiles()
            .iter()
            .enumerate()
            .map(|(index, tile)| TileState::initial(TileId(index), tile))
            .collect();
        Self { board, states }
    }

    /// The fixed layout
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Canonical state of a tile
    pub fn state(&self, id: TileId) -> Option<&TileState> {
        self.states.get(id.index())
    }

    /// Canonical states in arena order
    pub fn states(&self) -> &[TileState] {
        &self.states
    }

    /// Borrow the layout and the mutable canonical states together
    pub fn split_mut(&mut self) -> (&Board, &mut [TileState]) {
        (&self.board, &mut self.states)
    }

    /// Whether every tile has exactly one configuration left
    pub fn is_solved(&self) -> bool {
        self.states.iter().all(TileState::is_determined)
    }

    /// Number of tiles with more than one configuration left
    pub fn undetermined_count(&self) -> usize {
        self.states
            .iter()
            .filter(|state| state.possible_configurations.len() > 1)
            .count()
    }
}
