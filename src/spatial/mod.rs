//! Spatial data structures
//!
//! This module contains the puzzle's graph model:
//! - Tile identity, geometry and mutable solver state
//! - Board adjacency for regular grids and the puzzle container

/// Board geometry, topologies and the puzzle container
pub mod grid;
/// Tile identity, geometry and per-tile solver state
pub mod tiles;

pub use grid::{Board, Puzzle, Topology};
pub use tiles::{Tile, TileId, TileState};
