//! Constraint propagation and backtracking solver for rotatable pipe tile puzzles
//!
//! Every tile carries pipe stubs towards some of its neighbors and may only be
//! rotated. The solver finds the rotations that join all tiles into one
//! network with no loops and no stub left open.

#![forbid(unsafe_code)]

/// Propagation, connectivity tracking, speculative search and solver strategies
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Rotation arithmetic over direction bitmasks
pub mod math;
/// Board geometry, tiles and per-tile solver state
pub mod spatial;

pub use io::error::{PuzzleError, Result};
