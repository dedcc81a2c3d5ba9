//! Mathematical utilities for the solver

/// Cyclic rotation arithmetic over direction bitmasks
pub mod rotation;
