/// Bitset of candidate configurations for a single tile
pub mod bitset;
/// Union-find over tiles with open-exit accounting
pub mod connectivity;
/// Solver strategies and the solve entry point
pub mod executor;
/// Copy-on-write tile states with speculative scopes
pub mod overlay;
/// Local consistency propagation and collapse bookkeeping
pub mod propagation;
/// Depth-bounded backtracking over speculative scopes
pub mod search;
