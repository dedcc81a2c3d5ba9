//! Solver constants and runtime configuration defaults

/// Largest supported number of direction slots per tile (configurations are `u8`)
pub const MAX_SLOTS: usize = 8;

/// Slots per tile on a hexagonal grid
pub const HEXAGONAL_SLOTS: usize = 6;

/// Slots per tile on a square grid
pub const SQUARE_SLOTS: usize = 4;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_PUZZLE_DIMENSION: usize = 1_000;

// Default values for configurable parameters
/// Search depth used when none is given
pub const DEFAULT_SEARCH_DEPTH: usize = 1;

/// Fixed seed for the random solver
pub const DEFAULT_SEED: u64 = 42;

// File conventions
/// Extension of puzzle description files
pub const PUZZLE_EXTENSION: &str = "pipes";
/// Suffix added to solution filenames
pub const OUTPUT_SUFFIX: &str = "_solution";
/// Extension of solution files
pub const OUTPUT_EXTENSION: &str = "txt";
/// Comment marker in puzzle files
pub const COMMENT_MARKER: char = '#';
/// Header keyword selecting the topology in puzzle files
pub const TOPOLOGY_KEYWORD: &str = "topology";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Spinner refresh interval in milliseconds
pub const SPINNER_TICK_MS: u64 = 80;
