//! Solve results per tile and the solution file format

use crate::algorithm::propagation::PropagationStats;
use crate::algorithm::search::SearchStats;
use crate::io::error::{Result, WithPath};
use crate::math::rotation::{Configuration, RotationPlan, required_rotations};
use crate::spatial::Puzzle;
use std::fmt;
use std::path::Path;

/// Overall outcome of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Every tile has exactly one configuration
    Solved,
    /// Some tiles are still ambiguous
    Partial,
    /// The puzzle admits no solution
    Inconsistent,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solved => write!(f, "solved"),
            Self::Partial => write!(f, "partial"),
            Self::Inconsistent => write!(f, "inconsistent"),
        }
    }
}

/// What is known about one tile after solving
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The tile has a single configuration
    Determined {
        /// Configuration the tile must end up in
        target: Configuration,
        /// Clockwise steps from the observed configuration
        rotations: usize,
        /// Shortest way to apply those steps
        plan: RotationPlan,
        /// Order in which the tile was determined, if it was tracked
        solve_order: Option<usize>,
    },
    /// More than one configuration remains
    Ambiguous {
        /// Remaining configurations, ascending
        candidates: Vec<Configuration>,
    },
    /// Every configuration was ruled out
    Empty,
}

/// Result for a single tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileResult {
    /// Column of the tile
    pub x: usize,
    /// Row of the tile
    pub y: usize,
    /// Configuration as observed before solving
    pub initial_configuration: Configuration,
    /// What the solver settled on
    pub resolution: Resolution,
}

impl TileResult {
    /// Clockwise steps to apply, if the tile is determined
    pub const fn rotations(&self) -> Option<usize> {
        match self.resolution {
            Resolution::Determined { rotations, .. } => Some(rotations),
            _ => None,
        }
    }

    const fn solve_order(&self) -> Option<usize> {
        match self.resolution {
            Resolution::Determined { solve_order, .. } => solve_order,
            _ => None,
        }
    }
}

/// Work counters gathered during a solve
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SolveStats {
    /// Propagation counters
    pub propagation: PropagationStats,
    /// Search counters, when backtracking ran
    pub search: Option<SearchStats>,
}

/// Order in which tiles are listed in a solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileOrder {
    /// Row by row, alternating direction so consecutive tiles stay adjacent
    #[default]
    Scan,
    /// The order in which tiles became determined
    Solve,
}

/// Complete outcome of solving a puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    /// Overall outcome
    pub status: SolveStatus,
    /// One entry per tile in row-major order
    pub tiles: Vec<TileResult>,
    /// Work counters
    pub stats: SolveStats,
}

impl SolveReport {
    /// Collect the per-tile results of a solved or partially solved puzzle
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::NoRotation` if a determined configuration is not
    /// a rotation of the observed one
    pub fn from_puzzle(puzzle: &Puzzle, status: SolveStatus, stats: SolveStats) -> Result<Self> {
        let board = puzzle.board();
        let slots = board.slots();
        let mut tiles = Vec::with_capacity(board.tile_count());

        for id in board.ids() {
            let (Some(tile), Some(state)) = (board.tile(id), puzzle.state(id)) else {
                continue;
            };
            let candidates = state.possible_configurations.to_vec();
            let resolution = match candidates.as_slice() {
                [] => Resolution::Empty,
                [target] => {
                    let rotations = required_rotations(tile.initial_configuration, *target, slots)?;
                    Resolution::Determined {
                        target: *target,
                        rotations,
                        plan: RotationPlan::for_rotations(rotations, slots),
                        solve_order: state.solve_order,
                    }
                }
                _ => Resolution::Ambiguous { candidates },
            };
            tiles.push(TileResult {
                x: tile.x,
                y: tile.y,
                initial_configuration: tile.initial_configuration,
                resolution,
            });
        }

        Ok(Self {
            status,
            tiles,
            stats,
        })
    }

    /// Result for the tile at the given coordinates
    pub fn tile_at(&self, x: usize, y: usize) -> Option<&TileResult> {
        self.tiles.iter().find(|tile| tile.x == x && tile.y == y)
    }

    /// Tiles in the order they became determined
    ///
    /// Tiles without a solve order follow in scan order.
    pub fn in_solve_order(&self) -> Vec<&TileResult> {
        let mut tiles: Vec<&TileResult> = self.in_scan_order();
        tiles.sort_by_key(|tile| tile.solve_order().unwrap_or(usize::MAX));
        tiles
    }

    /// Tiles row by row, left to right on even rows and right to left on odd rows
    pub fn in_scan_order(&self) -> Vec<&TileResult> {
        let mut tiles: Vec<&TileResult> = self.tiles.iter().collect();
        tiles.sort_by_key(|tile| {
            let column = if tile.y % 2 == 0 {
                tile.x
            } else {
                usize::MAX - tile.x
            };
            (tile.y, column)
        });
        tiles
    }

    /// Tiles in the requested order
    pub fn ordered(&self, order: TileOrder) -> Vec<&TileResult> {
        match order {
            TileOrder::Scan => self.in_scan_order(),
            TileOrder::Solve => self.in_solve_order(),
        }
    }

    /// Number of tiles that need at least one turn
    pub fn turns_needed(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.rotations().is_some_and(|rotations| rotations > 0))
            .count()
    }

    /// Render the solution file text
    pub fn render(&self, order: TileOrder) -> String {
        let mut out = format!("status {}\n", self.status);
        for tile in self.ordered(order) {
            let mut fields = vec![
                tile.x.to_string(),
                tile.y.to_string(),
                format!("{:02x}", tile.initial_configuration),
            ];
            match &tile.resolution {
                Resolution::Determined {
                    target,
                    rotations,
                    plan,
                    solve_order,
                } => {
                    let direction = if plan.counter_clockwise { "ccw" } else { "cw" };
                    fields.extend([
                        format!("{target:02x}"),
                        rotations.to_string(),
                        plan.clicks.to_string(),
                        direction.to_string(),
                        solve_order.map_or_else(|| "-".to_string(), |rank| rank.to_string()),
                    ]);
                }
                Resolution::Ambiguous { candidates } => {
                    fields.push("?".to_string());
                    fields.extend(candidates.iter().map(|candidate| format!("{candidate:02x}")));
                }
                Resolution::Empty => fields.push("!".to_string()),
            }
            out.push_str(&fields.join(" "));
            out.push('\n');
        }
        out
    }

    /// Write the solution file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn write(&self, path: &Path, order: TileOrder) -> Result<()> {
        std::fs::write(path, self.render(order)).with_path(path, "write solution")
    }
}
