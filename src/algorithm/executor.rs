use crate::{
    algorithm::bitset::ConfigurationSet,
    algorithm::propagation::Propagator,
    algorithm::search::{Backtracker, DepthPolicy, SearchOutcome},
    io::configuration::DEFAULT_SEED,
    io::error::Result,
    io::report::{SolveReport, SolveStats, SolveStatus},
    io::trace::SearchTrace,
    spatial::{Puzzle, TileId},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Strategy used to resolve a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SolverKind {
    /// Constraint propagation only
    Logic,
    /// Propagation followed by backtracking search
    #[default]
    #[value(name = "bt")]
    Backtrack,
    /// Pick one rotation per tile at random and check the result
    Random,
}

/// Parameters of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Strategy to use
    pub kind: SolverKind,
    /// Search depth policy for backtracking
    pub depth_policy: DepthPolicy,
    /// Seed for the random strategy
    pub seed: u64,
    /// Whether to capture search events
    pub trace: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            kind: SolverKind::default(),
            depth_policy: DepthPolicy::default(),
            seed: DEFAULT_SEED,
            trace: false,
        }
    }
}

/// Runs the configured strategy over a puzzle and reports the outcome
#[derive(Debug, Default)]
pub struct Solver {
    config: SolverConfig,
    trace: Option<SearchTrace>,
}

impl Solver {
    /// Create a solver with the given parameters
    pub const fn new(config: SolverConfig) -> Self {
        Self {
            config,
            trace: None,
        }
    }

    /// Parameters in use
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Search events captured by the last solve, if tracing was enabled
    pub const fn trace(&self) -> Option<&SearchTrace> {
        self.trace.as_ref()
    }

    /// Solve the puzzle in place and summarize every tile
    ///
    /// The puzzle's canonical states hold the outcome afterwards: a solved
    /// puzzle has a single configuration per tile, a partial one keeps every
    /// configuration that could not be ruled out.
    ///
    /// # Errors
    ///
    /// Returns an error if a determined configuration cannot be mapped back
    /// to a rotation of the observed tile
    pub fn solve(&mut self, puzzle: &mut Puzzle) -> Result<SolveReport> {
        self.trace = None;
        let (status, stats) = match self.config.kind {
            SolverKind::Random => self.solve_random(puzzle),
            SolverKind::Logic | SolverKind::Backtrack => self.solve_logic(puzzle),
        };
        SolveReport::from_puzzle(puzzle, status, stats)
    }

    fn solve_logic(&mut self, puzzle: &mut Puzzle) -> (SolveStatus, SolveStats) {
        let (board, states) = puzzle.split_mut();
        let mut propagator = Propagator::new(board, states);

        let fixpoint = propagator
            .settle_fixed()
            .and_then(|()| propagator.propagate_all());
        if fixpoint.is_err() {
            return (
                SolveStatus::Inconsistent,
                SolveStats {
                    propagation: propagator.stats,
                    search: None,
                },
            );
        }

        if self.config.kind == SolverKind::Logic {
            let status = if propagator.store().all_determined() {
                SolveStatus::Solved
            } else {
                SolveStatus::Partial
            };
            return (
                status,
                SolveStats {
                    propagation: propagator.stats,
                    search: None,
                },
            );
        }

        let mut backtracker = Backtracker::new(propagator);
        if self.config.trace {
            backtracker.enable_trace();
        }
        let outcome = backtracker.solve(self.config.depth_policy);
        self.trace = backtracker.trace.take();

        let status = match outcome {
            SearchOutcome::Solved => SolveStatus::Solved,
            SearchOutcome::Contradiction => SolveStatus::Inconsistent,
            SearchOutcome::Exhausted => SolveStatus::Partial,
        };
        let search = backtracker.stats;
        (
            status,
            SolveStats {
                propagation: backtracker.propagator().stats,
                search: Some(search),
            },
        )
    }

    fn solve_random(&self, puzzle: &mut Puzzle) -> (SolveStatus, SolveStats) {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let (board, states) = puzzle.split_mut();
        let slots = board.slots();

        for state in states.iter_mut() {
            let candidates = state.possible_configurations.to_vec();
            if candidates.is_empty() {
                continue;
            }
            let pick = rng.random_range(0..candidates.len());
            if let Some(&configuration) = candidates.get(pick) {
                state.possible_configurations = ConfigurationSet::single(configuration, slots);
            }
        }

        let mut propagator = Propagator::new(board, states);
        let consistent = propagator.settle_fixed().is_ok()
            && propagator.is_complete(TileId(0));
        let status = if consistent {
            SolveStatus::Solved
        } else {
            SolveStatus::Inconsistent
        };
        (
            status,
            SolveStats {
                propagation: propagator.stats,
                search: None,
            },
        )
    }
}
