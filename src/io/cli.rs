//! Command-line interface for solving puzzle files in batch

use crate::algorithm::executor::{Solver, SolverConfig, SolverKind};
use crate::algorithm::search::DepthPolicy;
use crate::io::configuration::{
    DEFAULT_SEARCH_DEPTH, DEFAULT_SEED, OUTPUT_EXTENSION, OUTPUT_SUFFIX, PUZZLE_EXTENSION,
};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::puzzle_file;
use crate::io::report::{SolveStatus, TileOrder};
use crate::spatial::Topology;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "hexpipes")]
#[command(
    author,
    version,
    about = "Solve rotatable pipe tile puzzles into a single spanning network"
)]
/// Command-line arguments for the puzzle solver
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input .pipes file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Solving strategy
    #[arg(long, value_enum, default_value_t = SolverKind::Backtrack)]
    pub solver: SolverKind,

    /// Grid topology for files without a topology header
    #[arg(short, long, default_value_t = Topology::Hexagonal)]
    pub topology: Topology,

    /// Nesting depth of speculative search
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    pub depth: usize,

    /// Retry deeper after an unsolved pass, up to this depth
    #[arg(short, long)]
    pub max_depth: Option<usize>,

    /// Random seed for the random strategy
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// List tiles in the order they were determined
    #[arg(short = 'o', long)]
    pub solve_order: bool,

    /// Write a solution only when the puzzle is fully solved
    #[arg(short = 'f', long)]
    pub only_full_solution: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Write the search trace next to the solution
    #[arg(long)]
    pub trace: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Depth policy implied by `--depth` and `--max-depth`
    pub const fn depth_policy(&self) -> DepthPolicy {
        match self.max_depth {
            Some(limit) => DepthPolicy::Escalating {
                start: self.depth,
                limit,
            },
            None => DepthPolicy::Fixed(self.depth),
        }
    }

    /// Solver parameters from the command line
    pub const fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            kind: self.solver,
            depth_policy: self.depth_policy(),
            seed: self.seed,
            trace: self.trace,
        }
    }

    /// Order of tiles in written solutions
    pub const fn tile_order(&self) -> TileOrder {
        if self.solve_order {
            TileOrder::Solve
        } else {
            TileOrder::Scan
        }
    }
}

/// Orchestrates batch solving of puzzle files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// Returns the status of every processed file in processing order.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, parsing or writing fails
    pub fn process(&mut self) -> Result<Vec<(PathBuf, SolveStatus)>> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let status = self.process_file(&file)?;
            outcomes.push((file, status));
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(outcomes)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_puzzle_file(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("file must have the .{PUZZLE_EXTENSION} extension"),
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "list directory")? {
                let path = entry.with_path(target, "list directory")?.path();
                if is_puzzle_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &format!("must be a .{PUZZLE_EXTENSION} file or a directory"),
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for user feedback for puzzles left unsolved
    #[allow(clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path) -> Result<SolveStatus> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path);
        }

        let mut puzzle = puzzle_file::load(input_path)?.into_puzzle(self.cli.topology)?;
        let mut solver = Solver::new(self.cli.solver_config());
        let report = solver.solve(&mut puzzle)?;

        if let Some(trace) = solver.trace() {
            let trace_path = Self::get_trace_path(input_path);
            std::fs::write(&trace_path, trace.render()).with_path(&trace_path, "write trace")?;
        }

        if self.cli.only_full_solution && report.status != SolveStatus::Solved {
            if !self.cli.quiet {
                eprintln!(
                    "Not written: {} is {} ({} tiles undetermined)",
                    input_path.display(),
                    report.status,
                    puzzle.undetermined_count()
                );
            }
        } else {
            report.write(&Self::get_output_path(input_path), self.cli.tile_order())?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(report.status, start_time.elapsed());
        }

        Ok(report.status)
    }

    /// Path of the solution file written for a puzzle file
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, OUTPUT_SUFFIX, OUTPUT_EXTENSION)
    }

    fn get_trace_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, "_trace", OUTPUT_EXTENSION)
    }

    fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}

fn is_puzzle_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(PUZZLE_EXTENSION)
}
