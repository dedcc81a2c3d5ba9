//! Tests for solver strategies and the reports they produce

#[cfg(test)]
mod tests {
    use hexpipes::algorithm::executor::{Solver, SolverConfig, SolverKind};
    use hexpipes::algorithm::search::DepthPolicy;
    use hexpipes::io::configuration::DEFAULT_SEED;
    use hexpipes::io::report::{Resolution, SolveStatus};
    use hexpipes::spatial::{Puzzle, Topology};
    use ndarray::{Array2, array};

    fn hexagonal(grid: &Array2<u8>) -> Puzzle {
        Puzzle::new(Topology::Hexagonal, grid).unwrap()
    }

    fn solver(kind: SolverKind) -> Solver {
        Solver::new(SolverConfig {
            kind,
            ..SolverConfig::default()
        })
    }

    // Tests default configuration backtracks one level deep
    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.kind, SolverKind::Backtrack);
        assert_eq!(config.depth_policy, DepthPolicy::Fixed(1));
        assert_eq!(config.seed, DEFAULT_SEED);
        assert!(!config.trace);
    }

    // Tests propagation alone solves a forced puzzle
    #[test]
    fn test_logic_solves_forced_pair() {
        let mut puzzle = hexagonal(&array![[4, 1]]);
        let report = solver(SolverKind::Logic).solve(&mut puzzle).unwrap();

        assert_eq!(report.status, SolveStatus::Solved);
        assert_eq!(report.tiles[0].rotations(), Some(4));
        assert_eq!(report.tiles[1].rotations(), Some(3));
        assert!(report.stats.search.is_none());
    }

    // Tests propagation alone leaves the ambiguous block partial
    // Verified by reporting Solved whenever no contradiction occurs
    #[test]
    fn test_logic_partial() {
        let mut puzzle = hexagonal(&array![[1, 3], [3, 1]]);
        let report = solver(SolverKind::Logic).solve(&mut puzzle).unwrap();

        assert_eq!(report.status, SolveStatus::Partial);
        assert_eq!(
            report.tiles[1].resolution,
            Resolution::Ambiguous {
                candidates: vec![6, 12]
            }
        );
    }

    // Tests backtracking completes the ambiguous block
    #[test]
    fn test_backtrack_solves_block() {
        let mut puzzle = hexagonal(&array![[1, 3], [3, 1]]);
        let mut backtrack = Solver::new(SolverConfig {
            trace: true,
            ..SolverConfig::default()
        });
        let report = backtrack.solve(&mut puzzle).unwrap();

        assert_eq!(report.status, SolveStatus::Solved);
        assert_eq!(report.stats.search.map(|stats| stats.commits), Some(1));
        assert!(backtrack.trace().is_some());
    }

    // Tests a contradiction in the first fixpoint is reported as inconsistent
    #[test]
    fn test_inconsistent_puzzle() {
        let mut puzzle = hexagonal(&array![[3, 1]]);
        let report = solver(SolverKind::Backtrack).solve(&mut puzzle).unwrap();

        assert_eq!(report.status, SolveStatus::Inconsistent);
        assert_eq!(report.tiles[0].resolution, Resolution::Empty);
    }

    // Tests the random strategy is reproducible for a fixed seed
    // Verified by seeding from entropy
    #[test]
    fn test_random_deterministic() {
        let grid = array![[1, 3, 9], [3, 1, 1]];
        let mut first = hexagonal(&grid);
        let mut second = hexagonal(&grid);

        let report_a = solver(SolverKind::Random).solve(&mut first).unwrap();
        let report_b = solver(SolverKind::Random).solve(&mut second).unwrap();

        assert_eq!(report_a.tiles, report_b.tiles);
        assert!(
            report_a
                .tiles
                .iter()
                .all(|tile| matches!(tile.resolution, Resolution::Determined { .. }))
        );
    }

    // Tests a random guess on a trivially solved board is accepted
    #[test]
    fn test_random_single_tile() {
        let mut puzzle = hexagonal(&array![[0]]);
        let report = solver(SolverKind::Random).solve(&mut puzzle).unwrap();
        assert_eq!(report.status, SolveStatus::Solved);
    }

    // Tests every strategy rejects a board of tiles without stubs
    // Verified by reporting Solved once every domain is a singleton
    #[test]
    fn test_stubless_pair_is_inconsistent() {
        for kind in [SolverKind::Logic, SolverKind::Backtrack, SolverKind::Random] {
            let mut puzzle = hexagonal(&array![[0, 0]]);
            let report = solver(kind).solve(&mut puzzle).unwrap();
            assert_eq!(report.status, SolveStatus::Inconsistent, "{kind:?}");
        }
    }
}
