//! Tests for per-tile results, tile ordering and the solution file format

#[cfg(test)]
mod tests {
    use hexpipes::PuzzleError;
    use hexpipes::algorithm::bitset::ConfigurationSet;
    use hexpipes::algorithm::executor::{Solver, SolverConfig, SolverKind};
    use hexpipes::io::report::{SolveReport, SolveStats, SolveStatus, TileOrder};
    use hexpipes::spatial::{Puzzle, Topology};
    use ndarray::{Array2, array};
    use std::fs;
    use tempfile::TempDir;

    fn solve(grid: &Array2<u8>, kind: SolverKind) -> SolveReport {
        let mut puzzle = Puzzle::new(Topology::Hexagonal, grid).unwrap();
        Solver::new(SolverConfig {
            kind,
            ..SolverConfig::default()
        })
        .solve(&mut puzzle)
        .unwrap()
    }

    // Tests determined tiles list target, rotations, plan and solve order
    // Verified by printing clockwise plans for every rotation
    #[test]
    fn test_render_solved() {
        let report = solve(&array![[4, 1]], SolverKind::Logic);
        assert_eq!(
            report.render(TileOrder::Scan),
            "status solved\n0 0 04 01 4 2 ccw 0\n1 0 01 08 3 3 cw 1\n"
        );
        assert_eq!(report.turns_needed(), 2);
    }

    // Tests ambiguous tiles list their candidates and odd rows run backwards
    #[test]
    fn test_render_partial() {
        let report = solve(&array![[1, 3], [3, 1]], SolverKind::Logic);
        assert_eq!(
            report.render(TileOrder::Scan),
            "status partial\n\
             0 0 01 ? 01 02\n\
             1 0 03 ? 06 0c\n\
             1 1 01 ? 08 10\n\
             0 1 03 ? 21 30\n"
        );
        assert_eq!(report.turns_needed(), 0);
    }

    // Tests emptied tiles are marked
    #[test]
    fn test_render_inconsistent() {
        let report = solve(&array![[3, 1]], SolverKind::Logic);
        let text = report.render(TileOrder::Scan);
        assert!(text.starts_with("status inconsistent\n0 0 03 !\n"));
    }

    // Tests solve order follows determination rather than position
    // Verified by sorting on scan position only
    #[test]
    fn test_solve_order() {
        let report = solve(&array![[1, 3], [3, 1]], SolverKind::Backtrack);

        let scan: Vec<(usize, usize)> = report
            .in_scan_order()
            .iter()
            .map(|tile| (tile.x, tile.y))
            .collect();
        assert_eq!(scan, vec![(0, 0), (1, 0), (1, 1), (0, 1)]);

        let solved: Vec<(usize, usize)> = report
            .ordered(TileOrder::Solve)
            .iter()
            .map(|tile| (tile.x, tile.y))
            .collect();
        assert_eq!(solved, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(report.tile_at(0, 1).unwrap().rotations(), Some(5));
    }

    // Tests a determined configuration outside the orbit is an error
    #[test]
    fn test_no_rotation() {
        let mut puzzle = Puzzle::new(Topology::Hexagonal, &array![[1, 1]]).unwrap();
        let (_, states) = puzzle.split_mut();
        states[0].possible_configurations = ConfigurationSet::single(3, 6);

        let result = SolveReport::from_puzzle(&puzzle, SolveStatus::Solved, SolveStats::default());
        assert!(matches!(result, Err(PuzzleError::NoRotation { .. })));
    }

    // Tests the solution file is written in full
    #[test]
    fn test_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pair_solution.txt");
        let report = solve(&array![[4, 1]], SolverKind::Backtrack);

        report.write(&path, TileOrder::Solve).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            report.render(TileOrder::Solve)
        );
        assert_eq!(SolveStatus::Partial.to_string(), "partial");
    }
}
