//! Tests for union-find merging, loop detection and exit accounting

#[cfg(test)]
mod tests {
    use hexpipes::algorithm::connectivity::{ClosedLoop, MergeCheck, Union};
    use hexpipes::algorithm::overlay::TileStore;
    use hexpipes::spatial::{Puzzle, TileId, Topology};
    use ndarray::{Array2, array};

    /// Every tile sees every other tile: slot `k` points `k + 1` tiles ahead
    fn ring(configurations: &[u8], slots: usize) -> Puzzle {
        let count = configurations.len();
        let grid = Array2::from_shape_vec((1, count), configurations.to_vec()).unwrap();
        Puzzle::with_adjacency(slots, &grid, move |x, _, slot| {
            Some(((x + slot + 1) % count, 0))
        })
        .unwrap()
    }

    // Tests a third edge inside a joined component is reported as a loop
    // Verified by skipping the same-root check in union
    #[test]
    fn test_same_component_detected() {
        let mut puzzle = ring(&[3, 3, 3], 2);
        let (_, states) = puzzle.split_mut();
        let mut store = TileStore::new(states);

        assert_eq!(store.union(TileId(0), TileId(1)), Ok(Union::Merged(TileId(0))));
        assert_eq!(store.union(TileId(1), TileId(2)), Ok(Union::Merged(TileId(0))));
        assert_eq!(
            store.merge_check(TileId(0), TileId(2)),
            MergeCheck::SameComponent
        );
        assert_eq!(store.union(TileId(0), TileId(2)), Ok(Union::AlreadyJoined));
        assert_eq!(store.component_size(TileId(2)), 3);
    }

    // Tests a merge that uses up every exit is accepted when it spans the board
    // Verified by refusing every zero-exit merge
    #[test]
    fn test_spanning_merge_accepted() {
        let mut puzzle = ring(&[3, 1, 1], 2);
        let (_, states) = puzzle.split_mut();
        let mut store = TileStore::new(states);

        assert!(store.union(TileId(0), TileId(1)).is_ok());
        assert_eq!(store.merge_check(TileId(0), TileId(2)), MergeCheck::Open);
        assert!(store.union(TileId(0), TileId(2)).is_ok());

        let root = store.find(TileId(2));
        let state = store.read(root).unwrap();
        assert_eq!(state.component_size, 3);
        assert_eq!(state.component_exits, 0);
    }

    // Tests a sealing merge is refused without touching state
    // Verified by writing the child's parent before checking exits
    #[test]
    fn test_sealing_merge_refused() {
        let mut puzzle = ring(&[3, 1, 1, 1], 3);
        let (_, states) = puzzle.split_mut();
        let mut store = TileStore::new(states);

        assert!(store.union(TileId(0), TileId(1)).is_ok());
        assert_eq!(store.merge_check(TileId(0), TileId(2)), MergeCheck::SealsLoop);
        assert_eq!(
            store.union(TileId(0), TileId(2)),
            Err(ClosedLoop { root: TileId(0) })
        );

        assert_eq!(store.find(TileId(2)), TileId(2));
        assert_eq!(store.component_size(TileId(0)), 2);
        assert_eq!(store.component_size(TileId(2)), 1);
        assert_eq!(store.read(TileId(0)).unwrap().component_exits, 1);
    }

    // Tests two dead ends may only meet when they are the whole board
    #[test]
    fn test_dead_ends_meeting() {
        let mut pair = Puzzle::new(Topology::Hexagonal, &array![[4_u8, 1]]).unwrap();
        let mut pair_store = TileStore::new(pair.split_mut().1);
        assert_eq!(pair_store.merge_check(TileId(0), TileId(1)), MergeCheck::Open);

        let mut larger = ring(&[1, 1, 1, 1], 3);
        let mut ring_store = TileStore::new(larger.split_mut().1);
        assert_eq!(
            ring_store.merge_check(TileId(0), TileId(1)),
            MergeCheck::SealsLoop
        );
    }

    // Tests find compresses paths to point directly at the root
    // Verified by removing the compression loop
    #[test]
    fn test_path_compression() {
        let mut puzzle = ring(&[3, 3, 3, 3], 3);
        let (_, states) = puzzle.split_mut();
        let mut store = TileStore::new(states);

        assert!(store.union(TileId(0), TileId(1)).is_ok());
        assert!(store.union(TileId(2), TileId(3)).is_ok());
        assert!(store.union(TileId(0), TileId(2)).is_ok());

        assert_eq!(store.read(TileId(3)).unwrap().component, TileId(2));
        assert_eq!(store.find(TileId(3)), TileId(0));
        assert_eq!(store.read(TileId(3)).unwrap().component, TileId(0));
        assert_eq!(store.component_size(TileId(3)), 4);
    }
}
