//! Tests for topologies, board construction and adjacency validation

#[cfg(test)]
mod tests {
    use hexpipes::PuzzleError;
    use hexpipes::spatial::{Board, Puzzle, TileId, Topology};
    use ndarray::{Array2, array};

    // Tests hexagonal neighbors on even and odd rows
    // Verified by offsetting even rows instead of odd rows
    #[test]
    fn test_hexagonal_neighbors() {
        let hex = Topology::Hexagonal;
        assert_eq!(hex.neighbor(1, 0, 0), Some((2, 0)));
        assert_eq!(hex.neighbor(1, 0, 1), Some((1, 1)));
        assert_eq!(hex.neighbor(1, 0, 2), Some((0, 1)));
        assert_eq!(hex.neighbor(1, 1, 1), Some((2, 2)));
        assert_eq!(hex.neighbor(1, 1, 2), Some((1, 2)));
        assert_eq!(hex.neighbor(1, 1, 4), Some((1, 0)));
        assert_eq!(hex.neighbor(1, 1, 5), Some((2, 0)));
        assert_eq!(hex.neighbor(0, 0, 3), None);
        assert_eq!(hex.neighbor(0, 0, 5), None);
        assert_eq!(hex.neighbor(0, 0, 6), None);
    }

    // Tests square neighbors run east, south, west, north
    #[test]
    fn test_square_neighbors() {
        let square = Topology::Square;
        assert_eq!(square.slots(), 4);
        assert_eq!(square.neighbor(1, 1, 0), Some((2, 1)));
        assert_eq!(square.neighbor(1, 1, 1), Some((1, 2)));
        assert_eq!(square.neighbor(1, 1, 2), Some((0, 1)));
        assert_eq!(square.neighbor(1, 1, 3), Some((1, 0)));
    }

    // Tests topology names parse and print
    #[test]
    fn test_topology_names() {
        assert_eq!("hex".parse::<Topology>().unwrap(), Topology::Hexagonal);
        assert_eq!(" Square ".parse::<Topology>().unwrap(), Topology::Square);
        assert!("triangle".parse::<Topology>().is_err());
        assert_eq!(Topology::Hexagonal.to_string(), "hexagonal");
    }

    // Tests neighbor slots point back at each other
    // Verified by storing the forward slot as the reverse slot
    #[test]
    fn test_reverse_slots() {
        let grid = Array2::<u8>::zeros((3, 3));
        let board = Board::new(Topology::Hexagonal, &grid).unwrap();

        for tile in board.tiles() {
            for slot in 0..board.slots() {
                let Some(neighbor) = tile.neighbor(slot) else {
                    continue;
                };
                let reverse = tile.reverse_slot(slot).unwrap();
                assert_eq!(reverse, (slot + 3) % 6);
                let back = board.tile(neighbor).unwrap().neighbor(reverse).unwrap();
                assert_eq!(board.tile(back).unwrap().x, tile.x);
                assert_eq!(board.tile(back).unwrap().y, tile.y);
            }
        }
    }

    // Tests a one-sided neighbor relation is rejected
    // Verified by skipping reciprocity validation
    #[test]
    fn test_non_reciprocal_adjacency() {
        let grid = array![[1_u8, 1]];
        let result = Board::with_adjacency(2, &grid, |x, _, slot| {
            (x == 0 && slot == 0).then_some((1, 0))
        });
        match result {
            Err(PuzzleError::Topology {
                tile,
                slot,
                neighbor,
            }) => {
                assert_eq!(tile, (0, 0));
                assert_eq!(slot, 0);
                assert_eq!(neighbor, (1, 0));
            }
            _ => unreachable!("Expected Topology error type"),
        }
    }

    // Tests configurations wider than the slot count are rejected
    #[test]
    fn test_configuration_too_wide() {
        let result = Board::new(Topology::Square, &array![[1_u8, 16]]);
        assert!(matches!(
            result,
            Err(PuzzleError::InvalidConfiguration {
                tile: (1, 0),
                configuration: 16,
                slots: 4
            })
        ));
    }

    // Tests empty grids and oversized slot counts are rejected
    #[test]
    fn test_invalid_dimensions() {
        let empty = Array2::<u8>::zeros((0, 3));
        assert!(Board::new(Topology::Hexagonal, &empty).is_err());

        let grid = array![[0_u8]];
        assert!(Board::with_adjacency(9, &grid, |_, _, _| None).is_err());
        assert!(Board::with_adjacency(0, &grid, |_, _, _| None).is_err());
    }

    // Tests lookup and scan order agree with row-major ids
    #[test]
    fn test_lookup_and_ids() {
        let board = Board::new(Topology::Hexagonal, &Array2::<u8>::zeros((2, 3))).unwrap();
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 2);
        assert_eq!(board.tile_count(), 6);
        assert_eq!(board.tile_at(2, 1), Some(TileId(5)));
        assert_eq!(board.tile_at(3, 0), None);

        let ids: Vec<TileId> = board.ids().collect();
        assert_eq!(ids, (0..6).map(TileId).collect::<Vec<_>>());
    }

    // Tests a fresh puzzle starts with full orbits and nothing solved
    #[test]
    fn test_puzzle_initial_state() {
        let puzzle = Puzzle::new(Topology::Hexagonal, &array![[1_u8, 63]]).unwrap();
        assert!(!puzzle.is_solved());
        assert_eq!(puzzle.undetermined_count(), 1);
        assert_eq!(puzzle.states().len(), 2);
        assert_eq!(puzzle.state(TileId(1)).unwrap().component_exits, 6);
    }
}
