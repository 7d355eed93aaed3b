//! Randomized properties over legal game walks.

use proptest::prelude::*;
use tabiya_engine::{Graph, Position};

/// Plays a pseudo-random legal walk selected by `picks`, returning the
/// graph and the number of moves actually made.
fn random_walk(picks: &[u8]) -> (Graph, usize) {
    let mut graph = Graph::new();
    let mut made = 0;
    for &pick in picks {
        let moves = graph.legal_moves();
        if moves.is_empty() {
            break;
        }
        graph.make_move(moves[pick as usize % moves.len()]);
        made += 1;
    }
    (graph, made)
}

proptest! {
    #[test]
    fn make_unmake_restores_everything(picks in prop::collection::vec(any::<u8>(), 0..80)) {
        let start = Position::new();
        let start_hash = start.hash();
        let (mut graph, made) = random_walk(&picks);

        for _ in 0..made {
            prop_assert!(graph.unmake_move().is_some());
        }
        prop_assert!(graph.unmake_move().is_none());
        prop_assert_eq!(graph.position(), &start);
        prop_assert_eq!(graph.hash(), start_hash);
    }

    #[test]
    fn fen_round_trips_on_reached_positions(picks in prop::collection::vec(any::<u8>(), 0..60)) {
        let (graph, _) = random_walk(&picks);
        let fen = graph.to_fen();
        let reparsed = Position::from_fen(&fen).unwrap();
        prop_assert_eq!(&reparsed, graph.position());
        prop_assert_eq!(reparsed.to_fen(), fen);
        prop_assert_eq!(reparsed.hash(), graph.hash());
    }

    #[test]
    fn san_round_trips_on_reached_positions(picks in prop::collection::vec(any::<u8>(), 0..40)) {
        let (mut graph, _) = random_walk(&picks);
        let moves = graph.legal_moves();
        for &mv in &moves {
            let san = graph.move_to_san(mv);
            prop_assert_eq!(graph.move_from_san(&san), Ok(mv));
        }
    }

    #[test]
    fn legal_moves_are_a_subset_of_pseudo_moves(picks in prop::collection::vec(any::<u8>(), 0..60)) {
        let (mut graph, _) = random_walk(&picks);
        let mut pseudo = Vec::new();
        tabiya_engine::movegen::pseudo_legal_moves(graph.position(), &mut |m| pseudo.push(m));
        let mut castles = Vec::new();
        tabiya_engine::movegen::castle_moves(graph.position(), &mut |m| castles.push(m));
        let legal = graph.legal_moves();
        for &mv in &legal {
            prop_assert!(pseudo.contains(&mv) || castles.contains(&mv));
        }
        prop_assert!(legal.len() <= pseudo.len() + castles.len());
    }
}
