//! SAN round-trip acceptance tests.
//!
//! Every legal move of every position in a shallow search tree must
//! render to SAN and parse back to exactly the same move. The root is the
//! promotion-heavy perft position, which exercises disambiguation,
//! captures, promotions, castling, and checks.

use tabiya_engine::Graph;

const ROOT: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -";

fn assert_san_round_trips(graph: &mut Graph) {
    let moves = graph.legal_moves();
    for &mv in &moves {
        let san = graph.move_to_san(mv);
        let parsed = graph.move_from_san(&san);
        assert_eq!(
            parsed,
            Ok(mv),
            "notation {} in {}",
            san,
            graph.to_fen()
        );
    }
}

#[test]
fn san_round_trips_at_the_root() {
    let mut graph = Graph::from_fen(ROOT).unwrap();
    assert_san_round_trips(&mut graph);
}

#[test]
fn san_round_trips_two_plies_deep() {
    let mut graph = Graph::from_fen(ROOT).unwrap();
    for depth in 1..=2 {
        graph.dfs(depth, &mut assert_san_round_trips);
    }
}

#[test]
#[ignore]
fn san_round_trips_three_plies_deep() {
    let mut graph = Graph::from_fen(ROOT).unwrap();
    graph.dfs(3, &mut assert_san_round_trips);
}

#[test]
fn san_round_trips_from_the_starting_position() {
    let mut graph = Graph::new();
    for depth in 1..=2 {
        graph.dfs(depth, &mut assert_san_round_trips);
    }
}
