//! Zobrist position hashing.
//!
//! The hash of a position is the XOR of precomputed 62-bit keys for every
//! occupied square, the side to move, the castle rights, and the
//! en-passant file. The key table is built at compile time from a fixed
//! generator, so every build of the library produces identical hashes;
//! the fixture tests below pin the values.

use crate::position::Position;

const PIECE_KEYS: usize = 16 * 64;

/// The additive-feedback generator behind BSD `random(3)` with a 256-byte
/// state: trinomial x^63 + x + 1, reduced to 31-bit outputs.
#[derive(Clone, Copy)]
struct RandomState {
    words: [u32; 63],
    front: usize,
    rear: usize,
}

/// Seeds the generator with 1 and performs the generator's standard
/// warm-up of ten outputs per state word.
const fn seeded() -> RandomState {
    let mut words = [0u32; 63];
    words[0] = 1;
    let mut word: i64 = 1;
    let mut index = 1;
    while index < 63 {
        // Schrage's method for 16807 * word mod (2^31 - 1).
        let hi = word / 127773;
        let lo = word % 127773;
        word = 16807 * lo - 2836 * hi;
        if word < 0 {
            word += 2147483647;
        }
        words[index] = word as u32;
        index += 1;
    }
    let mut state = RandomState {
        words,
        front: 1,
        rear: 0,
    };
    let mut discard = 0;
    while discard < 10 * 63 {
        let (next_state, _) = next_random(state);
        state = next_state;
        discard += 1;
    }
    state
}

const fn next_random(mut state: RandomState) -> (RandomState, u32) {
    let sum = state.words[state.front].wrapping_add(state.words[state.rear]);
    state.words[state.front] = sum;
    state.front += 1;
    if state.front == 63 {
        state.front = 0;
    }
    state.rear += 1;
    if state.rear == 63 {
        state.rear = 0;
    }
    (state, sum >> 1)
}

/// Two 31-bit outputs concatenated into one 62-bit key.
const fn next_key(state: RandomState) -> (RandomState, u64) {
    let (state, high) = next_random(state);
    let (state, low) = next_random(state);
    (state, (high as u64) << 31 | low as u64)
}

struct ZobristKeys {
    /// One key per (piece code, square) pair, including the unused codes
    /// so the generator stream stays aligned.
    pieces: [u64; PIECE_KEYS],
    /// Side-to-move keys; index 1 is white to move.
    turns: [u64; 2],
    /// One key per castle-rights combination.
    castle: [u64; 16],
    /// En-passant keys; index 0 means none, 1-8 are files a-h.
    en_passant: [u64; 9],
}

const fn build_keys() -> ZobristKeys {
    let mut keys = ZobristKeys {
        pieces: [0; PIECE_KEYS],
        turns: [0; 2],
        castle: [0; 16],
        en_passant: [0; 9],
    };
    let mut state = seeded();
    let mut index = 0;
    while index < PIECE_KEYS {
        let (next_state, key) = next_key(state);
        state = next_state;
        keys.pieces[index] = key;
        index += 1;
    }
    let mut index = 0;
    while index < 2 {
        let (next_state, key) = next_key(state);
        state = next_state;
        keys.turns[index] = key;
        index += 1;
    }
    let mut index = 0;
    while index < 16 {
        let (next_state, key) = next_key(state);
        state = next_state;
        keys.castle[index] = key;
        index += 1;
    }
    let mut index = 0;
    while index < 9 {
        let (next_state, key) = next_key(state);
        state = next_state;
        keys.en_passant[index] = key;
        index += 1;
    }
    keys
}

static ZOBRIST: ZobristKeys = build_keys();

impl Position {
    /// Returns the 64-bit identity hash of this position, suitable for
    /// transposition tables.
    ///
    /// Two positions hash equal when they agree on every square, the side
    /// to move, the castle rights, and the en-passant file.
    pub fn hash(&self) -> u64 {
        let mut result = 0u64;
        for (piece, square) in self.pieces() {
            result ^= ZOBRIST.pieces[piece.code() * 64 + square.index() as usize];
        }
        result ^= ZOBRIST.turns[self.side_to_move().is_white() as usize];
        result ^= ZOBRIST.castle[self.castle().bits() as usize];
        result ^= match self.en_passant() {
            None => ZOBRIST.en_passant[0],
            Some(file) => ZOBRIST.en_passant[file.index() as usize + 1],
        };
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use tabiya_core::{Move, Square};

    #[test]
    fn fixture_hashes() {
        let position =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").unwrap();
        assert_eq!(position.hash(), 3973843602409076421);

        let position = Position::from_fen("8/8/8/8/3KPpk1/8/8/8 b - e3").unwrap();
        assert_eq!(position.hash(), 739132817695691147);
    }

    #[test]
    fn every_state_feature_changes_the_hash() {
        let base = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -")
            .unwrap();

        let mut other = base.clone();
        other.flip_side_to_move();
        assert_ne!(base.hash(), other.hash());

        let mut other = base.clone();
        other.set_castle(crate::position::CastleRights::NONE);
        assert_ne!(base.hash(), other.hash());

        let mut other = base.clone();
        other.set_en_passant(tabiya_core::File::E);
        assert_ne!(base.hash(), other.hash());

        let mut other = base.clone();
        let e2 = Square::from_algebraic("e2").unwrap();
        other.set_piece(e2, None);
        assert_ne!(base.hash(), other.hash());
    }

    #[test]
    fn hash_is_stable_under_make_unmake() {
        let mut graph = Graph::new();
        let before = graph.hash();
        let moves = graph.legal_moves();
        for &mv in &moves {
            graph.make_move(mv);
            graph.unmake_move();
        }
        assert_eq!(graph.hash(), before);
    }

    #[test]
    fn similar_positions_hash_differently() {
        let a = Position::from_fen("rnbqkbnr/pp3ppp/4p3/2ppP3/3P2Q1/8/PPP2PPP/RNB1KBNR b KQkq -")
            .unwrap();
        let b = Position::from_fen("rnbqkbnr/pp3ppp/4p3/2ppP3/3P4/4B3/PPP2PPP/RN1QKBNR b KQkq -")
            .unwrap();
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn transpositions_hash_equal() {
        let mut a = Graph::new();
        let mut b = Graph::new();
        let mv = |s: &str, t: &str| {
            Move::new(
                Square::from_algebraic(s).unwrap(),
                Square::from_algebraic(t).unwrap(),
            )
        };
        // the same knight development reached in either order
        a.make_move(mv("g1", "f3"));
        a.make_move(mv("g8", "f6"));
        a.make_move(mv("b1", "c3"));
        a.make_move(mv("b8", "c6"));
        b.make_move(mv("b1", "c3"));
        b.make_move(mv("b8", "c6"));
        b.make_move(mv("g1", "f3"));
        b.make_move(mv("g8", "f6"));
        assert_eq!(a.hash(), b.hash());
    }
}
