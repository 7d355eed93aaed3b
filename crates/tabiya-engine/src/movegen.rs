//! Pseudo-legal move generation.
//!
//! The generators emit every move that satisfies piece motion and
//! same-color capture rules, without checking whether the mover's king is
//! left safe; the graph applies that filter with a make/test/unmake pass.
//! Each generator writes its candidates to a caller-supplied sink.

use crate::position::Position;
use crate::rays::Rays;
use tabiya_core::{Color, Direction, File, Move, Piece, Rank, Square};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so a fixed-size array
/// avoids heap allocation on the hot path.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Capacity bound; no legal chess position comes close.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if the list contains `m`.
    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Emits every pseudo-legal piece move for the side to move, in mailbox
/// order (a1 first), to `sink`. Castling is not included; see
/// [`castle_moves`].
pub fn pseudo_legal_moves<F: FnMut(Move)>(position: &Position, sink: &mut F) {
    for (piece, square) in position.active_pieces() {
        if piece.is_slider() {
            slider_moves(position, piece, square, sink);
        } else if piece.is_steper() {
            steper_moves(position, piece, square, sink);
        } else {
            pawn_moves(position, piece.color(), square, sink);
        }
    }
}

/// Emits the castle moves allowed by [`Position::can_castle`], kingside
/// first. These are fully legal, not merely pseudo-legal.
pub fn castle_moves<F: FnMut(Move)>(position: &Position, sink: &mut F) {
    let allowed = position.can_castle();
    if allowed.is_empty() {
        return;
    }
    let us = position.side_to_move();
    let king_square = match us {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    };
    if allowed.intersects(crate::position::CastleRights::kingside(us)) {
        sink(Move::castle_kingside(king_square));
    }
    if allowed.intersects(crate::position::CastleRights::queenside(us)) {
        sink(Move::castle_queenside(king_square));
    }
}

fn steper_moves<F: FnMut(Move)>(position: &Position, piece: Piece, from: Square, sink: &mut F) {
    let mut rays = match piece.to_white() {
        Piece::WhiteKing => Rays::king(),
        _ => Rays::knight(),
    };
    rays.start_from(from);
    while let Some(direction) = rays.next_direction() {
        let to = from.step(direction);
        match position.piece_at(to) {
            None => sink(Move::new(from, to)),
            Some(target) if target.color() != piece.color() => sink(Move::new(from, to)),
            Some(_) => {}
        }
    }
}

fn slider_moves<F: FnMut(Move)>(position: &Position, piece: Piece, from: Square, sink: &mut F) {
    let mut rays = match piece.to_white() {
        Piece::WhiteQueen => Rays::queen(),
        Piece::WhiteRook => Rays::rook(),
        _ => Rays::bishop(),
    };
    rays.start_from(from);
    while let Some(direction) = rays.next_direction() {
        let mut to = from;
        loop {
            to = to.step(direction);
            match position.piece_at(to) {
                None => sink(Move::new(from, to)),
                Some(target) => {
                    if target.color() != piece.color() {
                        sink(Move::new(from, to));
                    }
                    break;
                }
            }
            if !rays.can_continue_through(to) {
                break;
            }
        }
    }
}

/// Per-color pawn geometry, held as two parallel configurations so the
/// generator never branches on color square by square.
struct PawnRules {
    forward: i8,
    diagonal_queenside: i8,
    diagonal_kingside: i8,
    enemy_pawn: Piece,
    starting_rank: Rank,
    second_to_last_rank: Rank,
    capture_en_passant_from_rank: Rank,
    capture_en_passant_to_rank: Rank,
}

const WHITE_PAWN_RULES: PawnRules = PawnRules {
    forward: Direction::North.delta(),
    diagonal_queenside: Direction::NorthWest.delta(),
    diagonal_kingside: Direction::NorthEast.delta(),
    enemy_pawn: Piece::BlackPawn,
    starting_rank: Rank::R2,
    second_to_last_rank: Rank::R7,
    capture_en_passant_from_rank: Rank::R5,
    capture_en_passant_to_rank: Rank::R6,
};

const BLACK_PAWN_RULES: PawnRules = PawnRules {
    forward: Direction::South.delta(),
    diagonal_queenside: Direction::SouthWest.delta(),
    diagonal_kingside: Direction::SouthEast.delta(),
    enemy_pawn: Piece::WhitePawn,
    starting_rank: Rank::R7,
    second_to_last_rank: Rank::R2,
    capture_en_passant_from_rank: Rank::R4,
    capture_en_passant_to_rank: Rank::R3,
};

fn pawn_moves<F: FnMut(Move)>(position: &Position, color: Color, from: Square, sink: &mut F) {
    let rules = match color {
        Color::White => &WHITE_PAWN_RULES,
        Color::Black => &BLACK_PAWN_RULES,
    };
    let from_file = from.file();
    let from_rank = from.rank();

    let to_forward = from.offset(rules.forward);
    let can_move_forward = position.piece_at(to_forward).is_none();

    let to_queenside = (from_file != File::A).then(|| from.offset(rules.diagonal_queenside));
    let can_capture_queenside = to_queenside.is_some_and(|to| {
        position
            .piece_at(to)
            .is_some_and(|target| target.color() != color)
    });

    let to_kingside = (from_file != File::H).then(|| from.offset(rules.diagonal_kingside));
    let can_capture_kingside = to_kingside.is_some_and(|to| {
        position
            .piece_at(to)
            .is_some_and(|target| target.color() != color)
    });

    // The double-step square only exists for a pawn on its starting rank.
    let mut can_move_forward_two = false;
    let mut en_passant_possible = false;
    if can_move_forward && from_rank == rules.starting_rank {
        let to_forward_two = from.offset(rules.forward * 2);
        can_move_forward_two = position.piece_at(to_forward_two).is_none();
        // A double step only opens the en-passant window when an enemy
        // pawn stands beside the destination square.
        if can_move_forward_two {
            if from_file != File::A {
                en_passant_possible =
                    position.piece_at(to_forward_two.offset(-1)) == Some(rules.enemy_pawn);
            }
            if !en_passant_possible && from_file != File::H {
                en_passant_possible =
                    position.piece_at(to_forward_two.offset(1)) == Some(rules.enemy_pawn);
            }
        }
    }

    let en_passant_capture = (from_rank == rules.capture_en_passant_from_rank)
        .then(|| position.en_passant())
        .flatten()
        .filter(|file| file.distance(from_file) == 1);

    if from_rank == rules.second_to_last_rank {
        if can_move_forward {
            promotion_moves(color, from, to_forward, sink);
        }
        if can_capture_queenside {
            if let Some(to) = to_queenside {
                promotion_moves(color, from, to, sink);
            }
        }
        if can_capture_kingside {
            if let Some(to) = to_kingside {
                promotion_moves(color, from, to, sink);
            }
        }
        return;
    }

    if can_move_forward {
        sink(Move::new(from, to_forward));
    }
    if can_move_forward_two {
        let to_forward_two = from.offset(rules.forward * 2);
        if en_passant_possible {
            sink(Move::en_passant_possible(from, to_forward_two));
        } else {
            sink(Move::new(from, to_forward_two));
        }
    }
    if can_capture_queenside {
        if let Some(to) = to_queenside {
            sink(Move::new(from, to));
        }
    }
    if can_capture_kingside {
        if let Some(to) = to_kingside {
            sink(Move::new(from, to));
        }
    }
    if let Some(file) = en_passant_capture {
        let to = Square::new(file, rules.capture_en_passant_to_rank);
        sink(Move::en_passant_capture(from, to));
    }
}

fn promotion_moves<F: FnMut(Move)>(color: Color, from: Square, to: Square, sink: &mut F) {
    sink(Move::promotion(from, to, Piece::queen(color)));
    sink(Move::promotion(from, to, Piece::rook(color)));
    sink(Move::promotion(from, to, Piece::bishop(color)));
    sink(Move::promotion(from, to, Piece::knight(color)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabiya_core::MoveKind;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn pseudo(position: &Position) -> MoveList {
        let mut moves = MoveList::new();
        pseudo_legal_moves(position, &mut |m| moves.push(m));
        moves
    }

    #[test]
    fn startpos_has_twenty_pseudo_moves() {
        let moves = pseudo(&Position::new());
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn pawn_double_step_tags_en_passant_only_beside_enemy_pawn() {
        // plain double step: no enemy pawn on e4's flanks
        let moves = pseudo(&Position::new());
        let double = moves
            .as_slice()
            .iter()
            .find(|m| m.from() == sq("e2") && m.to() == sq("e4"))
            .copied()
            .unwrap();
        assert_eq!(double.kind(), MoveKind::Normal);

        // with a black pawn on d4 the double step opens the window
        let mut position = Position::new();
        position.set_piece(sq("d4"), Some(Piece::BlackPawn));
        let moves = pseudo(&position);
        let double = moves
            .as_slice()
            .iter()
            .find(|m| m.from() == sq("e2") && m.to() == sq("e4"))
            .copied()
            .unwrap();
        assert_eq!(double.kind(), MoveKind::EnPassantPossible);
    }

    #[test]
    fn pawn_en_passant_capture_requires_adjacent_file() {
        let mut position = Position::empty();
        position.set_piece(sq("e5"), Some(Piece::WhitePawn));
        position.set_piece(sq("d5"), Some(Piece::BlackPawn));
        position.set_en_passant(File::D);
        let moves = pseudo(&position);
        let capture = moves
            .as_slice()
            .iter()
            .find(|m| m.kind() == MoveKind::EnPassantCapture)
            .copied()
            .unwrap();
        assert_eq!(capture.from(), sq("e5"));
        assert_eq!(capture.to(), sq("d6"));

        // a far-away en-passant file is out of reach
        position.set_en_passant(File::A);
        let moves = pseudo(&position);
        assert!(moves
            .as_slice()
            .iter()
            .all(|m| m.kind() != MoveKind::EnPassantCapture));
    }

    #[test]
    fn pawn_promotions_come_in_fours() {
        let mut position = Position::empty();
        position.set_piece(sq("a7"), Some(Piece::WhitePawn));
        position.set_piece(sq("b8"), Some(Piece::BlackRook));
        let moves = pseudo(&position);
        // push and capture, four promotions each
        assert_eq!(moves.len(), 8);
        assert!(moves
            .as_slice()
            .iter()
            .all(|m| m.kind() == MoveKind::Promotion));
        let queens = moves
            .as_slice()
            .iter()
            .filter(|m| m.promotes_to() == Some(Piece::WhiteQueen))
            .count();
        assert_eq!(queens, 2);
    }

    #[test]
    fn black_pawn_moves_run_south() {
        let mut position = Position::empty();
        position.set_piece(sq("d7"), Some(Piece::BlackPawn));
        position.set_piece(sq("c6"), Some(Piece::WhiteKnight));
        position.set_side_to_move(Color::Black);
        let moves = pseudo(&position);
        let targets: Vec<Square> = moves.as_slice().iter().map(|m| m.to()).collect();
        assert!(targets.contains(&sq("d6")));
        assert!(targets.contains(&sq("d5")));
        assert!(targets.contains(&sq("c6")));
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn knight_moves_from_corner() {
        let mut position = Position::empty();
        position.set_piece(sq("a1"), Some(Piece::WhiteKnight));
        let moves = pseudo(&position);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn slider_stops_at_blockers() {
        let mut position = Position::empty();
        position.set_piece(sq("a1"), Some(Piece::WhiteRook));
        position.set_piece(sq("a4"), Some(Piece::WhitePawn));
        position.set_piece(sq("d1"), Some(Piece::BlackBishop));
        let moves = pseudo(&position);
        let rook_targets: Vec<Square> = moves
            .as_slice()
            .iter()
            .filter(|m| m.from() == sq("a1"))
            .map(|m| m.to())
            .collect();
        // a2, a3 up the file; b1, c1, d1 along the rank (d1 is a capture)
        assert_eq!(rook_targets.len(), 5);
        assert!(rook_targets.contains(&sq("a3")));
        assert!(!rook_targets.contains(&sq("a4")));
        assert!(rook_targets.contains(&sq("d1")));
        assert!(!rook_targets.contains(&sq("e1")));
    }

    #[test]
    fn castle_moves_follow_can_castle() {
        let mut position = Position::empty();
        position.set_piece(sq("e1"), Some(Piece::WhiteKing));
        position.set_piece(sq("a1"), Some(Piece::WhiteRook));
        position.set_piece(sq("h1"), Some(Piece::WhiteRook));
        position.set_piece(sq("e8"), Some(Piece::BlackKing));
        position.set_castle(crate::position::CastleRights::ALL);

        let mut moves = MoveList::new();
        castle_moves(&position, &mut |m| moves.push(m));
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].kind(), MoveKind::CastleKingside);
        assert_eq!(moves[1].kind(), MoveKind::CastleQueenside);
    }
}
