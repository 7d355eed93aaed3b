//! The move maker and its undo journal.
//!
//! Every primitive edit made while applying a move is recorded as a
//! reversible journal entry. A logical move is bracketed by a start marker
//! and any number of primitive records; unmaking pops entries until the
//! marker is consumed, so make and unmake are both O(size of the move).

use crate::position::{CastleRights, Position};
use tabiya_core::{File, Move, MoveKind, Piece, Square};

/// One reversible primitive edit.
#[derive(Debug, Clone, Copy)]
enum Undo {
    /// Marks the start of a move; restoring it flips the side to move.
    Start,
    /// Restores a square to its previous occupant.
    SetSquare {
        square: Square,
        piece: Option<Piece>,
    },
    /// Restores a cleared en-passant file.
    SetEnPassant(File),
    /// Clears an en-passant file that was set by the move.
    ClearEnPassant,
    /// Restores the previous castle rights.
    SetCastle(CastleRights),
}

/// Castle rights invalidated by a move touching each square.
const fn castle_masks() -> [u8; 64] {
    let mut masks = [0u8; 64];
    masks[Square::A1.index() as usize] = CastleRights::WHITE_QUEENSIDE.bits();
    masks[Square::E1.index() as usize] =
        CastleRights::WHITE_KINGSIDE.bits() | CastleRights::WHITE_QUEENSIDE.bits();
    masks[Square::H1.index() as usize] = CastleRights::WHITE_KINGSIDE.bits();
    masks[Square::A8.index() as usize] = CastleRights::BLACK_QUEENSIDE.bits();
    masks[Square::E8.index() as usize] =
        CastleRights::BLACK_KINGSIDE.bits() | CastleRights::BLACK_QUEENSIDE.bits();
    masks[Square::H8.index() as usize] = CastleRights::BLACK_KINGSIDE.bits();
    masks
}

const CASTLE_MASKS: [u8; 64] = castle_masks();

/// Applies and reverts moves on a [`Position`] through the journal.
#[derive(Debug, Clone)]
pub(crate) struct MoveMaker {
    journal: Vec<Undo>,
    en_passant_was_clear: bool,
}

impl Default for MoveMaker {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveMaker {
    pub(crate) fn new() -> Self {
        MoveMaker {
            journal: Vec::with_capacity(128),
            en_passant_was_clear: true,
        }
    }

    /// Drops all recorded history.
    pub(crate) fn reset(&mut self) {
        self.journal.clear();
        self.en_passant_was_clear = true;
    }

    /// Applies `mv` to `position`, recording how to revert it.
    ///
    /// [`Move::NULL`] is ignored: no journal entry, no state change.
    pub(crate) fn make(&mut self, position: &mut Position, mv: Move) {
        if mv == Move::NULL {
            return;
        }
        position.flip_side_to_move();
        self.journal.push(Undo::Start);
        self.clear_en_passant(position);

        let from = mv.from();
        let to = mv.to();
        match mv.kind() {
            MoveKind::CastleKingside => {
                self.move_piece(position, from.offset(3), from.offset(1));
            }
            MoveKind::CastleQueenside => {
                self.move_piece(position, from.offset(-4), from.offset(-1));
            }
            MoveKind::EnPassantPossible => {
                self.set_en_passant(position, to.file());
            }
            MoveKind::EnPassantCapture => {
                let captured = Square::new(to.file(), from.rank());
                self.set_piece(position, captured, None);
            }
            MoveKind::Promotion => {
                // Rewrite the pawn before the final move so the plain
                // move below carries the promoted piece.
                self.set_piece(position, from, mv.promotes_to());
            }
            MoveKind::Normal => {}
        }
        self.move_piece(position, from, to);

        let castle = position.castle();
        let touched = CastleRights::new(
            CASTLE_MASKS[from.index() as usize] | CASTLE_MASKS[to.index() as usize],
        );
        if castle.intersects(touched) {
            self.set_castle(position, castle.without(touched));
        }
    }

    /// Reverts the most recent move; a no-op if nothing has been made.
    pub(crate) fn unmake(&mut self, position: &mut Position) {
        while let Some(undo) = self.journal.pop() {
            match undo {
                Undo::Start => {
                    position.flip_side_to_move();
                    return;
                }
                Undo::SetSquare { square, piece } => position.set_piece(square, piece),
                Undo::SetEnPassant(file) => position.set_en_passant(file),
                Undo::ClearEnPassant => position.clear_en_passant(),
                Undo::SetCastle(castle) => position.set_castle(castle),
            }
        }
    }

    fn set_piece(&mut self, position: &mut Position, square: Square, piece: Option<Piece>) {
        self.journal.push(Undo::SetSquare {
            square,
            piece: position.piece_at(square),
        });
        position.set_piece(square, piece);
    }

    /// Always records both squares, so unmake never branches on whether
    /// the destination held a capture.
    fn move_piece(&mut self, position: &mut Position, from: Square, to: Square) {
        let moving = position.piece_at(from);
        self.journal.push(Undo::SetSquare {
            square: from,
            piece: moving,
        });
        self.journal.push(Undo::SetSquare {
            square: to,
            piece: position.piece_at(to),
        });
        position.set_piece(to, moving);
        position.set_piece(from, None);
    }

    fn clear_en_passant(&mut self, position: &mut Position) {
        match position.en_passant() {
            None => self.en_passant_was_clear = true,
            Some(file) => {
                self.en_passant_was_clear = false;
                self.journal.push(Undo::SetEnPassant(file));
                position.clear_en_passant();
            }
        }
    }

    fn set_en_passant(&mut self, position: &mut Position, file: File) {
        if self.en_passant_was_clear {
            self.journal.push(Undo::ClearEnPassant);
        }
        position.set_en_passant(file);
    }

    fn set_castle(&mut self, position: &mut Position, castle: CastleRights) {
        self.journal.push(Undo::SetCastle(position.castle()));
        position.set_castle(castle);
    }
}
