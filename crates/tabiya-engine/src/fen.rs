//! FEN (Forsyth-Edwards Notation) reading and writing.

use crate::position::{CastleRights, Position};
use tabiya_core::{Color, File, Piece, Rank, Square};
use thiserror::Error;

/// Longest FEN this writer emits, including the terminator byte of
/// fixed-buffer consumers.
pub const FEN_MAX_LEN: usize = 82;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid piece placement")]
    Placement,

    #[error("invalid side to move")]
    SideToMove,

    #[error("invalid castling field")]
    Castling,

    #[error("invalid en passant field")]
    EnPassant,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Reader {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn expect_space(&mut self) -> bool {
        self.peek() == Some(b' ')
    }
}

impl Position {
    /// Parses the first four FEN fields: piece placement, side to move,
    /// castle rights, and en-passant square. Halfmove and fullmove
    /// counters, if present, are accepted and ignored.
    ///
    /// The castle field is checked against the piece placement: each
    /// declared right requires its king and rook on their home squares.
    /// The en-passant square must sit on rank 6 when white is to move and
    /// rank 3 when black is, but no capturing pawn is required.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let mut position = Position::empty();
        let mut reader = Reader::new(fen);
        read_placement(&mut position, &mut reader)?;
        read_side_to_move(&mut position, &mut reader)?;
        read_castle(&mut position, &mut reader)?;
        read_en_passant(&mut position, &mut reader)?;
        Ok(position)
    }

    /// Renders the position as a four-field FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in Rank::ALL.iter().rev() {
            let mut file_index = 0u8;
            while file_index < 8 {
                let file = match File::from_index(file_index) {
                    Some(f) => f,
                    None => break,
                };
                let square = Square::new(file, *rank);
                match self.piece_at(square) {
                    Some(piece) => {
                        fen.push(piece.to_char());
                        file_index += 1;
                    }
                    None => {
                        let mut run = 1u8;
                        while file_index + run < 8
                            && self
                                .piece_at(unsafe {
                                    Square::from_index_unchecked(square.index() + run)
                                })
                                .is_none()
                        {
                            run += 1;
                        }
                        fen.push((b'0' + run) as char);
                        file_index += run;
                    }
                }
            }
            if *rank != Rank::R1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.side_to_move().is_white() { 'w' } else { 'b' });
        fen.push(' ');
        fen.push_str(&self.castle().to_string());
        fen.push(' ');
        match self.en_passant() {
            Some(file) => {
                fen.push(file.to_char());
                fen.push(if self.side_to_move().is_white() {
                    Rank::R6.to_char()
                } else {
                    Rank::R3.to_char()
                });
            }
            None => fen.push('-'),
        }

        debug_assert!(fen.len() < FEN_MAX_LEN);
        fen
    }
}

fn read_placement(position: &mut Position, reader: &mut Reader) -> Result<(), FenError> {
    reader.skip_spaces();
    for rank in Rank::ALL.iter().rev() {
        let mut file_index = 0u8;
        while file_index < 8 {
            match reader.bump() {
                Some(byte) => {
                    if let Some(piece) = Piece::from_char(byte as char) {
                        let file = File::from_index(file_index).ok_or(FenError::Placement)?;
                        position.set_piece(Square::new(file, *rank), Some(piece));
                        file_index += 1;
                    } else if byte.is_ascii_digit() && byte != b'0' && byte <= b'8' {
                        file_index += byte - b'0';
                    } else {
                        return Err(FenError::Placement);
                    }
                }
                None => return Err(FenError::Placement),
            }
        }
        if file_index != 8 {
            return Err(FenError::Placement);
        }
        if *rank != Rank::R1 && reader.bump() != Some(b'/') {
            return Err(FenError::Placement);
        }
    }
    if !reader.expect_space() {
        return Err(FenError::Placement);
    }
    Ok(())
}

fn read_side_to_move(position: &mut Position, reader: &mut Reader) -> Result<(), FenError> {
    reader.skip_spaces();
    match reader.bump() {
        Some(b'w') => position.set_side_to_move(Color::White),
        Some(b'b') => position.set_side_to_move(Color::Black),
        _ => return Err(FenError::SideToMove),
    }
    if !reader.expect_space() {
        return Err(FenError::SideToMove);
    }
    Ok(())
}

fn read_castle(position: &mut Position, reader: &mut Reader) -> Result<(), FenError> {
    reader.skip_spaces();
    if reader.peek() == Some(b'-') {
        reader.bump();
    } else {
        let mut castle = CastleRights::NONE;
        loop {
            match reader.peek() {
                None | Some(b' ') => break,
                Some(byte) => {
                    reader.bump();
                    let (right, king_square, rook_square, king, rook) = match byte {
                        b'K' => (
                            CastleRights::WHITE_KINGSIDE,
                            Square::E1,
                            Square::H1,
                            Piece::WhiteKing,
                            Piece::WhiteRook,
                        ),
                        b'Q' => (
                            CastleRights::WHITE_QUEENSIDE,
                            Square::E1,
                            Square::A1,
                            Piece::WhiteKing,
                            Piece::WhiteRook,
                        ),
                        b'k' => (
                            CastleRights::BLACK_KINGSIDE,
                            Square::E8,
                            Square::H8,
                            Piece::BlackKing,
                            Piece::BlackRook,
                        ),
                        b'q' => (
                            CastleRights::BLACK_QUEENSIDE,
                            Square::E8,
                            Square::A8,
                            Piece::BlackKing,
                            Piece::BlackRook,
                        ),
                        _ => return Err(FenError::Castling),
                    };
                    if position.piece_at(king_square) != Some(king)
                        || position.piece_at(rook_square) != Some(rook)
                    {
                        return Err(FenError::Castling);
                    }
                    castle |= right;
                }
            }
        }
        position.set_castle(castle);
    }
    if !reader.expect_space() {
        return Err(FenError::Castling);
    }
    Ok(())
}

fn read_en_passant(position: &mut Position, reader: &mut Reader) -> Result<(), FenError> {
    reader.skip_spaces();
    if reader.peek() == Some(b'-') {
        reader.bump();
    } else {
        let file = reader
            .bump()
            .and_then(|byte| File::from_char(byte as char))
            .ok_or(FenError::EnPassant)?;
        // White to move means black just double-stepped onto rank 5, so
        // the capture square is on rank 6; mirrored for black.
        let expected_rank = if position.side_to_move().is_white() {
            b'6'
        } else {
            b'3'
        };
        if reader.bump() != Some(expected_rank) {
            return Err(FenError::EnPassant);
        }
        position.set_en_passant(file);
    }
    match reader.peek() {
        None | Some(b' ') => Ok(()),
        Some(_) => Err(FenError::EnPassant),
    }
}
