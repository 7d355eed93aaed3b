//! Chess piece representation.

use crate::Color;

/// A colored chess piece.
///
/// Discriminants are chosen so that classification is a bit test:
/// bit 3 is the color (0 white, 1 black), bit 2 marks the sliders
/// (queen, rook, bishop), bit 1 marks the stepers (king, knight), and
/// pawns carry neither. Values 0, 7, 8 and 15 are unused; 0 doubles as
/// the empty-square code in the board's bitboard array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Piece {
    WhitePawn = 1,
    WhiteKing = 2,
    WhiteKnight = 3,
    WhiteQueen = 4,
    WhiteRook = 5,
    WhiteBishop = 6,
    BlackPawn = 9,
    BlackKing = 10,
    BlackKnight = 11,
    BlackQueen = 12,
    BlackRook = 13,
    BlackBishop = 14,
}

const COLOR_BIT: u8 = 8;
const SLIDER_BIT: u8 = 4;
const STEPER_BIT: u8 = 2;

impl Piece {
    /// All twelve pieces, white first.
    pub const ALL: [Piece; 12] = [
        Piece::WhitePawn,
        Piece::WhiteKing,
        Piece::WhiteKnight,
        Piece::WhiteQueen,
        Piece::WhiteRook,
        Piece::WhiteBishop,
        Piece::BlackPawn,
        Piece::BlackKing,
        Piece::BlackKnight,
        Piece::BlackQueen,
        Piece::BlackRook,
        Piece::BlackBishop,
    ];

    /// Returns the 4-bit code of this piece (1-6, 9-14).
    #[inline]
    pub const fn code(self) -> usize {
        self as usize
    }

    /// Creates a piece from its 4-bit code.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Piece> {
        match code {
            1 => Some(Piece::WhitePawn),
            2 => Some(Piece::WhiteKing),
            3 => Some(Piece::WhiteKnight),
            4 => Some(Piece::WhiteQueen),
            5 => Some(Piece::WhiteRook),
            6 => Some(Piece::WhiteBishop),
            9 => Some(Piece::BlackPawn),
            10 => Some(Piece::BlackKing),
            11 => Some(Piece::BlackKnight),
            12 => Some(Piece::BlackQueen),
            13 => Some(Piece::BlackRook),
            14 => Some(Piece::BlackBishop),
            _ => None,
        }
    }

    /// Returns the color of this piece.
    #[inline]
    pub const fn color(self) -> Color {
        if self as u8 & COLOR_BIT == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Returns true for queen, rook, and bishop.
    #[inline]
    pub const fn is_slider(self) -> bool {
        self as u8 & SLIDER_BIT != 0
    }

    /// Returns true for king and knight.
    #[inline]
    pub const fn is_steper(self) -> bool {
        self as u8 & (SLIDER_BIT | STEPER_BIT) == STEPER_BIT
    }

    /// Returns true for pawns of either color.
    #[inline]
    pub const fn is_pawn(self) -> bool {
        matches!(self, Piece::WhitePawn | Piece::BlackPawn)
    }

    /// Returns the white piece of the same kind.
    #[inline]
    pub const fn to_white(self) -> Piece {
        match Piece::from_code(self as u8 & !COLOR_BIT) {
            Some(piece) => piece,
            None => unreachable!(),
        }
    }

    /// Returns the black piece of the same kind.
    #[inline]
    pub const fn to_black(self) -> Piece {
        match Piece::from_code(self as u8 | COLOR_BIT) {
            Some(piece) => piece,
            None => unreachable!(),
        }
    }

    /// Returns the piece of the same kind with the given color.
    #[inline]
    pub const fn with_color(self, color: Color) -> Piece {
        match color {
            Color::White => self.to_white(),
            Color::Black => self.to_black(),
        }
    }

    #[inline]
    pub const fn pawn(color: Color) -> Piece {
        Piece::WhitePawn.with_color(color)
    }

    #[inline]
    pub const fn king(color: Color) -> Piece {
        Piece::WhiteKing.with_color(color)
    }

    #[inline]
    pub const fn knight(color: Color) -> Piece {
        Piece::WhiteKnight.with_color(color)
    }

    #[inline]
    pub const fn queen(color: Color) -> Piece {
        Piece::WhiteQueen.with_color(color)
    }

    #[inline]
    pub const fn rook(color: Color) -> Piece {
        Piece::WhiteRook.with_color(color)
    }

    #[inline]
    pub const fn bishop(color: Color) -> Piece {
        Piece::WhiteBishop.with_color(color)
    }

    /// Returns the FEN character: uppercase for white, lowercase for black.
    pub const fn to_char(self) -> char {
        match self {
            Piece::WhitePawn => 'P',
            Piece::WhiteKing => 'K',
            Piece::WhiteKnight => 'N',
            Piece::WhiteQueen => 'Q',
            Piece::WhiteRook => 'R',
            Piece::WhiteBishop => 'B',
            Piece::BlackPawn => 'p',
            Piece::BlackKing => 'k',
            Piece::BlackKnight => 'n',
            Piece::BlackQueen => 'q',
            Piece::BlackRook => 'r',
            Piece::BlackBishop => 'b',
        }
    }

    /// Parses a FEN character into a piece.
    pub const fn from_char(c: char) -> Option<Piece> {
        match c {
            'P' => Some(Piece::WhitePawn),
            'K' => Some(Piece::WhiteKing),
            'N' => Some(Piece::WhiteKnight),
            'Q' => Some(Piece::WhiteQueen),
            'R' => Some(Piece::WhiteRook),
            'B' => Some(Piece::WhiteBishop),
            'p' => Some(Piece::BlackPawn),
            'k' => Some(Piece::BlackKing),
            'n' => Some(Piece::BlackKnight),
            'q' => Some(Piece::BlackQueen),
            'r' => Some(Piece::BlackRook),
            'b' => Some(Piece::BlackBishop),
            _ => None,
        }
    }
}
