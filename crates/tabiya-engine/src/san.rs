//! Standard Algebraic Notation (SAN) writing and reading.
//!
//! Both directions work through the legal-move set: the writer scans it to
//! decide how much disambiguation a move needs, and the reader matches the
//! parsed fields against it to find the one move meant. Examples: "e4",
//! "exd5", "Nbd2", "R1e1", "O-O", "e8=Q+".

use crate::graph::Graph;
use tabiya_core::{File, Move, MoveKind, Piece, Rank, Square};
use thiserror::Error;

/// Longest SAN string the writer emits, including the terminator byte of
/// fixed-buffer consumers.
pub const SAN_MAX_LEN: usize = 9;

/// Errors that can occur when reading SAN.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanError {
    /// The text is not well-formed SAN.
    #[error("invalid move text: {0}")]
    Invalid(String),

    /// No legal move matches the text.
    #[error("no legal move matches: {0}")]
    NoMatch(String),

    /// More than one legal move matches the text.
    #[error("ambiguous move: {0}")]
    Ambiguous(String),
}

/// The fields a SAN string constrains; unparsed fields match anything.
#[derive(Debug, Default)]
struct SanPattern {
    to: Option<Square>,
    piece: Option<Piece>,
    kind: Option<MoveKind>,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    promotes_to: Option<Piece>,
}

impl SanPattern {
    fn matches(&self, from_piece: Option<Piece>, mv: Move) -> bool {
        if let Some(to) = self.to {
            if mv.to() != to {
                return false;
            }
        }
        if let Some(piece) = self.piece {
            if from_piece != Some(piece) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if mv.kind() != kind {
                return false;
            }
        }
        if let Some(file) = self.from_file {
            if mv.from().file() != file {
                return false;
            }
        }
        if let Some(rank) = self.from_rank {
            if mv.from().rank() != rank {
                return false;
            }
        }
        if let Some(piece) = self.promotes_to {
            if mv.promotes_to() != Some(piece) {
                return false;
            }
        }
        true
    }
}

impl Graph {
    /// Renders a legal move as SAN for the current position.
    ///
    /// The graph is probed (and restored) to determine disambiguation and
    /// the check or checkmate suffix.
    pub fn move_to_san(&mut self, mv: Move) -> String {
        let mut san = String::new();
        match mv.kind() {
            MoveKind::CastleKingside => san.push_str("O-O"),
            MoveKind::CastleQueenside => san.push_str("O-O-O"),
            _ => self.describe_move(mv, &mut san),
        }
        self.push_check_suffix(mv, &mut san);
        debug_assert!(san.len() < SAN_MAX_LEN);
        san
    }

    /// Parses SAN against the current position's legal moves.
    ///
    /// Trailing `+`, `#`, `!` and `?` decorations are accepted without
    /// being verified.
    pub fn move_from_san(&mut self, text: &str) -> Result<Move, SanError> {
        let is_white = self.position().side_to_move().is_white();
        let pattern = parse_san(text, is_white)?;

        let legal = self.legal_moves();
        let mut result = None;
        let mut ambiguous = false;
        for &mv in &legal {
            let from_piece = self.position().piece_at(mv.from());
            if !pattern.matches(from_piece, mv) {
                continue;
            }
            if result.is_some() {
                ambiguous = true;
            } else {
                result = Some(mv);
            }
        }
        if ambiguous {
            return Err(SanError::Ambiguous(text.to_string()));
        }
        result.ok_or_else(|| SanError::NoMatch(text.to_string()))
    }

    fn describe_move(&mut self, mv: Move, san: &mut String) {
        let from = mv.from();
        let to = mv.to();
        let from_piece = self
            .position()
            .piece_at(from)
            .expect("SAN rendering needs a piece on the move's source square");
        let to_piece = self.position().piece_at(to);

        let mut is_ambiguous = false;
        let mut shares_file = false;
        let mut shares_rank = false;
        let legal = self.legal_moves();
        for &other in &legal {
            if other != mv
                && other.to() == to
                && self.position().piece_at(other.from()) == Some(from_piece)
            {
                is_ambiguous = true;
                shares_rank |= other.from().rank() == from.rank();
                shares_file |= other.from().file() == from.file();
            }
        }

        if from_piece.is_pawn() {
            if from.file() != to.file() {
                san.push(from.file().to_char());
            }
        } else {
            san.push(from_piece.to_char().to_ascii_uppercase());
            if is_ambiguous {
                // Prefer the file; fall back to the rank when files
                // collide, and give both when neither alone suffices.
                if !shares_file || shares_rank {
                    san.push(from.file().to_char());
                }
                if shares_file {
                    san.push(from.rank().to_char());
                }
            }
        }

        if to_piece.is_some() || mv.kind() == MoveKind::EnPassantCapture {
            san.push('x');
        }
        san.push(to.file().to_char());
        san.push(to.rank().to_char());
        if let Some(piece) = mv.promotes_to() {
            san.push('=');
            san.push(piece.to_char().to_ascii_uppercase());
        }
    }

    fn push_check_suffix(&mut self, mv: Move, san: &mut String) {
        self.make_move(mv);
        if self.position().is_check() {
            let checkmate = self.legal_moves().is_empty();
            san.push(if checkmate { '#' } else { '+' });
        }
        self.unmake_move();
    }
}

fn parse_san(text: &str, is_white: bool) -> Result<SanPattern, SanError> {
    let invalid = || SanError::Invalid(text.to_string());
    let mut pattern = SanPattern::default();
    let bytes = text.as_bytes();
    let mut pos = 0usize;

    let peek = |pos: usize| bytes.get(pos).copied();

    if matches!(peek(0), Some(b'O') | Some(b'0')) {
        if bytes.starts_with(b"O-O-O") || bytes.starts_with(b"0-0-0") {
            pattern.kind = Some(MoveKind::CastleQueenside);
            pos = 5;
        } else if bytes.starts_with(b"O-O") || bytes.starts_with(b"0-0") {
            pattern.kind = Some(MoveKind::CastleKingside);
            pos = 3;
        }
    } else {
        let piece = match peek(pos) {
            Some(byte @ b'B'..=b'R') => {
                let piece = Piece::from_char(byte as char).ok_or_else(invalid)?;
                pos += 1;
                piece
            }
            _ => Piece::WhitePawn,
        };
        pattern.piece = Some(if is_white { piece } else { piece.to_black() });

        let mut file = None;
        let mut rank = None;
        let mut requires_to = false;

        if let Some(byte @ b'a'..=b'h') = peek(pos) {
            file = File::from_char(byte as char);
            pos += 1;
        }
        if let Some(byte @ b'1'..=b'8') = peek(pos) {
            rank = Rank::from_char(byte as char);
            pos += 1;
        }

        if matches!(peek(pos), Some(b'x') | Some(b'-')) {
            pos += 1;
            requires_to = true;
        }

        match peek(pos) {
            Some(byte @ b'a'..=b'h') => {
                pattern.from_file = file;
                file = File::from_char(byte as char);
                pos += 1;
                // a second file names the destination, so a rank must follow
                requires_to = true;
            }
            _ if requires_to => return Err(invalid()),
            _ => {}
        }
        match peek(pos) {
            Some(byte @ b'1'..=b'8') => {
                pattern.from_rank = rank;
                rank = Rank::from_char(byte as char);
                pos += 1;
            }
            _ if requires_to => return Err(invalid()),
            _ => {}
        }

        match (file, rank) {
            (Some(file), Some(rank)) => pattern.to = Some(Square::new(file, rank)),
            _ => return Err(invalid()),
        }

        if peek(pos) == Some(b'=') {
            pos += 1;
            let piece = peek(pos)
                .and_then(|byte| Piece::from_char(byte as char))
                .ok_or_else(invalid)?;
            pos += 1;
            pattern.kind = Some(MoveKind::Promotion);
            pattern.promotes_to = Some(if is_white { piece } else { piece.to_black() });
        }
    }

    while matches!(
        peek(pos),
        Some(b'+') | Some(b'#') | Some(b'!') | Some(b'?')
    ) {
        pos += 1;
    }
    if pos != bytes.len() {
        return Err(invalid());
    }
    Ok(pattern)
}
