//! A chess rules engine.
//!
//! This crate provides:
//! - [`Position`] - mailbox plus per-piece bitboards, castle rights, and
//!   the en-passant state, with the check/legality/castling predicates
//! - [`Graph`] - a navigable game: legal-move enumeration, O(1)
//!   make/unmake through an undo journal, and history replay
//! - SAN and FEN reading and writing, and a PGN reader/writer
//! - A deterministic Zobrist-style position hash
//!
//! # Example
//!
//! ```
//! use tabiya_engine::Graph;
//!
//! let mut graph = Graph::new();
//! let mv = graph.move_from_san("e4").unwrap();
//! graph.make_move(mv);
//! let reply = graph.move_from_san("c5").unwrap();
//! graph.make_move(reply);
//! assert_eq!(graph.to_fen(), "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -");
//! ```

mod attacks;
mod bitboard;
mod fen;
mod graph;
pub mod movegen;
pub mod pgn;
mod position;
mod rays;
mod san;
mod undo;
mod zobrist;

pub use bitboard::{Bitboard, BitboardIter};
pub use fen::{FenError, FEN_MAX_LEN};
pub use graph::{Graph, GraphError};
pub use movegen::MoveList;
pub use pgn::{for_each_game, read_game, write_game, PgnError};
pub use position::{CastleRights, Position};
pub use san::{SanError, SAN_MAX_LEN};
