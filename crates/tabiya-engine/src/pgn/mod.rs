//! PGN (Portable Game Notation) reading and writing.
//!
//! The reader consumes a token stream (tag punctuation, quoted strings,
//! move numbers, dots, move tokens, result tokens) and drives the SAN
//! reader and [`GameTags`](tabiya_core::GameTags); the writer renders the
//! tag-pair section and the wrapped movetext. Whitespace between tokens is
//! insignificant, so wrapped and unwrapped movetext parse identically.

mod lexer;
mod reader;
mod writer;

pub use reader::{for_each_game, read_game, PgnError};
pub use writer::write_game;
