//! Core types for chess.
//!
//! This crate provides the fundamental types used across the toolkit:
//! - [`Color`] for the two players
//! - [`Square`], [`File`], [`Rank`], and [`Direction`] for board coordinates
//! - [`Piece`] for piece representation
//! - [`Move`] for compact move representation
//! - [`GameTags`] for the PGN tag roster

mod color;
mod mov;
mod piece;
mod square;
mod tags;

pub use color::Color;
pub use mov::{Move, MoveKind};
pub use piece::Piece;
pub use square::{Direction, File, Rank, Square};
pub use tags::{GameTags, TAG_KEYS};
