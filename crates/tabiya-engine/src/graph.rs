//! The move graph: legal-move enumeration and game navigation.
//!
//! A [`Graph`] owns one [`Position`], the move maker with its undo
//! journal, and the stack of moves played from the position's reset
//! state. Legal moves are the pseudo-legal moves that survive a
//! make/test/unmake probe, plus the castle moves (which are generated
//! fully legal).

use crate::fen::FenError;
use crate::movegen::{self, MoveList};
use crate::position::Position;
use crate::undo::MoveMaker;
use tabiya_core::Move;
use thiserror::Error;

/// Errors that can occur when operating on a [`Graph`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The root position could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(#[from] FenError),

    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// A navigable game: a position plus the moves that led to it.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    position: Position,
    move_maker: MoveMaker,
    move_stack: Vec<Move>,
}

impl Graph {
    /// Longest rendering from [`Display`](std::fmt::Display), including
    /// the terminator byte of fixed-buffer consumers.
    pub const TEXT_MAX_LEN: usize = Position::TEXT_MAX_LEN + 15;

    /// Creates a graph at the standard starting position.
    pub fn new() -> Self {
        Graph {
            position: Position::new(),
            move_maker: MoveMaker::new(),
            move_stack: Vec::new(),
        }
    }

    /// Creates a graph rooted at an arbitrary position.
    pub fn from_position(position: Position) -> Self {
        Graph {
            position,
            move_maker: MoveMaker::new(),
            move_stack: Vec::new(),
        }
    }

    /// Creates a graph rooted at the position a FEN string describes.
    pub fn from_fen(fen: &str) -> Result<Self, GraphError> {
        Ok(Graph::from_position(Position::from_fen(fen)?))
    }

    /// Returns to the starting position and discards all history.
    pub fn reset(&mut self) {
        self.position.reset();
        self.move_stack.clear();
        self.move_maker.reset();
    }

    /// Replaces the root position, discarding all history.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.move_stack.clear();
        self.move_maker.reset();
    }

    /// Replaces the root position from a FEN string, discarding all
    /// history. On error the graph is left cleared, never half-loaded.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), GraphError> {
        self.move_stack.clear();
        self.move_maker.reset();
        match Position::from_fen(fen) {
            Ok(position) => {
                self.position = position;
                Ok(())
            }
            Err(error) => {
                self.position.clear();
                Err(error.into())
            }
        }
    }

    /// Returns the current position.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Renders the current position as FEN.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Returns the position identity hash of the current position.
    pub fn hash(&self) -> u64 {
        self.position.hash()
    }

    /// Returns the number of moves played from the root.
    #[inline]
    pub fn ply(&self) -> usize {
        self.move_stack.len()
    }

    /// Calls `sink` with every legal move in the current position.
    ///
    /// Piece moves come first in mailbox order, castles last. The graph
    /// borrows itself mutably for the probe but is unchanged when each
    /// call to `sink` is made.
    pub fn for_each_legal_move<F: FnMut(Move)>(&mut self, mut sink: F) {
        let mut pseudo = MoveList::new();
        movegen::pseudo_legal_moves(&self.position, &mut |m| pseudo.push(m));
        for &mv in &pseudo {
            self.move_maker.make(&mut self.position, mv);
            let legal = self.position.is_legal();
            self.move_maker.unmake(&mut self.position);
            if legal {
                sink(mv);
            }
        }
        movegen::castle_moves(&self.position, &mut sink);
    }

    /// Collects every legal move in the current position.
    pub fn legal_moves(&mut self) -> MoveList {
        let mut moves = MoveList::new();
        self.for_each_legal_move(|m| moves.push(m));
        moves
    }

    /// Plays `mv` and pushes it onto the move stack.
    ///
    /// The move is applied as given; callers wanting validation should
    /// pick it from [`legal_moves`](Graph::legal_moves). [`Move::NULL`]
    /// is ignored.
    pub fn make_move(&mut self, mv: Move) {
        if mv == Move::NULL {
            return;
        }
        self.move_maker.make(&mut self.position, mv);
        self.move_stack.push(mv);
    }

    /// Plays `mv` only if it is legal in the current position.
    pub fn try_make_move(&mut self, mv: Move) -> Result<(), GraphError> {
        if !self.legal_moves().contains(mv) {
            return Err(GraphError::IllegalMove(mv.to_string()));
        }
        self.make_move(mv);
        Ok(())
    }

    /// Reverts the most recent move and returns it, or `None` at the
    /// root.
    pub fn unmake_move(&mut self) -> Option<Move> {
        self.move_maker.unmake(&mut self.position);
        self.move_stack.pop()
    }

    /// Replays the game from its root, calling `visit` with each move
    /// *before* it is made, so the visitor sees the position the move was
    /// played from. The graph is back in its current state afterwards.
    ///
    /// The visitor may inspect the graph, including make/unmake pairs
    /// that restore the position (as the SAN writer does); it must not
    /// leave the position changed.
    pub fn for_each_move_made<F: FnMut(&mut Graph, Move)>(&mut self, mut visit: F) {
        for _ in 0..self.move_stack.len() {
            self.move_maker.unmake(&mut self.position);
        }
        for index in 0..self.move_stack.len() {
            let mv = self.move_stack[index];
            visit(self, mv);
            self.move_maker.make(&mut self.position, mv);
        }
    }

    /// Walks every legal line `depth` plies deep, calling `visit` at each
    /// leaf. The graph is back in its current state afterwards.
    ///
    /// A depth of zero visits nothing.
    pub fn dfs<F: FnMut(&mut Graph)>(&mut self, depth: u32, visit: &mut F) {
        if depth == 0 {
            return;
        }
        let moves = self.legal_moves();
        for &mv in &moves {
            self.make_move(mv);
            if depth == 1 {
                visit(self);
            } else {
                self.dfs(depth - 1, visit);
            }
            self.unmake_move();
        }
    }
}

/// The position rendering followed by a ply line.
impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = format!("{}\nPly {}", self.position, self.ply());
        debug_assert!(text.len() < Self::TEXT_MAX_LEN);
        f.write_str(&text)
    }
}
