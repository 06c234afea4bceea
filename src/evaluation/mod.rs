//! This module implements "static" [evaluation]: predicting the relative
//! value of a position from material and piece placement alone, with no
//! lookahead of any kind.
//!
//! Each piece contributes its base material value times a positional
//! multiplier looked up by kind and square; the result is the White total
//! minus the Black total, so positive favors White, negative favors Black
//! and 0 is balanced. The standard starting position scores exactly 0.
//!
//! [evaluation]: https://www.chessprogramming.org/Evaluation

use std::fmt;

use strum::IntoEnumIterator;

use crate::chess::board::Board;
use crate::chess::codec::{self, BoardCode};
use crate::chess::core::{Piece, PieceKind, Player, Square};
use crate::Error;

mod tables;

/// A thin wrapper around the signed evaluation value: White-positive,
/// unbounded. Callers that want a bounded bar for display clamp it
/// themselves.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Score {
    value: f64,
}

impl Score {
    /// The score of a balanced position.
    pub const ZERO: Self = Self { value: 0.0 };

    /// The raw signed value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.value
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.value)
    }
}

/// Scores the position packed in `code`.
///
/// # Errors
///
/// [`Error::InvalidEncoding`] when the code contains a nibble that does not
/// decode to a piece.
pub fn evaluate(code: BoardCode) -> Result<Score, Error> {
    Ok(evaluate_board(&codec::decode(code)?))
}

/// Scores an already-unpacked board. Deterministic and allocation-free; runs
/// once per move in an interactive loop without showing up anywhere in a
/// profile.
#[must_use]
pub fn evaluate_board(board: &Board) -> Score {
    let mut white = 0.0;
    let mut black = 0.0;
    for square in Square::iter() {
        if let Some(piece) = board.at(square) {
            let contribution = material(piece.kind) * positional_multiplier(piece, square);
            match piece.owner {
                Player::White => white += contribution,
                Player::Black => black += contribution,
            }
        }
    }
    Score {
        value: white - black,
    }
}

/// Base material value: the "[standard piece valuations]". The king carries
/// no material value since it can never be captured.
///
/// [standard piece valuations]: https://en.wikipedia.org/wiki/Chess_piece_relative_value
const fn material(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => 1.0,
        PieceKind::Knight | PieceKind::Bishop => 3.0,
        PieceKind::Rook => 5.0,
        PieceKind::Queen => 9.0,
        PieceKind::King => 0.0,
    }
}

/// Looks up the positional multiplier for a piece on a square. The tables
/// are White-perspective; Black mirrors the square vertically.
fn positional_multiplier(piece: Piece, square: Square) -> f64 {
    let index = match piece.owner {
        Player::White => square as usize,
        Player::Black => square as usize ^ 56,
    };
    match piece.kind {
        PieceKind::Knight | PieceKind::Bishop => tables::CENTRALITY[index],
        PieceKind::King => tables::KING_SHELTER[index],
        PieceKind::Pawn => tables::PAWN_ADVANCE[index],
        PieceKind::Rook | PieceKind::Queen => 1.0,
    }
}
