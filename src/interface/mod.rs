//! JSON-shaped payloads crossing the boundary to the UI/transport shell.
//!
//! The shell sends board codes as decimal strings and receives either an
//! evaluation object or a 64-entry board view; nothing else crosses the
//! boundary and nothing here is persisted. A malformed request fails the
//! current call only.

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::chess::codec::{self, BoardCode};
use crate::chess::core::{PieceKind, Player, Square};
use crate::evaluation;
use crate::Error;

/// The evaluation response: serializes to `{"score": <number>}`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ScoreResponse {
    /// Signed evaluation, White-positive.
    pub score: f64,
}

/// One occupied square of the decoded board view: serializes to
/// `{"type": "Rook", "color": "white", "value": 1}`.
///
/// `value` is the 1..=12 packed-code nibble, kept for compatibility with the
/// packed encoding; the evaluator's scoring does not use it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SquareView {
    /// Piece kind name, capitalized.
    #[serde(rename = "type")]
    pub kind: PieceKind,
    /// Owning side, lowercase.
    pub color: Player,
    /// Legacy packed-code nibble of the piece.
    pub value: u8,
}

/// Parses the decimal-string board code carried by a request.
///
/// # Errors
///
/// [`Error::MalformedRequest`] when the field is empty, non-numeric or out
/// of range.
pub fn parse_board_code(input: &str) -> Result<BoardCode, Error> {
    input.trim().parse()
}

/// Builds the evaluation response for a packed board.
///
/// # Errors
///
/// [`Error::InvalidEncoding`] when the code does not decode.
pub fn score_response(code: BoardCode) -> Result<ScoreResponse, Error> {
    Ok(ScoreResponse {
        score: evaluation::evaluate(code)?.value(),
    })
}

/// Decodes a packed board into the 64-entry view the shell renders, square
/// index 0 first; empty squares serialize to `null`.
///
/// # Errors
///
/// [`Error::InvalidEncoding`] when the code does not decode.
pub fn board_view(code: BoardCode) -> Result<Vec<Option<SquareView>>, Error> {
    let board = codec::decode(code)?;
    Ok(Square::iter()
        .map(|square| {
            board.at(square).map(|piece| SquareView {
                kind: piece.kind,
                color: piece.owner,
                value: codec::piece_nibble(piece),
            })
        })
        .collect())
}
