//! Chess rules and static-evaluation engine built around a packed board
//! encoding.
//!
//! The crate is the core behind a thin UI shell: the shell owns the board it
//! renders, asks [`chess::rules`] whether a drag-and-drop is legal and what
//! the highlighted destination set is, and requests an
//! [`evaluation::Score`] for the packed [`chess::codec::BoardCode`] of the
//! position it holds. [`chess::game::Game`] bundles the state one playing
//! session owns (board, side to move, captured pieces); [`interface`]
//! defines the JSON-shaped payloads crossing the shell boundary.
//!
//! Rendering, drag-and-drop capture and request transport are deliberately
//! not part of this crate.

pub mod chess;
pub mod evaluation;
pub mod interface;

use crate::chess::core::{Player, Square};

/// All recoverable failures the engine reports. Nothing here is fatal to the
/// process: a bad request or a rejected move affects only the current call
/// and leaves the caller's board untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A nibble in a packed board code was 13, 14 or 15, which does not
    /// encode any piece.
    #[error("nibble {nibble:#x} at square index {index} does not encode a piece")]
    InvalidEncoding {
        /// Square index the offending nibble belongs to.
        index: u8,
        /// The nibble value itself.
        nibble: u8,
    },
    /// A raw square index was outside the board.
    #[error("square index should be in 0..64, got {0}")]
    IndexOutOfRange(u8),
    /// A move was requested from an empty square.
    #[error("no piece on origin square {0}")]
    NoPieceAtOrigin(Square),
    /// A move was requested for a piece the side to move does not own.
    #[error("{square} holds a piece of {owner}, but it is {turn} to move")]
    WrongSideToMove {
        /// Origin square of the request.
        square: Square,
        /// Owner of the piece sitting there.
        owner: Player,
        /// The side whose turn it actually is.
        turn: Player,
    },
    /// The move violates piece geometry, path clearance or check safety.
    #[error("move {from}{to} is illegal")]
    IllegalMove {
        /// Origin square.
        from: Square,
        /// Destination square.
        to: Square,
    },
    /// A board-code request did not carry a decimal number within range.
    #[error("malformed board code: {0}")]
    MalformedRequest(String),
    /// A file letter outside 'a'..='h'.
    #[error("file should be within 'a'..='h', got '{0}'")]
    InvalidFile(char),
    /// A rank digit outside '1'..='8'.
    #[error("rank should be within '1'..='8', got '{0}'")]
    InvalidRank(char),
    /// A square literal that is not a file letter followed by a rank digit.
    #[error("square should be a file letter and a rank digit, got \"{0}\"")]
    InvalidSquare(String),
    /// A move literal that is not two square literals back to back.
    #[error("move should be origin and destination squares, got \"{0}\"")]
    InvalidMoveLiteral(String),
    /// A piece symbol outside the FEN alphabet.
    #[error("piece symbol should be within \"KQRBNPkqrbnp\", got '{0}'")]
    InvalidPieceSymbol(char),
    /// A piece-placement string that does not describe 8 ranks of 8 squares.
    #[error("placement should describe 8 ranks of 8 squares, got \"{0}\"")]
    InvalidPlacement(String),
}
