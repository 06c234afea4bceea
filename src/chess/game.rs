//! Per-session game state: the board, the side to move and the
//! captured-piece ledger, owned by the caller.
//!
//! The rules engine itself is stateless; [`Game`] is the one place where a
//! move actually mutates anything, and every rejection leaves the state
//! untouched. Concurrent sessions each own their own [`Game`] value and
//! never share it.

use rand::Rng;

use crate::chess::board::Board;
use crate::chess::codec::{self, BoardCode};
use crate::chess::core::{Piece, Player, Square};
use crate::chess::rules::{self, Destinations};
use crate::evaluation::{self, Score};
use crate::Error;

/// Which side gets the first move of a fresh game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartingSide {
    /// Always the given player. The conventional default is White.
    Fixed(Player),
    /// A uniform coin flip at game start.
    Random,
}

impl Default for StartingSide {
    fn default() -> Self {
        Self::Fixed(Player::White)
    }
}

impl StartingSide {
    fn pick(self) -> Player {
        match self {
            Self::Fixed(player) => player,
            Self::Random => {
                if rand::thread_rng().r#gen() {
                    Player::White
                } else {
                    Player::Black
                }
            },
        }
    }
}

/// State of one playing session. Created at game start with the standard
/// initial position, mutated only by accepted moves, and reinitialized by
/// [`Game::reset`].
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Player,
    captured_white: Vec<Piece>,
    captured_black: Vec<Piece>,
}

impl Game {
    /// Starts a fresh game from the standard initial position.
    #[must_use]
    pub fn new(starting_side: StartingSide) -> Self {
        let side_to_move = starting_side.pick();
        tracing::debug!(side = %side_to_move, "new game");
        Self {
            board: Board::starting(),
            side_to_move,
            captured_white: Vec::new(),
            captured_black: Vec::new(),
        }
    }

    /// Discards the current game and starts over; the captured-piece ledger
    /// is emptied.
    pub fn reset(&mut self, starting_side: StartingSide) {
        *self = Self::new(starting_side);
    }

    /// The current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The side whose turn it is.
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Pieces of the given owner that have been captured so far, in capture
    /// order.
    #[must_use]
    pub fn captures(&self, owner: Player) -> &[Piece] {
        match owner {
            Player::White => &self.captured_white,
            Player::Black => &self.captured_black,
        }
    }

    /// Attempts a move for the side to move. On success the board is
    /// updated, any captured piece is appended to the ledger and returned,
    /// and the turn passes to the opponent. On any rejection the state stays
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// [`Error::NoPieceAtOrigin`] and [`Error::WrongSideToMove`] for the
    /// ownership preconditions, [`Error::IllegalMove`] when geometry, path
    /// clearance or check safety rejects the move.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<Option<Piece>, Error> {
        let piece = self.board.at(from).ok_or(Error::NoPieceAtOrigin(from))?;
        if piece.owner != self.side_to_move {
            return Err(Error::WrongSideToMove {
                square: from,
                owner: piece.owner,
                turn: self.side_to_move,
            });
        }
        if !rules::is_legal(&self.board, self.side_to_move, from, to) {
            return Err(Error::IllegalMove { from, to });
        }
        let (after, captured) = rules::apply_move(&self.board, from, to);
        self.board = after;
        if let Some(captured_piece) = captured {
            match captured_piece.owner {
                Player::White => self.captured_white.push(captured_piece),
                Player::Black => self.captured_black.push(captured_piece),
            }
        }
        tracing::debug!(
            side = %self.side_to_move,
            %from,
            %to,
            capture = captured.is_some(),
            "move accepted"
        );
        self.side_to_move = self.side_to_move.opponent();
        Ok(captured)
    }

    /// The destination set the shell highlights while dragging the piece on
    /// `from`.
    #[must_use]
    pub fn legal_destinations(&self, from: Square) -> Destinations {
        rules::legal_destinations(&self.board, self.side_to_move, from)
    }

    /// The packed code of the current board, for evaluation or transport.
    #[must_use]
    pub fn code(&self) -> BoardCode {
        codec::encode(&self.board)
    }

    /// The static evaluation of the current board.
    #[must_use]
    pub fn score(&self) -> Score {
        evaluation::evaluate_board(&self.board)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(StartingSide::default())
    }
}
