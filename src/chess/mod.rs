//! Implementation of the chess environment: primitives, the mailbox board,
//! the packed board codec, move legality and per-session game state.

pub mod board;
pub mod codec;
pub mod core;
pub mod game;
pub mod rules;
