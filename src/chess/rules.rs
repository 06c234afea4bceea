//! The move-legality engine: pure functions of `(board, turn, from, to)`.
//!
//! Legality is decided in a fixed order, short-circuiting on the first
//! failing check: the origin must hold the side-to-move's piece, the
//! destination must not hold a piece of the same side, sliding pieces need a
//! clear path, the geometry must match the piece kind, and the move must not
//! leave the mover's own king attacked.
//!
//! The check-safety step simulates the move and scans every opposing piece
//! with the same geometry/clearance path (`pseudo_legal` internally) it uses
//! for regular moves, but never re-enters check safety itself, so the
//! recursion is bounded by construction.

use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::chess::board::Board;
use crate::chess::core::{Piece, PieceKind, Player, Rank, Square, BOARD_SIZE};

/// The destination set of one origin square. At most 27 squares are reachable
/// by any piece, so the capacity is never exceeded.
pub type Destinations = ArrayVec<Square, { BOARD_SIZE as usize }>;

/// Decides whether moving the piece on `from` to `to` is legal for `turn`.
///
/// Total over all inputs: an empty origin, an opponent's piece or any rule
/// violation simply yields `false`.
#[must_use]
pub fn is_legal(board: &Board, turn: Player, from: Square, to: Square) -> bool {
    let piece = match board.at(from) {
        Some(piece) => piece,
        None => return false,
    };
    if piece.owner != turn {
        return false;
    }
    if !pseudo_legal(board, piece, from, to) {
        return false;
    }
    // The move must not leave our own king attacked.
    let (after, _) = apply_move(board, from, to);
    !in_check(&after, turn)
}

/// Collects every square the piece on `from` may legally move to.
///
/// Runs [`is_legal`] for all 64 candidate squares, each of which may scan all
/// opposing pieces for check safety. That is fine for an interactive
/// drag-and-drop highlight; it is not a move generator for search.
#[must_use]
pub fn legal_destinations(board: &Board, turn: Player, from: Square) -> Destinations {
    Square::iter()
        .filter(|&to| is_legal(board, turn, from, to))
        .collect()
}

/// Relocates the piece on `from` to `to` and returns the new board along
/// with whatever piece previously occupied the destination.
///
/// This is a plain substitution with no legality check of its own; callers
/// decide legality with [`is_legal`] first. Turn alternation and the
/// captured-piece ledger are the caller's concern (see
/// [`crate::chess::game::Game`]).
#[must_use]
pub fn apply_move(board: &Board, from: Square, to: Square) -> (Board, Option<Piece>) {
    let mut after = board.clone();
    let captured = after.at(to);
    after.set(to, after.at(from));
    after.set(from, None);
    (after, captured)
}

/// Is the given side's king currently attacked? A side with no king on the
/// board is never in check.
#[must_use]
pub fn in_check(board: &Board, side: Player) -> bool {
    board
        .king_square(side)
        .is_some_and(|king| attacked(board, king, side.opponent()))
}

/// Does any piece of `by` have a pseudo-legal move onto `target`?
#[must_use]
pub fn attacked(board: &Board, target: Square, by: Player) -> bool {
    board
        .pieces(by)
        .any(|(square, piece)| pseudo_legal(board, piece, square, target))
}

/// Geometry, occupancy and path clearance, with check safety deliberately
/// left out so the attack scan can reuse this without recursing.
fn pseudo_legal(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    // No capturing your own piece.
    if board.at(to).is_some_and(|occupant| occupant.owner == piece.owner) {
        return false;
    }
    if piece.kind.is_sliding() && !path_clear(board, from, to) {
        return false;
    }
    let row_diff = (to.rank() as i8 - from.rank() as i8).abs();
    let col_diff = (to.file() as i8 - from.file() as i8).abs();
    match piece.kind {
        // Exactly one of the deltas is zero; both would be the zero move.
        PieceKind::Rook => (row_diff == 0) != (col_diff == 0),
        PieceKind::Knight => (row_diff, col_diff) == (2, 1) || (row_diff, col_diff) == (1, 2),
        PieceKind::Bishop => row_diff == col_diff,
        PieceKind::Queen => row_diff == col_diff || ((row_diff == 0) != (col_diff == 0)),
        PieceKind::King => row_diff <= 1 && col_diff <= 1,
        PieceKind::Pawn => pawn_move(board, piece.owner, from, to),
    }
}

/// Are all squares strictly between `from` and `to` empty? Walks the line
/// with unit steps; `from` and `to` themselves are not inspected.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let file_step = (to.file() as i8 - from.file() as i8).signum();
    let rank_step = (to.rank() as i8 - from.rank() as i8).signum();
    let mut file = from.file() as i8 + file_step;
    let mut rank = from.rank() as i8 + rank_step;
    while let Some(square) = Square::from_coords(file, rank) {
        if square == to {
            return true;
        }
        if board.at(square).is_some() {
            return false;
        }
        file += file_step;
        rank += rank_step;
    }
    // Walked off the board without reaching `to`: the squares are not on one
    // line, so there is nothing between them. Geometry rejects such moves.
    true
}

/// Pawns are the only direction-sensitive kind: a single forward step onto an
/// empty square, a double step from the starting rank over two empty squares,
/// or a capture exactly one file aside. No en passant.
fn pawn_move(board: &Board, owner: Player, from: Square, to: Square) -> bool {
    let direction = owner.pawn_direction();
    let row_delta = to.rank() as i8 - from.rank() as i8;
    let col_diff = (to.file() as i8 - from.file() as i8).abs();
    if col_diff == 0 {
        // Forward movement never captures.
        if board.at(to).is_some() {
            return false;
        }
        if row_delta == direction {
            return true;
        }
        row_delta == 2 * direction
            && from.rank() == Rank::pawns_starting(owner)
            && Square::from_coords(from.file() as i8, from.rank() as i8 + direction)
                .is_some_and(|intermediate| board.at(intermediate).is_none())
    } else {
        // Diagonal steps are capture-only; same-side occupants were already
        // rejected before the per-kind geometry.
        col_diff == 1 && row_delta == direction && board.at(to).is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn board(placement: &str) -> Board {
        Board::try_from(placement).expect("test placements are valid")
    }

    #[test]
    fn rook_moves_along_lines() {
        let rook = board("8/8/8/8/3R4/8/8/8");
        assert!(is_legal(&rook, Player::White, Square::D4, Square::D8));
        assert!(is_legal(&rook, Player::White, Square::D4, Square::A4));
        assert!(!is_legal(&rook, Player::White, Square::D4, Square::E5));
        assert!(!is_legal(&rook, Player::White, Square::D4, Square::D4));
    }

    #[test]
    fn bishop_moves_along_diagonals() {
        let bishop = board("8/8/8/8/3B4/8/8/8");
        assert!(is_legal(&bishop, Player::White, Square::D4, Square::H8));
        assert!(is_legal(&bishop, Player::White, Square::D4, Square::A1));
        assert!(!is_legal(&bishop, Player::White, Square::D4, Square::D5));
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let queen = board("8/8/8/8/3Q4/8/8/8");
        assert!(is_legal(&queen, Player::White, Square::D4, Square::D1));
        assert!(is_legal(&queen, Player::White, Square::D4, Square::G7));
        assert!(!is_legal(&queen, Player::White, Square::D4, Square::E6));
    }

    #[test]
    fn king_single_steps() {
        let king = board("8/8/8/8/3K4/8/8/8");
        assert!(is_legal(&king, Player::White, Square::D4, Square::D5));
        assert!(is_legal(&king, Player::White, Square::D4, Square::E5));
        assert!(!is_legal(&king, Player::White, Square::D4, Square::D6));
    }

    #[test]
    fn knight_jump_shape() {
        let knight = board("8/8/8/8/3N4/8/8/8");
        assert!(is_legal(&knight, Player::White, Square::D4, Square::E6));
        assert!(is_legal(&knight, Player::White, Square::D4, Square::F3));
        assert!(!is_legal(&knight, Player::White, Square::D4, Square::E5));
        assert!(!is_legal(&knight, Player::White, Square::D4, Square::D6));
    }

    #[test]
    fn sliding_pieces_are_blocked() {
        let blocked = board("8/8/8/8/R2p3n/8/8/8");
        // The pawn on d4 blocks everything beyond it.
        assert!(is_legal(&blocked, Player::White, Square::A4, Square::C4));
        assert!(is_legal(&blocked, Player::White, Square::A4, Square::D4));
        assert!(!is_legal(&blocked, Player::White, Square::A4, Square::F4));
        assert!(!is_legal(&blocked, Player::White, Square::A4, Square::H4));
    }

    #[test]
    fn knight_ignores_blockers() {
        // A knight boxed in by pawns on every adjacent square still jumps.
        let boxed_in = board("8/8/2ppp3/2pNp3/2ppp3/8/8/8");
        assert!(is_legal(&boxed_in, Player::White, Square::D5, Square::E7));
        assert!(is_legal(&boxed_in, Player::White, Square::D5, Square::B6));
        assert!(is_legal(&boxed_in, Player::White, Square::D5, Square::F4));
    }

    #[test]
    fn no_self_capture() {
        let pair = board("8/8/8/8/R2P4/8/8/8");
        assert!(!is_legal(&pair, Player::White, Square::A4, Square::D4));
        // Capturing the opponent's piece on the same square is fine.
        let pair = board("8/8/8/8/R2p4/8/8/8");
        assert!(is_legal(&pair, Player::White, Square::A4, Square::D4));
    }

    #[test]
    fn turn_ownership() {
        let rook = board("8/8/8/8/3R4/8/8/8");
        assert!(!is_legal(&rook, Player::Black, Square::D4, Square::D8));
        assert!(!is_legal(&rook, Player::White, Square::E4, Square::E8));
    }

    #[test]
    fn pawn_pushes() {
        let starting = Board::starting();
        assert!(is_legal(&starting, Player::White, Square::E2, Square::E3));
        assert!(is_legal(&starting, Player::White, Square::E2, Square::E4));
        assert!(!is_legal(&starting, Player::White, Square::E2, Square::E5));
        assert!(!is_legal(&starting, Player::White, Square::E2, Square::D3));
        assert!(is_legal(&starting, Player::Black, Square::D7, Square::D5));
        assert!(!is_legal(&starting, Player::Black, Square::D7, Square::D8));
    }

    #[test]
    fn pawn_double_step_needs_two_empty_squares() {
        // A knight on e3 blocks both e2-e3 and e2-e4.
        let blocked = board("8/8/8/8/8/4n3/4P3/8");
        assert!(!is_legal(&blocked, Player::White, Square::E2, Square::E3));
        assert!(!is_legal(&blocked, Player::White, Square::E2, Square::E4));
        // A blocker on e4 still allows the single step.
        let blocked = board("8/8/8/8/4n3/8/4P3/8");
        assert!(is_legal(&blocked, Player::White, Square::E2, Square::E3));
        assert!(!is_legal(&blocked, Player::White, Square::E2, Square::E4));
    }

    #[test]
    fn pawn_double_step_only_from_starting_rank() {
        let advanced = board("8/8/8/8/8/4P3/8/8");
        assert!(is_legal(&advanced, Player::White, Square::E3, Square::E4));
        assert!(!is_legal(&advanced, Player::White, Square::E3, Square::E5));
    }

    #[test]
    fn pawn_captures_diagonally_only() {
        let empty_diagonal = board("8/8/8/8/8/8/4P3/8");
        assert!(!is_legal(&empty_diagonal, Player::White, Square::E2, Square::D3));
        let capture = board("8/8/8/8/8/3p4/4P3/8");
        assert!(is_legal(&capture, Player::White, Square::E2, Square::D3));
        // Straight ahead is a push, never a capture.
        let head_on = board("8/8/8/8/8/4p3/4P3/8");
        assert!(!is_legal(&head_on, Player::White, Square::E2, Square::E3));
    }

    #[test]
    fn king_cannot_walk_into_attack() {
        let cornered = board("8/8/8/8/8/8/r7/4K3");
        // a2-rook holds the whole second rank.
        assert!(!is_legal(&cornered, Player::White, Square::E1, Square::E2));
        assert!(!is_legal(&cornered, Player::White, Square::E1, Square::D2));
        assert!(is_legal(&cornered, Player::White, Square::E1, Square::D1));
    }

    #[test]
    fn shield_piece_is_pinned() {
        // The e2-bishop is the only thing between the white king and the
        // black rook; stepping aside exposes the king.
        let pinned = board("4r3/8/8/8/8/8/4B3/4K3");
        assert!(!is_legal(&pinned, Player::White, Square::E2, Square::D3));
        assert!(!is_legal(&pinned, Player::White, Square::E2, Square::F1));
        // Without the rook the same bishop move is legal.
        let free = board("8/8/8/8/8/8/4B3/4K3");
        assert!(is_legal(&free, Player::White, Square::E2, Square::D3));
    }

    #[test]
    fn check_must_be_answered() {
        // White king on e1 is in check from the e8-rook; a rook move that
        // does not address the check stays illegal, blocking it is fine.
        let checked = board("4r3/8/8/8/8/8/R7/4K3");
        assert!(in_check(&checked, Player::White));
        assert!(!is_legal(&checked, Player::White, Square::A2, Square::A3));
        assert!(is_legal(&checked, Player::White, Square::A2, Square::E2));
        assert!(is_legal(&checked, Player::White, Square::E1, Square::D1));
    }

    #[test]
    fn destination_sets() {
        let starting = Board::starting();
        let pawn = legal_destinations(&starting, Player::White, Square::E2);
        assert_eq!(pawn.as_slice(), [Square::E3, Square::E4]);
        let knight = legal_destinations(&starting, Player::White, Square::B1);
        assert_eq!(knight.as_slice(), [Square::A3, Square::C3]);
        // Blocked pieces and the opponent's pieces have no destinations.
        assert!(legal_destinations(&starting, Player::White, Square::A1).is_empty());
        assert!(legal_destinations(&starting, Player::White, Square::E7).is_empty());
        assert!(legal_destinations(&starting, Player::White, Square::E4).is_empty());
    }

    #[test]
    fn apply_move_reports_capture() {
        let capture = board("8/8/8/8/R2p4/8/8/8");
        let (after, captured) = apply_move(&capture, Square::A4, Square::D4);
        assert_eq!(
            captured,
            Some(Piece {
                owner: Player::Black,
                kind: PieceKind::Pawn,
            })
        );
        assert_eq!(after.at(Square::A4), None);
        assert_eq!(
            after.at(Square::D4),
            Some(Piece {
                owner: Player::White,
                kind: PieceKind::Rook,
            })
        );
        // The original board is untouched.
        assert!(capture.at(Square::A4).is_some());
    }
}
