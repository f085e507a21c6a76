// Copyright 2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move legality for atomic chess.
//!
//! Everything in this module is a pure function of a board and the side to move. Nothing here mutates a board; the
//! consequences of a legal move are applied by [`crate::game::Game`].

use thiserror::Error;

use crate::{board::Board, core::*};

/// The reason a move was rejected by [`check_move`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("source and destination are the same square")]
    SameSquare,
    #[error("no piece on {0}")]
    NoPiece(Square),
    #[error("the piece on {0} does not belong to the side to move")]
    NotYourPiece(Square),
    #[error("kings cannot capture")]
    KingCannotCapture,
    #[error("destination {0} is occupied by a friendly piece")]
    OwnPieceAtDestination(Square),
    #[error("a {0:?} cannot move that way")]
    IllegalPattern(PieceKind),
    #[error("path is blocked at {0}")]
    PathBlocked(Square),
}

/// Returns whether `turn` may move the piece on `start` to `end`.
pub fn is_legal(board: &Board, turn: Color, start: Square, end: Square) -> bool {
    check_move(board, turn, start, end).is_ok()
}

/// Checks a move for legality, reporting the first rule it breaks.
pub fn check_move(
    board: &Board,
    turn: Color,
    start: Square,
    end: Square,
) -> Result<(), IllegalMove> {
    if start == end {
        return Err(IllegalMove::SameSquare);
    }

    let piece = board.piece_at(start).ok_or(IllegalMove::NoPiece(start))?;
    if piece.color != turn {
        return Err(IllegalMove::NotYourPiece(start));
    }

    let target = board.piece_at(end);

    // Kings never capture, even onto an enemy piece.
    if piece.kind == PieceKind::King && target.is_some() {
        return Err(IllegalMove::KingCannotCapture);
    }

    if matches!(target, Some(t) if t.color == turn) {
        return Err(IllegalMove::OwnPieceAtDestination(end));
    }

    let drow = end.row() - start.row();
    let dcol = end.col() - start.col();
    match piece.kind {
        PieceKind::Pawn => check_pawn(board, turn, start, end),
        PieceKind::Knight => {
            let (r, c) = (drow.abs(), dcol.abs());
            if (r, c) == (1, 2) || (r, c) == (2, 1) {
                Ok(())
            } else {
                Err(IllegalMove::IllegalPattern(PieceKind::Knight))
            }
        }
        PieceKind::Bishop => {
            check_slide(board, start, end, is_diagonal(drow, dcol), PieceKind::Bishop)
        }
        PieceKind::Rook => {
            check_slide(board, start, end, is_straight(drow, dcol), PieceKind::Rook)
        }
        PieceKind::Queen => check_slide(
            board,
            start,
            end,
            is_diagonal(drow, dcol) || is_straight(drow, dcol),
            PieceKind::Queen,
        ),
        PieceKind::King => {
            if drow.abs() <= 1 && dcol.abs() <= 1 {
                Ok(())
            } else {
                Err(IllegalMove::IllegalPattern(PieceKind::King))
            }
        }
    }
}

fn is_diagonal(drow: i8, dcol: i8) -> bool {
    drow != 0 && drow.abs() == dcol.abs()
}

fn is_straight(drow: i8, dcol: i8) -> bool {
    (drow == 0) != (dcol == 0)
}

fn check_pawn(board: &Board, turn: Color, start: Square, end: Square) -> Result<(), IllegalMove> {
    let forward = turn.forward();
    let drow = end.row() - start.row();
    let dcol = end.col() - start.col();
    let occupied = board.is_occupied(end);

    let legal = match (drow, dcol.abs()) {
        // Single push.
        (r, 0) if r == forward => !occupied,
        // Double push from the home row; both squares ahead must be empty.
        (r, 0) if r == 2 * forward && start.row() == turn.pawn_home_row() => {
            let skipped = start.offset(forward, 0);
            !occupied && skipped.map_or(false, |sq| !board.is_occupied(sq))
        }
        // Diagonal steps are only ever captures.
        (r, 1) if r == forward => occupied,
        _ => false,
    };

    if legal {
        Ok(())
    } else {
        Err(IllegalMove::IllegalPattern(PieceKind::Pawn))
    }
}

/// Validates a sliding move: `shape_ok` says whether the piece may travel along the line from `start` to `end`, and the
/// squares strictly between the two must be empty.
fn check_slide(
    board: &Board,
    start: Square,
    end: Square,
    shape_ok: bool,
    kind: PieceKind,
) -> Result<(), IllegalMove> {
    if !shape_ok {
        return Err(IllegalMove::IllegalPattern(kind));
    }

    match first_blocker(board, start, end) {
        Some(blocker) => Err(IllegalMove::PathBlocked(blocker)),
        None => Ok(()),
    }
}

/// Walks from `start` toward `end`, exclusive of both, and returns the first occupied square on the way.
pub fn first_blocker(board: &Board, start: Square, end: Square) -> Option<Square> {
    let dir = Direction::between(start, end)?;
    let mut current = start.towards(dir)?;
    while current != end {
        if board.is_occupied(current) {
            return Some(current);
        }

        current = current.towards(dir)?;
    }

    None
}

#[cfg(test)]
mod tests {
    fn board(placement: &str) -> crate::board::Board {
        crate::board::Board::from_placement(placement).unwrap()
    }

    mod general {
        use super::board;
        use crate::{board::Board, core::*, rules::*};

        #[test]
        fn same_square() {
            let b = Board::starting_position();
            assert_eq!(Err(IllegalMove::SameSquare), check_move(&b, Color::White, E2, E2));
        }

        #[test]
        fn empty_source() {
            let b = Board::starting_position();
            assert_eq!(Err(IllegalMove::NoPiece(E4)), check_move(&b, Color::White, E4, E5));
        }

        #[test]
        fn wrong_color() {
            let b = Board::starting_position();
            assert_eq!(
                Err(IllegalMove::NotYourPiece(E7)),
                check_move(&b, Color::White, E7, E6)
            );
            assert_eq!(
                Err(IllegalMove::NotYourPiece(E2)),
                check_move(&b, Color::Black, E2, E3)
            );
        }

        #[test]
        fn cannot_capture_own_piece() {
            let b = board("4k3/8/8/8/8/8/3P4/4KN2");
            assert_eq!(
                Err(IllegalMove::OwnPieceAtDestination(D2)),
                check_move(&b, Color::White, F1, D2)
            );
        }
    }

    mod king {
        use super::board;
        use crate::{core::*, rules::*};

        #[test]
        fn single_steps() {
            let b = board("4k3/8/8/8/3K4/8/8/8");
            for dest in [C3, C4, C5, D3, D5, E3, E4, E5] {
                assert!(is_legal(&b, Color::White, D4, dest), "Kd4-{} should be legal", dest);
            }
            assert!(!is_legal(&b, Color::White, D4, D6));
            assert!(!is_legal(&b, Color::White, D4, F4));
        }

        #[test]
        fn cannot_capture_enemy() {
            let b = board("4k3/8/8/3p4/3K4/8/8/8");
            assert_eq!(
                Err(IllegalMove::KingCannotCapture),
                check_move(&b, Color::White, D4, D5)
            );
        }

        #[test]
        fn cannot_move_onto_friend() {
            let b = board("4k3/8/8/3P4/3K4/8/8/8");
            assert_eq!(
                Err(IllegalMove::KingCannotCapture),
                check_move(&b, Color::White, D4, D5)
            );
        }
    }

    mod pawn {
        use super::board;
        use crate::{board::Board, core::*, rules::*};

        #[test]
        fn single_and_double_push() {
            let b = Board::starting_position();
            assert!(is_legal(&b, Color::White, D2, D3));
            assert!(is_legal(&b, Color::White, D2, D4));
            assert!(is_legal(&b, Color::Black, E7, E6));
            assert!(is_legal(&b, Color::Black, E7, E5));
        }

        #[test]
        fn triple_push_is_illegal() {
            let b = Board::starting_position();
            assert!(!is_legal(&b, Color::White, E2, E5));
        }

        #[test]
        fn backwards_is_illegal() {
            let b = board("4k3/8/8/8/4P3/8/8/4K3");
            assert!(!is_legal(&b, Color::White, E4, E3));
            let b = board("4k3/8/8/4p3/8/8/8/4K3");
            assert!(!is_legal(&b, Color::Black, E5, E6));
        }

        #[test]
        fn double_push_only_from_home_row() {
            let b = board("4k3/8/8/8/8/4P3/8/4K3");
            assert!(!is_legal(&b, Color::White, E3, E5));
        }

        #[test]
        fn double_push_blocked() {
            let b = board("4k3/8/8/8/8/4n3/4P3/4K3");
            assert!(!is_legal(&b, Color::White, E2, E4));
            let b = board("4k3/8/8/8/4n3/8/4P3/4K3");
            assert!(!is_legal(&b, Color::White, E2, E4));
            assert!(is_legal(&b, Color::White, E2, E3));
        }

        #[test]
        fn forward_capture_is_illegal() {
            let b = board("4k3/8/8/8/4p3/4P3/8/4K3");
            assert!(!is_legal(&b, Color::White, E3, E4));
            assert!(!is_legal(&b, Color::Black, E4, E3));
        }

        #[test]
        fn diagonal_requires_enemy() {
            let b = board("4k3/8/8/8/3p4/4P3/8/4K3");
            assert!(is_legal(&b, Color::White, E3, D4));
            assert!(!is_legal(&b, Color::White, E3, F4));
            assert!(is_legal(&b, Color::Black, D4, E3));
            assert!(!is_legal(&b, Color::Black, D4, C3));
        }

        #[test]
        fn diagonal_backwards_is_illegal() {
            let b = board("4k3/8/8/8/3P4/4p3/8/4K3");
            assert!(!is_legal(&b, Color::Black, E3, D4));
        }
    }

    mod knight {
        use crate::{board::Board, core::*, rules::*};

        #[test]
        fn l_shapes() {
            let b = Board::starting_position();
            assert!(is_legal(&b, Color::White, B1, A3));
            assert!(is_legal(&b, Color::White, B1, C3));
            assert!(is_legal(&b, Color::Black, G8, F6));
        }

        #[test]
        fn not_an_l() {
            let b = Board::starting_position();
            assert_eq!(
                Err(IllegalMove::IllegalPattern(PieceKind::Knight)),
                check_move(&b, Color::White, B1, B3)
            );
        }

        #[test]
        fn jumps_over_pieces() {
            let b = Board::starting_position();
            assert!(is_legal(&b, Color::White, G1, F3));
        }
    }

    mod sliders {
        use super::board;
        use crate::{board::Board, core::*, rules::*};

        #[test]
        fn bishop_blocked_at_start() {
            let b = Board::starting_position();
            assert_eq!(
                Err(IllegalMove::PathBlocked(D2)),
                check_move(&b, Color::White, C1, E3)
            );
        }

        #[test]
        fn bishop_open_diagonal() {
            let b = board("4k3/8/8/8/8/8/8/2B1K3");
            assert!(is_legal(&b, Color::White, C1, H6));
            assert!(is_legal(&b, Color::White, C1, A3));
            assert!(!is_legal(&b, Color::White, C1, C5));
        }

        #[test]
        fn bishop_blocked_by_enemy() {
            let b = board("4k3/8/8/8/8/4p3/8/2B1K3");
            assert_eq!(
                Err(IllegalMove::PathBlocked(E3)),
                check_move(&b, Color::White, C1, F4)
            );
            assert!(!is_legal(&b, Color::White, C1, G5));
            assert!(is_legal(&b, Color::White, C1, E3));
        }

        #[test]
        fn rook_lines() {
            let b = board("4k3/8/8/8/3R4/8/8/4K3");
            assert!(is_legal(&b, Color::White, D4, D8));
            assert!(is_legal(&b, Color::White, D4, A4));
            assert!(is_legal(&b, Color::White, D4, H4));
            assert!(is_legal(&b, Color::White, D4, D1));
            assert_eq!(
                Err(IllegalMove::IllegalPattern(PieceKind::Rook)),
                check_move(&b, Color::White, D4, E5)
            );
        }

        #[test]
        fn rook_blocked_by_either_color() {
            let b = board("4k3/3p4/8/8/3R1P2/8/8/4K3");
            assert_eq!(
                Err(IllegalMove::PathBlocked(F4)),
                check_move(&b, Color::White, D4, G4)
            );
            assert_eq!(
                Err(IllegalMove::PathBlocked(D7)),
                check_move(&b, Color::White, D4, D8)
            );
            assert!(is_legal(&b, Color::White, D4, D7));
        }

        #[test]
        fn queen_is_union_of_rook_and_bishop() {
            let b = board("4k3/8/8/8/3Q4/8/8/4K3");
            assert!(is_legal(&b, Color::White, D4, D8));
            assert!(is_legal(&b, Color::White, D4, H8));
            assert!(is_legal(&b, Color::White, D4, A1));
            assert!(is_legal(&b, Color::White, D4, A4));
            assert_eq!(
                Err(IllegalMove::IllegalPattern(PieceKind::Queen)),
                check_move(&b, Color::White, D4, E6)
            );
        }

        #[test]
        fn queen_blocked() {
            let b = Board::starting_position();
            assert_eq!(
                Err(IllegalMove::PathBlocked(D2)),
                check_move(&b, Color::White, D1, D4)
            );
        }
    }
}
