// Copyright 2021-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Legal move generation.
//!
//! Atomic chess has no notion of check here, so every move the validator accepts is playable. Generation is therefore
//! a matter of proposing plausible destinations for each of our pieces and asking [`rules::is_legal`] about them.

use crate::{board::Board, core::*, rules};

/// Pushes every legal move for `us` on `board` into `moves`.
pub fn generate_moves(us: Color, board: &Board, moves: &mut Vec<Move>) {
    for source in board.pieces(us) {
        generate_moves_from(us, board, source, moves);
    }
}

/// Pushes every legal move for the piece on `source` into `moves`.
pub fn generate_moves_from(us: Color, board: &Board, source: Square, moves: &mut Vec<Move>) {
    let kind = match board.piece_at(source) {
        Some(piece) if piece.color == us => piece.kind,
        _ => return,
    };

    for dest in candidate_destinations(kind, us, source) {
        if rules::is_legal(board, us, source, dest) {
            moves.push(Move::new(source, dest));
        }
    }
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// Squares a piece of `kind` could conceivably reach from `source` on an empty board. A superset of the legal
/// destinations; the validator has the final say.
fn candidate_destinations(kind: PieceKind, us: Color, source: Square) -> SquareSet {
    let mut targets = SquareSet::empty();
    let mut add = |drow: i8, dcol: i8| {
        if let Some(sq) = source.offset(drow, dcol) {
            targets.insert(sq);
        }
    };

    match kind {
        PieceKind::Pawn => {
            let fwd = us.forward();
            add(fwd, 0);
            add(2 * fwd, 0);
            add(fwd, -1);
            add(fwd, 1);
        }
        PieceKind::Knight => {
            for (drow, dcol) in KNIGHT_DELTAS {
                add(drow, dcol);
            }
        }
        PieceKind::King => {
            for dir in Direction::ALL {
                let (drow, dcol) = dir.as_delta();
                add(drow, dcol);
            }
        }
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            for dir in Direction::ALL {
                let mut current = source.towards(dir);
                while let Some(sq) = current {
                    targets.insert(sq);
                    current = sq.towards(dir);
                }
            }
        }
    }

    targets
}
