// Copyright 2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Explosions and king-loss detection.
//!
//! Every capture in atomic chess detonates on the capture square. The capturing piece and its victim are destroyed,
//! as is every piece other than a pawn on the eight surrounding squares. Losing a king this way, even to one's own
//! explosion, loses the game.

use crate::{
    board::Board,
    core::{self, *},
    tracing::constants,
};

/// The aftermath of a single explosion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Explosion {
    /// The square the capture happened on.
    pub center: Square,
    /// Every piece removed by the blast, in ascending square order, as it stood before the blast.
    pub destroyed: Vec<(Square, Piece)>,
    /// The side that won the game through this explosion, if a king was caught in it.
    pub winner: Option<Color>,
}

impl Explosion {
    /// Returns the colors of any kings destroyed by this explosion.
    pub fn kings_destroyed(&self) -> impl Iterator<Item = Color> + '_ {
        self.destroyed
            .iter()
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(_, piece)| piece.color)
    }
}

/// Detonates an explosion centered on `center`, where the capturing piece has just landed.
///
/// The piece on `center` is always removed. Pieces on the neighbouring squares are removed unless they are pawns. If
/// a king is among the removed pieces, the opposite color wins; should both kings go up in the same blast, the side
/// that made the capture is awarded the game.
pub fn resolve_explosion(board: &mut Board, center: Square) -> Explosion {
    let capturer = board.piece_at(center).map(|piece| piece.color);
    let mut destroyed = Vec::new();
    for sq in core::blast_radius(center) {
        let piece = match board.piece_at(sq) {
            Some(piece) => piece,
            None => continue,
        };

        if sq == center || piece.kind != PieceKind::Pawn {
            board.take(sq);
            destroyed.push((sq, piece));
        }
    }

    let mut explosion = Explosion {
        center,
        destroyed,
        winner: None,
    };

    let mut white_lost = false;
    let mut black_lost = false;
    for color in explosion.kings_destroyed() {
        match color {
            Color::White => white_lost = true,
            Color::Black => black_lost = true,
        }
    }

    explosion.winner = match (white_lost, black_lost) {
        (true, true) => capturer,
        (true, false) => Some(Color::Black),
        (false, true) => Some(Color::White),
        (false, false) => None,
    };

    tracing::info!(
        event = constants::EXPLOSION,
        center = %center,
        destroyed = %describe(&explosion.destroyed),
        "explosion"
    );
    explosion
}

/// Lists destroyed pieces as letter and square, e.g. `Nf7 ke8 bf8`.
fn describe(destroyed: &[(Square, Piece)]) -> String {
    destroyed
        .iter()
        .map(|(sq, piece)| format!("{}{}", piece, sq))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scans the whole board for both kings, returning whether (white, black) still have one.
pub fn kings_present(board: &Board) -> (bool, bool) {
    let mut white = false;
    let mut black = false;
    for sq in board.occupied() {
        match board.piece_at(sq) {
            Some(Piece {
                kind: PieceKind::King,
                color: Color::White,
            }) => white = true,
            Some(Piece {
                kind: PieceKind::King,
                color: Color::Black,
            }) => black = true,
            _ => {}
        }
    }

    (white, black)
}

/// Decides the game from king presence alone: a side without a king has lost.
///
/// `mover` breaks the tie when neither king remains.
pub fn missing_king_winner(board: &Board, mover: Color) -> Option<Color> {
    match kings_present(board) {
        (true, true) => None,
        (true, false) => Some(Color::White),
        (false, true) => Some(Color::Black),
        (false, false) => Some(mover),
    }
}
