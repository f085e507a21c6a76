// Copyright 2017-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{
    convert::TryFrom,
    fmt::{self, Write},
};

use thiserror::Error;

use crate::core::{self, *};

/// Piece placement of the standard chess starting position.
pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// The contents of the 64 squares of a chessboard.
///
/// A Board only knows where pieces are. It is read freely by everyone, but mutated only by the game that owns it while
/// it executes a move or resolves an explosion.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    pub fn starting_position() -> Board {
        let mut board = Board::empty();
        for &(sq, piece) in START_LAYOUT.iter() {
            board.squares[sq.as_u8() as usize] = Some(piece);
        }

        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_u8() as usize]
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// All squares holding a piece of the given color.
    pub fn pieces(&self, color: Color) -> SquareSet {
        core::squares()
            .filter(|&sq| matches!(self.piece_at(sq), Some(p) if p.color == color))
            .collect()
    }

    pub fn occupied(&self) -> SquareSet {
        core::squares().filter(|&sq| self.is_occupied(sq)).collect()
    }

    /// Returns the square of `color`'s king, if it is still on the board.
    pub fn king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        core::squares().find(|&sq| self.piece_at(sq) == Some(king))
    }

    /// Places `piece` on `square`, returning whatever was there before.
    pub(crate) fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.squares[square.as_u8() as usize].replace(piece)
    }

    /// Clears `square`, returning the piece that was on it.
    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.as_u8() as usize].take()
    }
}

static START_LAYOUT: [(Square, Piece); 32] = {
    use Color::*;
    use PieceKind::*;

    const fn p(color: Color, kind: PieceKind) -> Piece {
        Piece::new(color, kind)
    }

    [
        (A1, p(White, Rook)),
        (B1, p(White, Knight)),
        (C1, p(White, Bishop)),
        (D1, p(White, Queen)),
        (E1, p(White, King)),
        (F1, p(White, Bishop)),
        (G1, p(White, Knight)),
        (H1, p(White, Rook)),
        (A2, p(White, Pawn)),
        (B2, p(White, Pawn)),
        (C2, p(White, Pawn)),
        (D2, p(White, Pawn)),
        (E2, p(White, Pawn)),
        (F2, p(White, Pawn)),
        (G2, p(White, Pawn)),
        (H2, p(White, Pawn)),
        (A7, p(Black, Pawn)),
        (B7, p(Black, Pawn)),
        (C7, p(Black, Pawn)),
        (D7, p(Black, Pawn)),
        (E7, p(Black, Pawn)),
        (F7, p(Black, Pawn)),
        (G7, p(Black, Pawn)),
        (H7, p(Black, Pawn)),
        (A8, p(Black, Rook)),
        (B8, p(Black, Knight)),
        (C8, p(Black, Bishop)),
        (D8, p(Black, Queen)),
        (E8, p(Black, King)),
        (F8, p(Black, Bishop)),
        (G8, p(Black, Knight)),
        (H8, p(Black, Rook)),
    ]
};

//
// Piece placement parsing and generation.
//
// The piece placement field of a FEN string describes the board rank by rank, starting at the eighth rank. Runs of
// empty squares are written as a digit and pieces as their letter.
//

/// Possible errors that can arise when parsing a FEN string.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum FenParseError {
    #[error("unexpected char: {0}")]
    UnexpectedChar(char),
    #[error("unexpected EOF while reading")]
    UnexpectedEnd,
    #[error("invalid digit")]
    InvalidDigit,
    #[error("file does not sum to 8")]
    FileDoesNotSumToEight,
    #[error("unknown piece: {0}")]
    UnknownPiece(char),
    #[error("invalid side to move")]
    InvalidSideToMove,
}

impl Board {
    /// Parses the piece placement field of a FEN string, e.g. `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn from_placement(placement: &str) -> Result<Board, FenParseError> {
        let mut board = Board::empty();
        let mut iter = placement.chars().peekable();
        for rank in core::ranks().rev() {
            let mut file = 0u8;
            while file <= 7 {
                let c = match iter.peek() {
                    Some('/') => return Err(FenParseError::FileDoesNotSumToEight),
                    Some(&c) => c,
                    None if file > 0 => return Err(FenParseError::FileDoesNotSumToEight),
                    None => return Err(FenParseError::UnexpectedEnd),
                };
                if let Some(value) = c.to_digit(10) {
                    if !(1..=8).contains(&value) {
                        return Err(FenParseError::InvalidDigit);
                    }

                    file += value as u8;
                    if file > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    iter.next();
                    continue;
                }

                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
                let square = Square::of(
                    rank,
                    File::try_from(file).map_err(|_| FenParseError::FileDoesNotSumToEight)?,
                );
                board.put(square, piece);
                iter.next();
                file += 1;
            }

            if rank != core::RANK_1 {
                match iter.next() {
                    Some('/') => {}
                    Some(c) => return Err(FenParseError::UnexpectedChar(c)),
                    None => return Err(FenParseError::UnexpectedEnd),
                }
            }
        }

        if let Some(c) = iter.next() {
            return Err(FenParseError::UnexpectedChar(c));
        }

        Ok(board)
    }

    pub fn as_placement(&self) -> String {
        let mut buf = String::new();
        for rank in core::ranks().rev() {
            let mut empty_squares = 0;
            for file in core::files() {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    if empty_squares != 0 {
                        buf.push(char::from(b'0' + empty_squares));
                    }
                    buf.push(piece.as_char());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push(char::from(b'0' + empty_squares));
            }

            if rank != core::RANK_1 {
                buf.push('/');
            }
        }

        buf
    }
}

/// Renders the board top to bottom, one letter per piece and `.` for an empty square. The alternate form (`{:#}`)
/// labels ranks and files.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in core::ranks().rev() {
            let mut row = String::with_capacity(16);
            for file in core::files() {
                if file != core::FILE_A {
                    row.push(' ');
                }
                match self.piece_at(Square::of(rank, file)) {
                    Some(piece) => row.push(piece.as_char()),
                    None => row.push('.'),
                }
            }

            if f.alternate() {
                writeln!(f, "{} | {}", rank, row)?;
            } else {
                writeln!(f, "{}", row)?;
            }
        }

        if f.alternate() {
            let mut labels = String::new();
            for file in core::files() {
                write!(&mut labels, " {}", file)?;
            }
            writeln!(f, "    {}", "-".repeat(15))?;
            writeln!(f, "    {}", labels.trim_start())?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board({})", self.as_placement())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}
