// Copyright 2017-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::core::*;

const SOURCE_SHIFT: u16 = 6;
const SQUARE_MASK: u16 = 0x003F;

/// A move from one square to another.
///
/// Atomic chess as played here has no castling, promotion, or en-passant, so a move is nothing more than its two
/// squares. Whether a move captures is a property of the board it is played on, not of the move.
///
/// ## Encoding
///  * 6 bits - source square
///  * 6 bits - destination square
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move(u16);

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move must be four ASCII characters: {0:?}")]
    Malformed(String),
    #[error(transparent)]
    InvalidSquare(#[from] SquareParseError),
}

impl Move {
    pub fn new(source: Square, dest: Square) -> Move {
        Move((source.as_u8() as u16) << SOURCE_SHIFT | dest.as_u8() as u16)
    }

    pub fn source(self) -> Square {
        Square(((self.0 >> SOURCE_SHIFT) & SQUARE_MASK) as u8)
    }

    pub fn destination(self) -> Square {
        Square((self.0 & SQUARE_MASK) as u8)
    }

    /// Renders the move as a pair of coordinates, e.g. `d2d4`.
    pub fn as_uci(self) -> String {
        format!("{}{}", self.source(), self.destination())
    }

    /// Parses a pair of coordinates such as `d2d4`.
    pub fn from_uci(move_str: &str) -> Result<Move, MoveParseError> {
        if move_str.len() != 4 || !move_str.is_ascii() {
            return Err(MoveParseError::Malformed(move_str.to_owned()));
        }

        let source = move_str[0..2].parse()?;
        let dest = move_str[2..4].parse()?;
        Ok(Move::new(source, dest))
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_uci(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source(), self.destination())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}
