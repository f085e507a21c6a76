// Copyright 2017-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A rules engine for atomic chess.
//!
//! Atomic chess is played like ordinary chess, except that every capture sets off an explosion on the capture square.
//! The explosion destroys the capturing piece, its victim, and every piece other than a pawn on the surrounding
//! squares. A player whose king is destroyed loses. As a library, `atomic_chess` validates and executes moves,
//! resolves explosions and tracks the outcome of a game. As a set of executables, it can play games over a simple
//! text protocol, list legal moves, and run and analyze random self-play.

pub mod board;
pub mod core;
pub mod explosion;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod rules;
pub mod selfplay;
pub mod tracing;

pub use board::Board;
pub use game::{Game, GameOutcome};
