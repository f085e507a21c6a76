// Copyright 2017-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tracing constants that are used elsewhere in the crate.
//!
//! Game events carry an `event` field with one of these known string values, so that they can be interpreted by
//! `tracing` Layers that are operating upon them. This module collects them all in one place.

/// A new game began. Fields: `fen`.
pub const GAME_START: &str = "game start";

/// A move passed validation and was played. Fields: `side`, `mov`, `piece`, `captured`.
pub const MOVE_MADE: &str = "move made";

/// A capture detonated. Fields: `center`, `destroyed`.
pub const EXPLOSION: &str = "explosion";

/// The game was decided. Fields: `outcome`, `fen`.
pub const GAME_OVER: &str = "game over";
