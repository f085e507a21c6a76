// Copyright 2017-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `tracing` module interfaces with the `tracing` crate to record what happens over the course of a game: moves,
//! explosions and the final result. The events are plain `tracing` events, so any subscriber can print them; the
//! [`game::GameLogLayer`] additionally turns them into a replayable JSON-lines log.

pub mod constants;
pub mod game;
