// Copyright 2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Random self-play, for exercising the rules engine over many games.

use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

use crate::{
    core::Move,
    game::{Game, GameOutcome},
    tracing::constants,
};

/// Parameters of a self-play run.
#[derive(Clone, Debug)]
pub struct SelfPlayOptions {
    /// Seed for the move picker. Equal seeds play equal games.
    pub seed: u64,

    /// Number of plies after which an unfinished game is abandoned.
    pub max_plies: u32,
}

impl Default for SelfPlayOptions {
    fn default() -> Self {
        SelfPlayOptions {
            seed: 0,
            max_plies: 300,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SelfPlayResult {
    pub outcome: GameOutcome,
    pub moves: Vec<Move>,
    pub final_fen: String,
}

/// Plays a single game from the starting position, picking uniformly among legal moves.
pub fn play(options: &SelfPlayOptions) -> SelfPlayResult {
    play_from(Game::new(), options)
}

/// Plays out `game` the same way as [`play`].
pub fn play_from(mut game: Game, options: &SelfPlayOptions) -> SelfPlayResult {
    let mut rng = SmallRng::seed_from_u64(options.seed);
    let mut played = Vec::new();
    tracing::info!(
        event = constants::GAME_START,
        fen = %game.as_fen(),
        seed = options.seed,
        "game start"
    );
    while !game.is_over() && (played.len() as u32) < options.max_plies {
        let moves = game.legal_moves();
        let mov = match moves.choose(&mut rng) {
            Some(&mov) => mov,
            None => {
                // No check in this variant, so a side without moves simply cannot continue.
                tracing::debug!(fen = %game.as_fen(), "no legal moves");
                break;
            }
        };

        if game.apply_move(mov).is_err() {
            break;
        }
        played.push(mov);
    }

    SelfPlayResult {
        outcome: game.game_state(),
        moves: played,
        final_fen: game.as_fen(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        game::{Game, GameOutcome},
        selfplay::*,
    };

    #[test]
    fn same_seed_same_game() {
        let options = SelfPlayOptions {
            seed: 42,
            ..Default::default()
        };
        let a = play(&options);
        let b = play(&options);
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.final_fen, b.final_fen);
    }

    #[test]
    fn respects_ply_cap() {
        let options = SelfPlayOptions {
            seed: 7,
            max_plies: 4,
        };
        let result = play(&options);
        assert!(result.moves.len() <= 4);
    }

    #[test]
    fn replay_matches_result() {
        for seed in 0..10 {
            let options = SelfPlayOptions {
                seed,
                ..Default::default()
            };
            let result = play(&options);
            let mut game = Game::new();
            for &mov in &result.moves {
                assert!(game.apply_move(mov).is_ok(), "seed {}: {} rejected", seed, mov);
            }
            assert_eq!(result.outcome, game.game_state());
            assert_eq!(result.final_fen, game.as_fen());
        }
    }

    #[test]
    fn finished_game_plays_nothing() {
        let game = Game::from_fen("8/8/8/8/8/8/8/4K3 w").unwrap();
        let result = play_from(game, &SelfPlayOptions::default());
        assert!(result.moves.is_empty());
        assert_eq!(GameOutcome::WhiteWon, result.outcome);
    }
}
