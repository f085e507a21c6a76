// Copyright 2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    board::{Board, FenParseError},
    core::*,
    explosion::{self, Explosion},
    movegen,
    rules::{self, IllegalMove},
    tracing::constants,
};

/// The state of a game. Once a game is won it stays won.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    WhiteWon,
    BlackWon,
}

impl GameOutcome {
    pub fn won_by(color: Color) -> GameOutcome {
        match color {
            Color::White => GameOutcome::WhiteWon,
            Color::Black => GameOutcome::BlackWon,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::InProgress => None,
            GameOutcome::WhiteWon => Some(Color::White),
            GameOutcome::BlackWon => Some(Color::Black),
        }
    }

    pub fn is_over(self) -> bool {
        self != GameOutcome::InProgress
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameOutcome::InProgress => "UNFINISHED",
            GameOutcome::WhiteWon => "WHITE_WON",
            GameOutcome::BlackWon => "BLACK_WON",
        };

        write!(f, "{}", s)
    }
}

/// Reasons a move attempt can fail. None of them change the game.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error(transparent)]
    InvalidNotation(#[from] SquareParseError),
    #[error("the game is already over ({0})")]
    GameOver(GameOutcome),
    #[error("illegal move: {0}")]
    Illegal(#[from] IllegalMove),
}

/// What happened when a move was played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub mov: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub explosion: Option<Explosion>,
    pub outcome: GameOutcome,
}

/// A game of atomic chess: a board, the side to move, and the outcome so far.
///
/// The board is only ever changed by playing moves through [`Game::apply_move`] and friends; illegal moves and moves
/// played after the game has ended leave every part of the game untouched.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    outcome: GameOutcome,
}

impl Game {
    /// Starts a new game from the standard starting position with White to move.
    pub fn new() -> Game {
        Game {
            board: Board::starting_position(),
            side_to_move: Color::White,
            outcome: GameOutcome::InProgress,
        }
    }

    /// Loads a game from a FEN string. Only the piece placement and side to move are read; castling rights, the
    /// en-passant square and the move clocks mean nothing in this variant and are ignored if present.
    pub fn from_fen(fen: impl AsRef<str>) -> Result<Game, FenParseError> {
        let mut fields = fen.as_ref().split_whitespace();
        let placement = fields.next().ok_or(FenParseError::UnexpectedEnd)?;
        let board = Board::from_placement(placement)?;
        let side_to_move = match fields.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(FenParseError::InvalidSideToMove),
            None => return Err(FenParseError::UnexpectedEnd),
        };

        let outcome = explosion::missing_king_winner(&board, side_to_move.toggle())
            .map_or(GameOutcome::InProgress, GameOutcome::won_by);
        Ok(Game {
            board,
            side_to_move,
            outcome,
        })
    }

    pub fn as_fen(&self) -> String {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };

        format!("{} {}", self.board.as_placement(), side)
    }

    /// A read-only view of the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Prints the board to stdout, White at the bottom.
    pub fn print_board(&self) {
        print!("{}", self.board);
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn game_state(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    /// Every legal move for the side to move. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        if !self.is_over() {
            movegen::generate_moves(self.side_to_move, &self.board, &mut moves);
        }

        moves
    }

    /// Attempts to move the piece on `start` to `end`, both in algebraic notation. Returns whether the move was made.
    pub fn make_move(&mut self, start: &str, end: &str) -> bool {
        self.try_make_move(start, end).is_ok()
    }

    /// Like [`Game::make_move`], but says what happened or why the move was refused.
    pub fn try_make_move(&mut self, start: &str, end: &str) -> Result<MoveReport, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver(self.outcome));
        }

        let mov = Move::new(start.parse()?, end.parse()?);
        self.apply_move(mov)
    }

    /// Plays a move: relocates the piece, detonates on a capture, passes the turn, and settles the outcome.
    pub fn apply_move(&mut self, mov: Move) -> Result<MoveReport, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver(self.outcome));
        }

        let (source, dest) = (mov.source(), mov.destination());
        if let Err(reason) = rules::check_move(&self.board, self.side_to_move, source, dest) {
            tracing::debug!(mov = %mov, %reason, "rejected move");
            return Err(reason.into());
        }

        let mover = self.side_to_move;
        let piece = self
            .board
            .take(source)
            .ok_or(IllegalMove::NoPiece(source))?;
        let captured = self.board.put(dest, piece);
        tracing::info!(
            event = constants::MOVE_MADE,
            side = %mover,
            mov = %mov,
            piece = %piece,
            captured = captured.is_some(),
            "move made"
        );

        let explosion = captured.map(|_| explosion::resolve_explosion(&mut self.board, dest));
        if let Some(winner) = explosion.as_ref().and_then(|e| e.winner) {
            self.outcome = GameOutcome::won_by(winner);
        }

        self.side_to_move = mover.toggle();
        // Kings only leave the board in an explosion, which has already settled the outcome, and positions
        // without a king are decided when loaded. This scan is a backstop and does not fire for legal play.
        if !self.outcome.is_over() {
            if let Some(winner) = explosion::missing_king_winner(&self.board, mover) {
                self.outcome = GameOutcome::won_by(winner);
            }
        }

        if self.outcome.is_over() {
            tracing::info!(
                event = constants::GAME_OVER,
                outcome = %self.outcome,
                fen = %self.as_fen(),
                "game over"
            );
        }

        Ok(MoveReport {
            mov,
            piece,
            captured,
            explosion,
            outcome: self.outcome,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.board)?;
        match self.outcome {
            GameOutcome::InProgress => writeln!(f, "{} to move", self.side_to_move),
            outcome => writeln!(f, "{}", outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    mod basic {
        use crate::{core::*, game::*};

        #[test]
        fn new_game() {
            let game = Game::new();
            assert_eq!(GameOutcome::InProgress, game.game_state());
            assert_eq!(Color::White, game.side_to_move());
            assert_eq!(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
                game.as_fen()
            );
        }

        #[test]
        fn opening_pawn_push() {
            let mut game = Game::new();
            assert!(game.make_move("d2", "d4"));
            assert!(game.board().piece_at(D2).is_none());
            assert_eq!(
                Some(Piece::new(Color::White, PieceKind::Pawn)),
                game.board().piece_at(D4)
            );
            assert_eq!(Color::Black, game.side_to_move());
        }

        #[test]
        fn illegal_pawn_distance() {
            let mut game = Game::new();
            let before = game.board().clone();
            assert!(!game.make_move("e2", "e5"));
            assert_eq!(&before, game.board());
            assert_eq!(Color::White, game.side_to_move());
        }

        #[test]
        fn knight_not_an_l() {
            let mut game = Game::new();
            assert!(!game.make_move("b1", "b3"));
            assert!(game.make_move("b1", "c3"));
        }

        #[test]
        fn turns_alternate_only_on_success() {
            let mut game = Game::new();
            assert!(!game.make_move("e7", "e5"));
            assert_eq!(Color::White, game.side_to_move());
            assert!(game.make_move("e2", "e4"));
            assert_eq!(Color::Black, game.side_to_move());
            assert!(!game.make_move("e4", "e5"));
            assert_eq!(Color::Black, game.side_to_move());
            assert!(game.make_move("e7", "e5"));
            assert_eq!(Color::White, game.side_to_move());
        }

        #[test]
        fn malformed_notation() {
            let mut game = Game::new();
            assert!(!game.make_move("z9", "d4"));
            assert!(!game.make_move("d2", "d44"));
            assert_eq!(
                Err(MoveError::InvalidNotation(SquareParseError::InvalidNotation(
                    "x1".to_owned()
                ))),
                game.try_make_move("x1", "d4")
            );
            assert_eq!(Color::White, game.side_to_move());
        }

        #[test]
        fn rejection_reason() {
            let mut game = Game::new();
            assert_eq!(
                Err(MoveError::Illegal(IllegalMove::PathBlocked(D2))),
                game.try_make_move("d1", "d3")
            );
        }

        #[test]
        fn start_position_move_count() {
            assert_eq!(20, Game::new().legal_moves().len());
        }
    }

    mod atomic {
        use crate::{
            core::*,
            explosion,
            game::*,
            selfplay::{self, SelfPlayOptions},
        };

        fn play(game: &mut Game, moves: &[(&str, &str)]) {
            for &(start, end) in moves {
                assert!(game.make_move(start, end), "{}-{} should be legal", start, end);
            }
        }

        #[test]
        fn knight_blows_up_black_king() {
            let mut game = Game::new();
            play(&mut game, &[("g1", "f3"), ("a7", "a6"), ("f3", "g5"), ("a6", "a5")]);
            let report = game.try_make_move("g5", "f7").unwrap();
            assert_eq!(GameOutcome::WhiteWon, game.game_state());
            assert_eq!(GameOutcome::WhiteWon, report.outcome);
            assert_eq!(
                Some(Piece::new(Color::Black, PieceKind::Pawn)),
                report.captured
            );

            let explosion = report.explosion.unwrap();
            assert_eq!(F7, explosion.center);
            assert_eq!(Some(Color::White), explosion.winner);
            assert!(game.board().king(Color::Black).is_none());
            // e8, f8, g8 and the two pieces on f7 are gone; the pawns on e7 and g7 survive.
            assert!(game.board().piece_at(F8).is_none());
            assert!(game.board().piece_at(G8).is_none());
            assert!(game.board().piece_at(F7).is_none());
            assert!(game.board().piece_at(E7).is_some());
            assert!(game.board().piece_at(G7).is_some());
        }

        #[test]
        fn black_wins_then_everything_is_rejected() {
            let mut game = Game::new();
            play(
                &mut game,
                &[("a2", "a3"), ("g8", "f6"), ("a3", "a4"), ("f6", "g4"), ("a4", "a5")],
            );
            assert!(game.make_move("g4", "f2"));
            assert_eq!(GameOutcome::BlackWon, game.game_state());

            let board = game.board().clone();
            let side = game.side_to_move();
            assert!(!game.make_move("b2", "b3"));
            assert!(!game.make_move("e7", "e6"));
            assert_eq!(
                Err(MoveError::GameOver(GameOutcome::BlackWon)),
                game.try_make_move("b2", "b4")
            );
            assert_eq!(&board, game.board());
            assert_eq!(side, game.side_to_move());
            assert_eq!(GameOutcome::BlackWon, game.game_state());
            assert!(game.legal_moves().is_empty());
        }

        #[test]
        fn suicide_capture() {
            // The white queen takes on d2, right next to its own king.
            let mut game = Game::from_fen("4k3/8/8/8/8/8/3p4/3QK3 w").unwrap();
            assert!(game.make_move("d1", "d2"));
            assert_eq!(GameOutcome::BlackWon, game.game_state());
            assert!(game.board().king(Color::White).is_none());
        }

        #[test]
        fn pawns_survive_neighbouring_blast() {
            let mut game = Game::from_fen("4k3/8/8/2ppp3/3n4/2B5/8/4K3 w").unwrap();
            assert!(game.make_move("c3", "d4"));
            for sq in [C5, D5, E5] {
                assert!(game.board().piece_at(sq).is_some(), "pawn on {} should survive", sq);
            }
            assert!(game.board().piece_at(D4).is_none());
            assert!(game.board().piece_at(C3).is_none());
            assert_eq!(GameOutcome::InProgress, game.game_state());
            assert_eq!(Color::Black, game.side_to_move());
        }

        #[test]
        fn explosion_and_king_scan_agree() {
            for seed in 0..20 {
                let options = SelfPlayOptions {
                    seed,
                    max_plies: 200,
                };
                let result = selfplay::play(&options);
                let mut game = Game::new();
                for &mov in &result.moves {
                    let report = game.apply_move(mov).unwrap();
                    let by_explosion = report.explosion.and_then(|e| e.winner);
                    let by_scan = explosion::missing_king_winner(game.board(), report.piece.color);
                    assert_eq!(by_scan, by_explosion, "seed {}: {}", seed, mov);
                }
            }
        }

        #[test]
        fn king_cannot_capture() {
            let mut game = Game::from_fen("4k3/8/8/8/8/8/4p3/4K3 w").unwrap();
            assert!(!game.make_move("e1", "e2"));
            assert_eq!(Color::White, game.side_to_move());
            assert!(game.make_move("e1", "d1"));
        }
    }

    mod fen {
        use crate::{board::FenParseError, core::*, game::*};

        #[test]
        fn side_to_move() {
            let game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 b").unwrap();
            assert_eq!(Color::Black, game.side_to_move());
            assert_eq!("4k3/8/8/8/8/8/8/4K3 b", game.as_fen());
        }

        #[test]
        fn extra_fields_ignored() {
            let game =
                Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
            assert_eq!(Game::new().as_fen(), game.as_fen());
        }

        #[test]
        fn bad_side_to_move() {
            let err = Game::from_fen("4k3/8/8/8/8/8/8/4K3 c").unwrap_err();
            assert_eq!(FenParseError::InvalidSideToMove, err);
        }

        #[test]
        fn missing_side_to_move() {
            let err = Game::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap_err();
            assert_eq!(FenParseError::UnexpectedEnd, err);
        }

        #[test]
        fn missing_king_is_decided() {
            let game = Game::from_fen("8/8/8/8/8/8/8/4K3 b").unwrap();
            assert_eq!(GameOutcome::WhiteWon, game.game_state());
        }
    }
}
