// Copyright 2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A game handle that can be shared between threads. Every operation holds the game's lock for its whole duration, so
//! no caller ever observes a board in the middle of a speculative move.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    board::Board,
    core::Square,
    game::{Game, GameState, MoveError},
};

#[derive(Clone, Default)]
pub struct SharedGame {
    game: Arc<Mutex<Game>>,
}

impl SharedGame {
    pub fn new(game: Game) -> SharedGame {
        SharedGame {
            game: Arc::new(Mutex::new(game)),
        }
    }

    // Nothing in a move can panic once the board has been touched, so a poisoned game is still consistent.
    fn lock(&self) -> MutexGuard<'_, Game> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn make_move(&self, from: Square, to: Square) -> bool {
        self.lock().make_move(from, to)
    }

    pub fn try_make_move(&self, from: Square, to: Square) -> Result<GameState, MoveError> {
        self.lock().try_make_move(from, to)
    }

    pub fn game_state(&self) -> GameState {
        self.lock().game_state()
    }

    /// A copy of the board as of the last committed move.
    pub fn board(&self) -> Board {
        *self.lock().board()
    }

    pub fn render_board(&self) -> String {
        self.lock().render_board()
    }

    /// Runs `f` with exclusive access to the game.
    pub fn with_game<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::core::*;

    #[test]
    fn handles_share_one_game() {
        let shared = SharedGame::new(Game::new());
        let other = shared.clone();
        assert!(shared.make_move(E2, E4));
        assert_eq!(Color::Black, other.with_game(|g| g.side_to_move()));
        assert!(other.board().is_occupied(E4));
    }

    #[test]
    fn racing_identical_moves() {
        let shared = SharedGame::new(Game::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.make_move(E2, E4))
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();
        assert_eq!(1, accepted);
        assert_eq!(1, shared.with_game(|g| g.history().len()));
        assert_eq!(GameState::Unfinished, shared.game_state());
    }

    #[test]
    fn rejected_moves_through_the_handle() {
        let shared = SharedGame::new(Game::new());
        let before = shared.board();
        assert_eq!(
            Err(MoveError::IllegalMove { from: C1, to: A3 }),
            shared.try_make_move(C1, A3)
        );
        assert_eq!(before, shared.board());
        assert_eq!(Board::start_position().to_string(), shared.render_board());
    }
}
