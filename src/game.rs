// Copyright 2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A game of atomic chess, driven one move at a time.
//!
//! Moves are applied optimistically: the board is snapshotted, the move is played and any capture detonated, and the
//! result is inspected. If the mover's own king did not survive, the snapshot is restored and the move is rejected.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::{
    board::Board,
    core::*,
    explosion::{self, Casualty},
    validate::{self, RuleOptions},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    Unfinished,
    WhiteWon,
    BlackWon,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::Unfinished
    }

    pub fn won_by(color: Color) -> GameState {
        match color {
            Color::White => GameState::WhiteWon,
            Color::Black => GameState::BlackWon,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameState::Unfinished => None,
            GameState::WhiteWon => Some(Color::White),
            GameState::BlackWon => Some(Color::Black),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Unfinished => write!(f, "UNFINISHED"),
            GameState::WhiteWon => write!(f, "WHITE_WON"),
            GameState::BlackWon => write!(f, "BLACK_WON"),
        }
    }
}

/// Why a move was refused. A refused move leaves the game exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is over ({0})")]
    GameOver(GameState),
    #[error("there is no piece on {0}")]
    EmptySquare(Square),
    #[error("the piece on {square} belongs to {owner}, but it is {to_move}'s turn")]
    WrongTurn {
        square: Square,
        owner: Color,
        to_move: Color,
    },
    #[error("{from}{to} is not a legal move")]
    IllegalMove { from: Square, to: Square },
    #[error("{from}{to} would destroy the mover's own king")]
    SelfDestruction { from: Square, to: Square },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    #[error("{0} has no king")]
    MissingKing(Color),
    #[error("{0} has {1} kings")]
    ExtraKings(Color, u32),
}

/// A move that was committed to the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub color: Color,
    pub from: Square,
    pub to: Square,
    /// The piece standing on `to` before the move, if the move was a capture.
    pub captured: Option<Piece>,
    pub casualties: Vec<Casualty>,
    pub state: GameState,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    state: GameState,
    options: RuleOptions,
    history: Vec<MoveRecord>,
}

impl Game {
    /// A new game from the standard starting position, White to move.
    pub fn new() -> Game {
        Game {
            board: Board::start_position(),
            side_to_move: Color::White,
            state: GameState::Unfinished,
            options: RuleOptions::default(),
            history: Vec::new(),
        }
    }

    /// A game starting from an arbitrary board. Each side must have exactly one king.
    pub fn from_board(board: Board, side_to_move: Color) -> Result<Game, SetupError> {
        for color in colors() {
            match board.king_count(color) {
                0 => return Err(SetupError::MissingKing(color)),
                1 => {}
                n => return Err(SetupError::ExtraKings(color, n)),
            }
        }

        Ok(Game {
            board,
            side_to_move,
            ..Game::new()
        })
    }

    pub fn with_options(mut self, options: RuleOptions) -> Game {
        self.options = options;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn game_state(&self) -> GameState {
        self.state
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    /// Every committed move, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn render_board(&self) -> String {
        self.board.to_string()
    }

    /// Plays `from` to `to` for the side to move, returning whether the move was accepted.
    pub fn make_move(&mut self, from: Square, to: Square) -> bool {
        self.try_make_move(from, to).is_ok()
    }

    /// Plays `from` to `to` for the side to move. On success the move is committed and the turn passes; on failure
    /// nothing about the game changes.
    pub fn try_make_move(&mut self, from: Square, to: Square) -> Result<GameState, MoveError> {
        let result = self.make_move_inner(from, to);
        if let Err(ref err) = result {
            tracing::debug!(%from, %to, "rejected move: {}", err);
        }
        result
    }

    fn make_move_inner(&mut self, from: Square, to: Square) -> Result<GameState, MoveError> {
        if self.state.is_terminal() {
            return Err(MoveError::GameOver(self.state));
        }

        let us = self.side_to_move;
        let piece = self.board.get(from).ok_or(MoveError::EmptySquare(from))?;
        if piece.color != us {
            return Err(MoveError::WrongTurn {
                square: from,
                owner: piece.color,
                to_move: us,
            });
        }

        if !validate::is_legal_with(&self.board, us, from, to, &self.options) {
            return Err(MoveError::IllegalMove { from, to });
        }

        let snapshot = self.board;
        self.board.remove(from);
        let captured = self.board.place(to, piece);
        let casualties = if captured.is_some() {
            explosion::detonate(&mut self.board, to)
        } else {
            Vec::new()
        };

        let them = us.toggle();
        if self.board.king_count(us) == 0 {
            tracing::debug!(%from, %to, "{} king destroyed by own blast, rolling back", us);
            self.board = snapshot;
            return Err(MoveError::SelfDestruction { from, to });
        }

        if self.board.king_count(them) == 0 {
            self.state = GameState::won_by(us);
            tracing::info!(%from, %to, "{} king destroyed, {} wins", them, us);
        }

        self.side_to_move = them;
        self.history.push(MoveRecord {
            color: us,
            from,
            to,
            captured,
            casualties,
            state: self.state,
        });
        tracing::trace!(%from, %to, placement = %self.board.as_placement(), "committed move");
        Ok(self.state)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
