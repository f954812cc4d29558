// Copyright 2017-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rules for atomic chess.
//!
//! Pieces move as in ordinary chess, but every capture sets off an explosion that destroys the capturing piece, the
//! captured piece, and every piece other than a pawn on the eight surrounding squares. A move whose explosion would
//! take out the mover's own king is illegal. The game is won by destroying the opposing king.
//!
//! [`Game`] drives a game one move at a time; [`validate`] and [`explosion`] hold the rules it is built from.

pub mod board;
pub mod core;
pub mod explosion;
pub mod game;
pub mod shared;
pub mod validate;

pub use board::Board;
pub use game::{Game, GameState, MoveError};
pub use shared::SharedGame;
