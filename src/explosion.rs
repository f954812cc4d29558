// Copyright 2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The blast that follows every capture.

use serde::Serialize;

use crate::{board::Board, core::*};

/// A piece destroyed by a detonation, and the square it was standing on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Casualty {
    pub square: Square,
    pub piece: Piece,
}

/// Detonates a capture on `center`. Every non-pawn piece on the squares adjacent to `center` is removed, then whatever
/// stands on `center` itself is removed regardless of its kind. Pieces destroyed by the blast do not detonate in turn.
///
/// Returns the destroyed pieces, neighbours first and the center last.
pub fn detonate(board: &mut Board, center: Square) -> Vec<Casualty> {
    let victims = king_attacks(center) & board.occupied() & !board.pawns();
    let mut casualties = Vec::with_capacity(victims.len() as usize + 1);
    for square in victims {
        if let Some(piece) = board.remove(square) {
            casualties.push(Casualty { square, piece });
        }
    }

    if let Some(piece) = board.remove(center) {
        casualties.push(Casualty {
            square: center,
            piece,
        });
    }

    casualties
}
