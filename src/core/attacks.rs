// Copyright 2017-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Precomputed single-step tables. The king table doubles as the blast radius of a detonation: the squares a king
//! can step to are exactly the neighbours an explosion reaches.
use std::sync::LazyLock;

use crate::core::*;

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

struct StepTable {
    table: [SquareSet; 64],
}

impl StepTable {
    fn new(steps: &[(i8, i8)]) -> StepTable {
        let mut st = StepTable {
            table: [SquareSet::empty(); 64],
        };

        for sq in squares() {
            let mut board = SquareSet::empty();
            for &(file_delta, rank_delta) in steps {
                // Steps that walk off the edge of the board are dropped.
                if let Some(target) = sq.offset(file_delta, rank_delta) {
                    board.insert(target);
                }
            }

            st.table[sq.0 as usize] = board;
        }

        st
    }

    fn attacks(&self, sq: Square) -> SquareSet {
        self.table[sq.0 as usize]
    }
}

static KING_TABLE: LazyLock<StepTable> = LazyLock::new(|| StepTable::new(&KING_STEPS));
static KNIGHT_TABLE: LazyLock<StepTable> = LazyLock::new(|| StepTable::new(&KNIGHT_STEPS));

/// The (up to eight) squares adjacent to `sq`.
pub fn king_attacks(sq: Square) -> SquareSet {
    KING_TABLE.attacks(sq)
}

pub fn knight_attacks(sq: Square) -> SquareSet {
    KNIGHT_TABLE.attacks(sq)
}
