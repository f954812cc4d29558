// Copyright 2021-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pattern legality for a single move. Nothing here looks at what a capture would blow up; that is decided by the
//! game after the move has been tried.

use crate::{board::Board, core::*};

/// Switches for rule details that vary between implementations of atomic chess.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleOptions {
    /// Require the square a pawn skips over on its two-square advance to be empty. Off by default, in which case only
    /// the destination square is checked.
    pub strict_double_push: bool,
}

/// Returns whether `us` may move the piece on `from` to `to` under the default rules.
pub fn is_legal(board: &Board, us: Color, from: Square, to: Square) -> bool {
    is_legal_with(board, us, from, to, &RuleOptions::default())
}

/// Returns whether `us` may move the piece on `from` to `to`. Only the movement pattern of the piece, the occupancy of
/// its path, and the color of whatever stands on `to` are considered.
pub fn is_legal_with(
    board: &Board,
    us: Color,
    from: Square,
    to: Square,
    options: &RuleOptions,
) -> bool {
    if from == to {
        return false;
    }

    let piece = match board.get(from) {
        Some(piece) if piece.color == us => piece,
        _ => return false,
    };

    let target = board.get(to);
    if matches!(target, Some(other) if other.color == us) {
        return false;
    }

    let col_diff = from.file().distance(to.file());
    let row_diff = from.rank().distance(to.rank());
    let straight = col_diff == 0 || row_diff == 0;
    let diagonal = col_diff == row_diff;
    match piece.kind {
        PieceKind::Pawn => pawn_move_is_legal(board, us, from, to, target.is_some(), options),
        PieceKind::Knight => knight_attacks(from).contains(to),
        PieceKind::Bishop => diagonal && path_is_clear(board, from, to),
        PieceKind::Rook => straight && path_is_clear(board, from, to),
        PieceKind::Queen => (straight || diagonal) && path_is_clear(board, from, to),
        PieceKind::King => king_attacks(from).contains(to),
    }
}

fn pawn_move_is_legal(
    board: &Board,
    us: Color,
    from: Square,
    to: Square,
    is_capture: bool,
    options: &RuleOptions,
) -> bool {
    let forward = us.forward();
    let rank_delta = to.rank().as_u8() as i8 - from.rank().as_u8() as i8;
    let col_diff = from.file().distance(to.file());
    if rank_delta == forward {
        return match col_diff {
            0 => !is_capture,
            // The target's color was checked by the caller, so any piece here is an enemy.
            1 => is_capture,
            _ => false,
        };
    }

    if rank_delta == 2 * forward && col_diff == 0 && from.rank() == us.pawn_rank() {
        if is_capture {
            return false;
        }

        return !options.strict_double_push
            || from
                .offset(0, forward)
                .map_or(false, |skipped| !board.is_occupied(skipped));
    }

    false
}

/// Walks from `from` towards `to` one square at a time and reports whether every square strictly between the two is
/// empty. `from` and `to` must share a file, a rank, or a diagonal.
fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    let file_step = (to.file().as_u8() as i8 - from.file().as_u8() as i8).signum();
    let rank_step = (to.rank().as_u8() as i8 - from.rank().as_u8() as i8).signum();
    let mut cursor = from;
    loop {
        cursor = match cursor.offset(file_step, rank_step) {
            Some(next) => next,
            None => return false,
        };

        if cursor == to {
            return true;
        }

        if board.is_occupied(cursor) {
            return false;
        }
    }
}
