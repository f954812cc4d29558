// Copyright 2017-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{
    convert::TryFrom,
    fmt::{self, Write},
};

use thiserror::Error;

use crate::core::{self, *};

/// The placement of every piece on the chessboard. A Board knows nothing about the rules; it stores at most one
/// piece per square and keeps its per-piece and per-color sets in agreement.
///
/// Boards are small and `Copy`, so taking a snapshot before a speculative change is a plain assignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    /// Occupied squares per piece, indexed by color then kind.
    sets_by_piece: [SquareSet; 12],
    /// Occupied squares per color, the union of that color's six piece sets.
    sets_by_color: [SquareSet; 2],
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementParseError {
    #[error("unexpected char: {0}")]
    UnexpectedChar(char),
    #[error("unexpected end of placement")]
    UnexpectedEnd,
    #[error("unknown piece: {0}")]
    UnknownPiece(char),
    #[error("invalid digit")]
    InvalidDigit,
    #[error("rank does not sum to 8")]
    FileDoesNotSumToEight,
    #[error("trailing input after placement: {0:?}")]
    TrailingInput(String),
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Board {
        Board {
            sets_by_piece: [SquareSet::empty(); 12],
            sets_by_color: [SquareSet::empty(); 2],
        }
    }

    /// The standard 32-piece starting layout.
    pub fn start_position() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (file, kind) in core::files().zip(BACK_RANK) {
            board.place(Square::of(RANK_1, file), Piece::new(Color::White, kind));
            board.place(Square::of(RANK_2, file), Piece::new(Color::White, PieceKind::Pawn));
            board.place(Square::of(RANK_7, file), Piece::new(Color::Black, PieceKind::Pawn));
            board.place(Square::of(RANK_8, file), Piece::new(Color::Black, kind));
        }

        board
    }

    fn set_index(piece: Piece) -> usize {
        let offset = match piece.color {
            Color::White => 0,
            Color::Black => 6,
        };
        offset + piece.kind as usize
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        let (board_offset, color) = if self.sets_by_color[Color::White as usize].contains(square) {
            (0, Color::White)
        } else if self.sets_by_color[Color::Black as usize].contains(square) {
            (6, Color::Black)
        } else {
            return None;
        };

        core::piece_kinds()
            .find(|&kind| self.sets_by_piece[kind as usize + board_offset].contains(square))
            .map(|kind| Piece { kind, color })
    }

    /// Puts `piece` on `square`, returning whatever piece previously stood there.
    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        let previous = self.remove(square);
        self.sets_by_color[piece.color as usize].insert(square);
        self.sets_by_piece[Board::set_index(piece)].insert(square);
        previous
    }

    /// Clears `square`, returning the piece that stood there, if any.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let existing_piece = self.get(square)?;
        self.sets_by_color[existing_piece.color as usize].remove(square);
        self.sets_by_piece[Board::set_index(existing_piece)].remove(square);
        Some(existing_piece)
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupied().contains(square)
    }

    pub fn occupied(&self) -> SquareSet {
        self.sets_by_color[Color::White as usize] | self.sets_by_color[Color::Black as usize]
    }

    pub fn pieces(&self, color: Color) -> SquareSet {
        self.sets_by_color[color as usize]
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> SquareSet {
        self.sets_by_piece[Board::set_index(Piece::new(color, kind))]
    }

    /// Pawns of both colors.
    pub fn pawns(&self) -> SquareSet {
        self.pieces_of_kind(Color::White, PieceKind::Pawn)
            | self.pieces_of_kind(Color::Black, PieceKind::Pawn)
    }

    pub fn king_count(&self, color: Color) -> u32 {
        self.pieces_of_kind(color, PieceKind::King).len()
    }

    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces_of_kind(color, PieceKind::King).into_iter().next()
    }

    /// Iterates over every occupied square and the piece on it, from a1 to h8.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied()
            .into_iter()
            .filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }
}

impl Board {
    /// Constructs a board from the piece placement field of a FEN string, e.g.
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn from_placement(placement: impl AsRef<str>) -> Result<Board, PlacementParseError> {
        use std::{iter::Peekable, str::Chars};

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat(iter: &mut Stream<'_>, expected: char) -> Result<(), PlacementParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(PlacementParseError::UnexpectedChar(c)),
                None => Err(PlacementParseError::UnexpectedEnd),
            }
        }

        fn peek(iter: &mut Stream<'_>) -> Result<char, PlacementParseError> {
            iter.peek().copied().ok_or(PlacementParseError::UnexpectedEnd)
        }

        let mut board = Board::empty();
        let iter = &mut placement.as_ref().chars().peekable();
        for rank in core::ranks().rev() {
            let mut file = 0u8;
            while file <= 7 {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if let Some(value) = c.to_digit(10) {
                    if !(1..=8).contains(&value) {
                        return Err(PlacementParseError::InvalidDigit);
                    }

                    file += value as u8;
                    if file > 8 {
                        return Err(PlacementParseError::FileDoesNotSumToEight);
                    }

                    iter.next();
                    continue;
                }

                if c == '/' {
                    return Err(PlacementParseError::FileDoesNotSumToEight);
                }

                // if it's not a digit, it represents a piece.
                let piece = Piece::try_from(c).map_err(|_| PlacementParseError::UnknownPiece(c))?;
                let file_index =
                    File::try_from(file).map_err(|_| PlacementParseError::FileDoesNotSumToEight)?;
                board.place(Square::of(rank, file_index), piece);
                iter.next();
                file += 1;
            }

            if rank != core::RANK_1 {
                eat(iter, '/')?;
            }
        }

        let rest: String = iter.collect();
        if !rest.is_empty() {
            return Err(PlacementParseError::TrailingInput(rest));
        }

        Ok(board)
    }

    /// The piece placement field of a FEN string describing this board.
    pub fn as_placement(&self) -> String {
        let mut buf = String::new();
        for rank in core::ranks().rev() {
            let mut empty_squares = 0;
            for file in core::files() {
                let square = Square::of(rank, file);
                if let Some(piece) = self.get(square) {
                    if empty_squares != 0 {
                        let _ = write!(&mut buf, "{}", empty_squares);
                    }
                    buf.push(piece.as_char());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                let _ = write!(&mut buf, "{}", empty_squares);
            }

            if rank != core::RANK_1 {
                buf.push('/');
            }
        }

        buf
    }
}

/// Renders the board as an 8x8 grid, rank 8 on top, one space between squares and `.` for an empty square.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in core::ranks().rev() {
            for file in core::files() {
                if file != core::FILE_A {
                    f.write_char(' ')?;
                }

                match self.get(Square::of(rank, file)) {
                    Some(piece) => f.write_char(piece.as_char())?,
                    None => f.write_char('.')?,
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::start_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn start_position_layout() {
        let board = Board::start_position();
        assert_eq!(32, board.occupied().len());
        assert_eq!(
            Some(Piece::new(Color::White, PieceKind::King)),
            board.get(E1)
        );
        assert_eq!(
            Some(Piece::new(Color::Black, PieceKind::Queen)),
            board.get(D8)
        );
        assert_eq!(
            Some(Piece::new(Color::White, PieceKind::Knight)),
            board.get(G1)
        );
        for sq in core::squares() {
            let rank = sq.rank();
            let expect_occupied = rank == RANK_1 || rank == RANK_2 || rank == RANK_7 || rank == RANK_8;
            assert_eq!(expect_occupied, board.is_occupied(sq), "square {}", sq);
        }
        for file in core::files() {
            assert_eq!(
                Some(Piece::new(Color::White, PieceKind::Pawn)),
                board.get(Square::of(RANK_2, file))
            );
            assert_eq!(
                Some(Piece::new(Color::Black, PieceKind::Pawn)),
                board.get(Square::of(RANK_7, file))
            );
        }
    }

    #[test]
    fn place_and_remove() {
        let mut board = Board::empty();
        let rook = Piece::new(Color::White, PieceKind::Rook);
        assert_eq!(None, board.place(D4, rook));
        assert!(board.is_occupied(D4));
        assert_eq!(Some(rook), board.get(D4));

        let bishop = Piece::new(Color::Black, PieceKind::Bishop);
        assert_eq!(Some(rook), board.place(D4, bishop));
        assert_eq!(Some(bishop), board.get(D4));
        assert!(board.pieces(Color::White).is_empty());

        assert_eq!(Some(bishop), board.remove(D4));
        assert_eq!(None, board.remove(D4));
        assert_eq!(Board::empty(), board);
    }

    #[test]
    fn snapshot_is_independent() {
        let mut board = Board::start_position();
        let snapshot = board;
        board.remove(E2);
        assert_ne!(snapshot, board);
        assert!(snapshot.is_occupied(E2));
        board = snapshot;
        assert_eq!(Board::start_position(), board);
    }

    #[test]
    fn kings() {
        let board = Board::start_position();
        assert_eq!(Some(E1), board.king(Color::White));
        assert_eq!(Some(E8), board.king(Color::Black));
        assert_eq!(1, board.king_count(Color::Black));
        assert_eq!(16, board.pawns().len());
    }

    #[test]
    fn iter_pairs_square_with_piece() {
        let board = Board::from_placement("8/8/8/8/8/8/8/K6k").unwrap();
        let pieces: Vec<_> = board.iter().collect();
        assert_eq!(
            vec![
                (A1, Piece::new(Color::White, PieceKind::King)),
                (H1, Piece::new(Color::Black, PieceKind::King)),
            ],
            pieces
        );
    }

    #[test]
    fn placement_roundtrip() {
        let board = Board::from_placement(START).unwrap();
        assert_eq!(Board::start_position(), board);
        assert_eq!(START, board.as_placement());

        let sparse = "4k3/8/8/3p4/4P3/8/8/4K3";
        assert_eq!(sparse, Board::from_placement(sparse).unwrap().as_placement());
    }

    #[test]
    fn placement_errors() {
        assert_eq!(
            Err(PlacementParseError::UnexpectedEnd),
            Board::from_placement("")
        );
        assert_eq!(
            Err(PlacementParseError::UnknownPiece('x')),
            Board::from_placement("x7/8/8/8/8/8/8/8")
        );
        assert_eq!(
            Err(PlacementParseError::InvalidDigit),
            Board::from_placement("0/8/8/8/8/8/8/8")
        );
        assert_eq!(
            Err(PlacementParseError::FileDoesNotSumToEight),
            Board::from_placement("45/8/8/8/8/8/8/8")
        );
        assert_eq!(
            Err(PlacementParseError::FileDoesNotSumToEight),
            Board::from_placement("7/8/8/8/8/8/8/8")
        );
        assert_eq!(
            Err(PlacementParseError::TrailingInput(" w".to_owned())),
            Board::from_placement("8/8/8/8/8/8/8/8 w")
        );
    }

    #[test]
    fn render_start_position() {
        let expected = "\
r n b q k b n r
p p p p p p p p
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
P P P P P P P P
R N B Q K B N R
";
        assert_eq!(expected, Board::start_position().to_string());
    }
}
