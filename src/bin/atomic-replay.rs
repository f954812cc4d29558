// Copyright 2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use structopt::StructOpt;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use atomic_chess::{
    core::{Color, Square},
    game::MoveRecord,
    validate::RuleOptions,
    Board, Game, GameState,
};

/// Plays a sequence of moves and reports how the game turned out.
#[derive(Debug, StructOpt)]
struct Options {
    /// Moves to play, each a pair of squares such as `e2e4`.
    #[structopt(name = "MOVES")]
    moves: Vec<String>,
    /// Piece placement to start from instead of the standard layout, as in the first field of a FEN string.
    #[structopt(long)]
    placement: Option<String>,
    /// Side to move first.
    #[structopt(long, default_value = "white")]
    to_move: Color,
    /// Require the square a pawn skips over on a two-square advance to be empty.
    #[structopt(long)]
    strict_double_push: bool,
    /// Report rejected moves and carry on instead of stopping at the first one.
    #[structopt(long)]
    keep_going: bool,
    /// Print a JSON report instead of the board.
    #[structopt(long)]
    json: bool,
}

#[derive(Serialize)]
struct Rejection {
    index: usize,
    mov: String,
    reason: String,
}

#[derive(Serialize)]
struct Report<'a> {
    moves: &'a [MoveRecord],
    rejected: Vec<Rejection>,
    state: GameState,
    side_to_move: Color,
    placement: String,
}

fn parse_move(text: &str) -> anyhow::Result<(Square, Square)> {
    if text.len() != 4 || !text.is_ascii() {
        bail!("expected a pair of squares such as e2e4, got {:?}", text);
    }

    let from = text[..2]
        .parse()
        .with_context(|| format!("invalid move {:?}", text))?;
    let to = text[2..]
        .parse()
        .with_context(|| format!("invalid move {:?}", text))?;
    Ok((from, to))
}

/// Builds the log filter from the contents of `ATOMIC_LOG`. Anything not covered by a directive logs at WARN and above.
fn log_filter(directives: Option<String>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(std::env::var("ATOMIC_LOG").ok()))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let args = Options::from_args();
    let board = match args.placement {
        Some(ref placement) => Board::from_placement(placement).context("invalid placement")?,
        None => Board::start_position(),
    };
    let options = RuleOptions {
        strict_double_push: args.strict_double_push,
    };
    let mut game = Game::from_board(board, args.to_move)
        .context("invalid starting position")?
        .with_options(options);

    let mut rejected = vec![];
    for (index, text) in args.moves.iter().enumerate() {
        let (from, to) = parse_move(text)?;
        if let Err(err) = game.try_make_move(from, to) {
            if !args.keep_going {
                return Err(anyhow!(err).context(format!("move {} ({}) rejected", index + 1, text)));
            }

            tracing::warn!("move {} ({}) rejected: {}", index + 1, text, err);
            rejected.push(Rejection {
                index,
                mov: text.clone(),
                reason: err.to_string(),
            });
        }
    }

    if args.json {
        let report = Report {
            moves: game.history(),
            rejected,
            state: game.game_state(),
            side_to_move: game.side_to_move(),
            placement: game.board().as_placement(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", game.render_board());
        println!();
        println!("{:<16} {}", "State:", game.game_state());
        println!("{:<16} {}", "To move:", game.side_to_move());
        println!("{:<16} {}", "Moves played:", game.history().len());
        for rejection in &rejected {
            println!("rejected {} ({}): {}", rejection.index + 1, rejection.mov, rejection.reason);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomic_chess::core::{A1, E2, E4, H8};

    #[test]
    fn parses_square_pairs() {
        assert_eq!((E2, E4), parse_move("e2e4").unwrap());
        assert_eq!((H8, A1), parse_move("h8a1").unwrap());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(parse_move("e2e").is_err());
        assert!(parse_move("e2e44").is_err());
        assert!(parse_move("").is_err());
    }

    #[test]
    fn rejects_off_board_squares() {
        assert!(parse_move("i2e4").is_err());
        assert!(parse_move("e2e9").is_err());
        assert!(parse_move("E2E4").is_err());
    }

    #[test]
    fn logs_warnings_when_unconfigured() {
        assert_eq!(Some(LevelFilter::WARN), log_filter(None).max_level_hint());
        assert_eq!(Some(LevelFilter::WARN), log_filter(Some(String::new())).max_level_hint());
    }

    #[test]
    fn configured_level_overrides_default() {
        assert_eq!(Some(LevelFilter::DEBUG), log_filter(Some("debug".to_owned())).max_level_hint());
        assert_eq!(Some(LevelFilter::ERROR), log_filter(Some("error".to_owned())).max_level_hint());
    }

    #[test]
    fn rejects_non_ascii() {
        // four bytes, but not four characters
        assert!(parse_move("é2e").is_err());
        assert!(parse_move("e2é4").is_err());
    }
}
