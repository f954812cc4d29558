// Copyright 2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use atomic_chess::core::{self, Color};
use atomic_chess::{explosion, validate, Board, Game};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("quiet-move-clonemake", |b| {
        let game = Game::new();
        b.iter(|| {
            let mut game = black_box(&game).clone();
            game.make_move(black_box(core::E2), black_box(core::E4));
        });
    });

    c.bench_function("capture-clonemake", |b| {
        let mut game = Game::new();
        game.make_move(core::E2, core::E4);
        game.make_move(core::D7, core::D5);
        b.iter(|| {
            let mut game = black_box(&game).clone();
            game.make_move(black_box(core::E4), black_box(core::D5));
        });
    });

    c.bench_function("self-destruction-rollback", |b| {
        let board = Board::from_placement("4k3/8/8/8/8/3n4/3QK3/8").unwrap();
        let game = Game::from_board(board, Color::White).unwrap();
        b.iter(|| {
            let mut game = black_box(&game).clone();
            game.make_move(black_box(core::D2), black_box(core::D3));
        });
    });

    c.bench_function("validate-all-pairs-start", |b| {
        let board = Board::start_position();
        b.iter(|| {
            let mut legal = 0;
            for from in core::squares() {
                for to in core::squares() {
                    if validate::is_legal(black_box(&board), Color::White, from, to) {
                        legal += 1;
                    }
                }
            }
            legal
        });
    });

    c.bench_function("detonate-crowded", |b| {
        let board = Board::from_placement("4k3/8/2nbr3/2Q1B3/2RpN3/8/8/4K3").unwrap();
        b.iter(|| {
            let mut board = black_box(board);
            explosion::detonate(&mut board, black_box(core::D5))
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
