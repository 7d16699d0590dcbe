use criterion::{black_box, criterion_group, criterion_main, Criterion};
use arcade_rewards::core::{Board, SnakeEngine, StackerEngine, STACKER_GRID};
use arcade_rewards::engine::{ActiveGame, Session};
use arcade_rewards::types::PieceKind;

fn bench_snake_tick(c: &mut Criterion) {
    let mut game = SnakeEngine::with_seed(12345);
    game.start();

    c.bench_function("snake_tick", |b| {
        b.iter(|| {
            if !game.is_running() {
                game.start();
            }
            black_box(game.tick());
        })
    });
}

fn bench_stacker_tick(c: &mut Criterion) {
    let mut game = StackerEngine::with_seed(12345);
    game.start();

    c.bench_function("stacker_gravity_tick", |b| {
        b.iter(|| {
            if game.game_over() {
                game.start();
            }
            black_box(game.tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new(STACKER_GRID);
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut game = StackerEngine::with_seed(12345);
    game.start();

    c.bench_function("move_right", |b| {
        b.iter(|| {
            black_box(game.move_right());
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut game = StackerEngine::with_seed(12345);
    game.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(game.rotate());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut game = StackerEngine::with_seed(12345);
    game.start();

    c.bench_function("hard_drop_with_spawn", |b| {
        b.iter(|| {
            if game.game_over() {
                game.start();
            }
            black_box(game.hard_drop());
        })
    });
}

fn bench_session_frame(c: &mut Criterion) {
    let mut session: Session = Session::new(ActiveGame::snake(12345), None);
    session.start();

    c.bench_function("session_update_16ms", |b| {
        b.iter(|| {
            if !session.game().phase().is_running() {
                session.start();
            }
            black_box(session.update(16));
        })
    });
}

criterion_group!(
    benches,
    bench_snake_tick,
    bench_stacker_tick,
    bench_line_clear,
    bench_try_move,
    bench_try_rotate,
    bench_hard_drop,
    bench_session_frame
);
criterion_main!(benches);
