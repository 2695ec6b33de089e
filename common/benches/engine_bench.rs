use criterion::{Criterion, SamplingMode, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use common::games::SessionRng;
use common::games::tictactoe::{Board, GameEngine, Mode, RoundOutcome, calculate_random_move, check_win};

fn bench_random_playout(rng: &mut SessionRng) -> RoundOutcome {
    let mut engine = GameEngine::with_mode(Mode::SinglePlayer);

    loop {
        let outcome = if engine.is_bot_turn() {
            engine.compute_bot_move(rng)
        } else {
            let index = match calculate_random_move(engine.board(), rng) {
                Some(index) => index,
                None => return engine.outcome(),
            };
            engine.place_mark(index)
        };

        match outcome {
            Some(RoundOutcome::InProgress) => {}
            Some(finished) => return finished,
            None => return engine.outcome(),
        }
    }
}

fn bench_win_scan_empty_board() {
    let board = Board::new();
    black_box(check_win(black_box(&board)));
}

fn engine_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    group
        .sampling_mode(SamplingMode::Flat)
        .measurement_time(Duration::from_secs(10));

    let mut rng = SessionRng::new(7);
    group.bench_function("random_playout", |b| {
        b.iter(|| bench_random_playout(&mut rng))
    });

    group.bench_function("win_scan_empty", |b| {
        b.iter(bench_win_scan_empty_board)
    });

    group.finish();
}

criterion_group!(benches, engine_bench);
criterion_main!(benches);
