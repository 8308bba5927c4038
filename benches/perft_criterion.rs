use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use slide_chess::game_state::chess_rules::ALTERNATE_GAP;
use slide_chess::game_state::game_state::GameState;
use slide_chess::move_generation::perft::{perft, perft_multi_threaded};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    build: fn() -> GameState,
    /// Known node counts from depth 1; deeper entries in `extra_depths` are
    /// timed without a count check.
    expected_nodes: &'static [u64],
    extra_depths: &'static [u8],
}

fn start_position() -> GameState {
    GameState::new_game()
}

fn alternate_gap_position() -> GameState {
    let mut state = GameState::new_game();
    state
        .board
        .relocate_gap(ALTERNATE_GAP)
        .expect("alternate gap slot is empty at the start");
    state
}

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "start",
        build: start_position,
        expected_nodes: &[21],
        extra_depths: &[2],
    },
    BenchCase {
        name: "alternate_gap",
        build: alternate_gap_position,
        expected_nodes: &[26],
        extra_depths: &[2],
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "start",
        build: start_position,
        expected_nodes: &[21],
        extra_depths: &[2, 3],
    },
    BenchCase {
        name: "alternate_gap",
        build: alternate_gap_position,
        expected_nodes: &[26],
        extra_depths: &[2, 3],
    },
];

fn selected_cases() -> &'static [BenchCase] {
    match std::env::var("SLIDE_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => CASES_STANDARD,
        _ => CASES_QUICK,
    }
}

fn bench_perft(c: &mut Criterion) {
    let suite_name = match std::env::var("SLIDE_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => "standard",
        _ => "quick",
    };

    let mut group = c.benchmark_group(format!("perft_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in selected_cases() {
        let game = (case.build)();

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let warmup = perft(&game, depth);
            assert_eq!(
                warmup.nodes as u64, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            let bench_name = format!("{}_d{}", case.name, depth);
            group.bench_with_input(
                BenchmarkId::from_parameter(bench_name),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let count = perft(black_box(&game), black_box(depth));
                        assert_eq!(count.nodes as u64, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }

        for &depth in case.extra_depths {
            let nodes = perft(&game, depth).nodes;
            assert_eq!(
                perft_multi_threaded(&game, depth).nodes,
                nodes,
                "threaded perft disagrees for {} depth {}",
                case.name,
                depth
            );

            group.throughput(Throughput::Elements(nodes as u64));
            let bench_name = format!("{}_d{}_threaded", case.name, depth);
            group.bench_with_input(BenchmarkId::from_parameter(bench_name), &nodes, |b, expected| {
                b.iter(|| {
                    let count = perft_multi_threaded(black_box(&game), black_box(depth));
                    assert_eq!(count.nodes, *expected);
                    black_box(count.nodes)
                });
            });
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
