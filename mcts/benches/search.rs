//! Search benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full searches with varying iteration budgets
//! - Searches from different game phases (opening, midgame, near-terminal)
//! - Isolated tree operations (allocation, best-child scan, backpropagation)

use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use games_tictactoe::TicTacToe;
use mcts::{MctsConfig, MctsSearch, SearchTree};

fn bench_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_iterations");

    for iterations in [50u32, 200, 800, 2000] {
        group.throughput(Throughput::Elements(u64::from(iterations)));
        group.bench_with_input(
            BenchmarkId::new("tictactoe", iterations),
            &iterations,
            |b, &iterations| {
                let config = MctsConfig::default().with_iterations(iterations);

                b.iter(|| {
                    let state = Rc::new(TicTacToe::new(42));
                    let mut search = MctsSearch::new(state, config.clone()).unwrap();
                    black_box(search.run().unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_game_phases");
    let config = MctsConfig::default().with_iterations(200);

    // (name, board, mark to move)
    let phases: [(&str, [i8; 9], i8); 3] = [
        ("opening", [0; 9], 1),
        ("midgame", [1, 0, 1, 0, -1, 0, -1, 0, 0], 1),
        ("near_terminal", [1, 1, 0, -1, -1, 0, 0, 0, 0], 1),
    ];

    for (name, board, to_move) in phases {
        group.bench_function(name, |b| {
            b.iter(|| {
                let state = Rc::new(TicTacToe::from_board(board, to_move, 42));
                let mut search = MctsSearch::new(state, config.clone()).unwrap();
                black_box(search.run().unwrap())
            });
        });
    }

    group.finish();
}

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_ops");

    // Node allocation plus index insertion
    group.bench_function("add_children", |b| {
        b.iter(|| {
            let mut tree = SearchTree::new(Rc::new(TicTacToe::new(0)), 12).unwrap();
            for cell in 0..9u32 {
                tree.add_child(
                    tree.root(),
                    cell.to_string(),
                    Rc::new(TicTacToe::new(u64::from(cell))),
                )
                .unwrap();
            }
            black_box(tree.len())
        });
    });

    // Best-child scan over a fully expanded node
    group.bench_function("best_child", |b| {
        let mut tree = SearchTree::new(Rc::new(TicTacToe::new(0)), 12).unwrap();
        for cell in 0..9u32 {
            let id = tree
                .add_child(
                    tree.root(),
                    cell.to_string(),
                    Rc::new(TicTacToe::new(u64::from(cell))),
                )
                .unwrap();
            let child = tree.get_mut(id);
            child.visit_count = (cell + 1) * 10;
            child.total_reward = i64::from(cell) - 4;
        }
        tree.get_mut(tree.root()).visit_count = 450;

        b.iter(|| black_box(tree.best_child(tree.root(), std::f64::consts::SQRT_2)));
    });

    // Backpropagation along a five-deep path
    group.bench_function("backpropagate_depth_5", |b| {
        b.iter_batched(
            || {
                let mut tree = SearchTree::new(Rc::new(TicTacToe::new(0)), 12).unwrap();
                let mut parent = tree.root();
                for depth in 0..5u32 {
                    parent = tree
                        .add_child(
                            parent,
                            depth.to_string(),
                            Rc::new(TicTacToe::new(u64::from(depth))),
                        )
                        .unwrap();
                }
                (tree, parent)
            },
            |(mut tree, leaf)| {
                tree.backpropagate(leaf, 1);
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_search_iterations,
    bench_game_phases,
    bench_tree_operations,
);

criterion_main!(benches);
