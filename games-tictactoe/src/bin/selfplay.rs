//! Self-play demo: the engine plays both sides of a tic-tac-toe game.
//!
//! Each turn builds a fresh search rooted at the current position, with
//! rewards scored for the player to move, and applies the returned
//! action.

use std::rc::Rc;

use anyhow::{anyhow, Result};
use clap::Parser;
use games_tictactoe::TicTacToe;
use mcts::{MctsConfig, MctsSearch};
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Engine self-play over tic-tac-toe")]
struct Args {
    /// Simulation iterations per move
    #[arg(long, default_value_t = 2000)]
    iterations: u32,

    /// Base RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut position = TicTacToe::new(args.seed);
    let mut turn = 0u64;

    while !position.is_over() {
        let root = TicTacToe::from_board(
            *position.board(),
            position.to_move(),
            args.seed.wrapping_add(turn),
        );
        let config = MctsConfig::default().with_iterations(args.iterations);

        let mut search = MctsSearch::new(Rc::new(root), config)?;
        let outcome = search.run()?;

        info!(
            turn,
            action = %outcome.action,
            value = outcome.value,
            nodes = outcome.nodes,
            "move chosen"
        );

        let cell: usize = outcome.action.parse()?;
        position = position
            .make_move(cell)
            .ok_or_else(|| anyhow!("engine chose an illegal move: {cell}"))?;

        println!("{position}\n");
        turn += 1;
    }

    match position.winner() {
        Some(1) => println!("X wins"),
        Some(-1) => println!("O wins"),
        None => println!("draw"),
        _ => unreachable!("winner() only returns Some(1), Some(-1), or None"),
    }

    Ok(())
}
