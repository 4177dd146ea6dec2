use anyhow::{Result, ensure};
use clap::Parser;
use cornered_core::{Direction, GameState, replay_moves, transition};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use std::io;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 100)]
    games: u32,
    #[arg(short, long, default_value_t = 1000)]
    max_moves: u32,
}

fn choose(rng: &mut ChaCha8Rng) -> Direction {
    let p = rng.next_u64() as usize % Direction::ALL.len();
    Direction::ALL[p]
}

fn check_invariants(previous: &GameState, next: &GameState) -> Result<()> {
    ensure!(next.is_in_grid(), "Invariant failed: position outside the grid");
    ensure!(next.score() == previous.score() + 1, "Invariant failed: score did not advance by one");
    ensure!(
        next.enemies().len() == GameState::expected_enemy_count(next.score()),
        "Invariant failed: {} enemies at score {}",
        next.enemies().len(),
        next.score()
    );
    Ok(())
}

/// Plays one random game and returns the moves made.
fn play_one(rng: &mut ChaCha8Rng, max_moves: u32) -> Result<(Vec<Direction>, GameState)> {
    let mut state = GameState::new();
    let mut moves = Vec::new();

    while !state.is_done() && moves.len() < max_moves as usize {
        let action = choose(rng);
        let next = transition(&state, action)?;
        check_invariants(&state, &next)?;
        ensure!(next == transition(&state, action)?, "Invariant failed: transition not deterministic");

        moves.push(action);
        state = next;
    }

    if state.is_done() {
        ensure!(transition(&state, Direction::Up).is_err(), "Invariant failed: terminal state advanced");
    }
    Ok((moves, state))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    info!(seed = args.seed, games = args.games, max_moves = args.max_moves, "starting fuzz");
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut captured = 0;
    let mut longest = 0;
    for game in 0..args.games {
        let (moves, state) = play_one(&mut rng, args.max_moves)?;
        ensure!(replay_moves(&moves)? == state, "Invariant failed: replay diverged in game {game}");

        debug!(game, score = state.score(), done = state.is_done(), "game finished");
        captured += usize::from(state.is_done());
        longest = longest.max(state.score());
    }

    println!(
        "Fuzzing finished: {} games, {} captured, longest game {} moves.",
        args.games, captured, longest
    );
    Ok(())
}
