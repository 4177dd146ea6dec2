use anyhow::{Context, Result};
use clap::Parser;
use cornered_core::{MoveJournal, ReplayResult, replay_to_end};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the move journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let args = Args::parse();

    let journal = MoveJournal::load(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal.display()))?;

    let result: ReplayResult =
        replay_to_end(&journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Moves: {}", journal.moves.len());
    println!("Final Score: {}", result.final_score);
    println!("Captured: {}", result.captured);
    println!("Enemies: {}", result.enemy_count);
    println!("Fingerprint: 0x{:016x}", result.fingerprint);

    Ok(())
}
