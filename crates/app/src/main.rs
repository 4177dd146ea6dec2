use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cornered::input::{KeyboardInput, TerminalSession};
use cornered::keymap_file::resolve_key_map;
use cornered::play_loop::run_play;
use cornered::search_run::{SolveSettings, run_search};
use cornered::solve_config::{resolve_batch_size, runtime_step_budget};
use cornered::{compact_path, format_fingerprint, stop_reason_code};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about = "Evade the corner spawns for as long as you can", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play interactively in the terminal
    Play {
        /// Key map JSON file (defaults to the per-user config file)
        #[arg(long)]
        keymap: Option<PathBuf>,
        /// Write the move journal of the game to this file
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Search for the longest sequence of moves before capture
    Solve {
        /// Total step budget (overrides CORNERED_STEP_BUDGET)
        #[arg(long)]
        steps: Option<u64>,
        /// Steps per batch; the checkpoint is saved after each batch
        #[arg(long)]
        batch: Option<u64>,
        /// Continue from a checkpoint file
        #[arg(long)]
        resume: Option<PathBuf>,
        /// Write the checkpoint file here
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn play(keymap: Option<PathBuf>, record: Option<PathBuf>) -> Result<()> {
    let keymap = resolve_key_map(keymap.as_deref())?;

    let outcome = {
        let session = TerminalSession::new().context("failed to enable raw terminal mode")?;
        let mut input = KeyboardInput::new(&session, keymap);
        let mut stdout = io::stdout().lock();
        run_play(&mut input, &mut stdout)?
    };

    if let Some(path) = record {
        outcome
            .journal
            .write_atomic(&path)
            .with_context(|| format!("failed to write journal {}", path.display()))?;
        info!(path = %path.display(), "journal recorded");
    }
    Ok(())
}

fn solve(settings: SolveSettings) -> Result<()> {
    let summary = run_search(&settings)?;

    println!("best path length: {}", summary.best_path.len());
    println!("best path: {}", compact_path(&summary.best_path));
    println!("stop reason: {}", stop_reason_code(summary.stop_reason));
    println!("steps taken: {}", summary.steps_taken);
    println!("final state: {}", format_fingerprint(summary.best_final_state.fingerprint()));
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Play { keymap, record } => play(keymap, record),
        Command::Solve { steps, batch, resume, save } => solve(SolveSettings {
            step_budget: runtime_step_budget(steps),
            batch_size: resolve_batch_size(batch),
            resume,
            save,
        }),
    }
}
