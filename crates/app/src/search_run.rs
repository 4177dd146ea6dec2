//! Batch solving with optional checkpoint persistence.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cornered_core::{
    Direction, GameState, SolveStopReason, Solver, load_checkpoint, replay_moves, write_checkpoint,
};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveSettings {
    pub step_budget: u64,
    pub batch_size: u64,
    pub resume: Option<PathBuf>,
    pub save: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct SearchSummary {
    pub best_path: Vec<Direction>,
    pub best_final_state: GameState,
    pub steps_taken: u64,
    pub stop_reason: SolveStopReason,
}

/// Runs the solver for `settings.step_budget` steps in batches, writing the
/// checkpoint after each batch when a save path is set.
pub fn run_search(settings: &SolveSettings) -> Result<SearchSummary> {
    let mut solver = match &settings.resume {
        Some(path) => {
            let checkpoint = load_checkpoint(path)
                .with_context(|| format!("failed to load checkpoint {}", path.display()))?;
            Solver::resume(checkpoint)
                .with_context(|| format!("cannot resume from {}", path.display()))?
        }
        None => Solver::new(),
    };

    let batch_size = settings.batch_size.max(1);
    let mut steps_taken = 0;
    let mut stop_reason = if solver.is_exhausted() {
        SolveStopReason::SearchExhausted
    } else {
        SolveStopReason::BudgetExhausted
    };

    while steps_taken < settings.step_budget && !solver.is_exhausted() {
        let batch = batch_size.min(settings.step_budget - steps_taken);
        let report = solver.run(batch)?;
        steps_taken += report.steps_taken;
        stop_reason = report.stop_reason;

        info!(
            steps = steps_taken,
            depth = solver.depth(),
            best = report.best_path.len(),
            "batch finished"
        );

        if let Some(path) = &settings.save {
            write_checkpoint(path, &report.checkpoint)
                .with_context(|| format!("failed to write checkpoint {}", path.display()))?;
        }
    }

    let best_path = solver.best_path().to_vec();
    let best_final_state = replay_moves(&best_path).context("best path does not replay")?;

    Ok(SearchSummary { best_path, best_final_state, steps_taken, stop_reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cornered_core::solve;
    use tempfile::tempdir;

    fn settings(step_budget: u64, batch_size: u64) -> SolveSettings {
        SolveSettings { step_budget, batch_size, resume: None, save: None }
    }

    #[test]
    fn batched_run_matches_a_single_solve() {
        let batched = run_search(&settings(500, 64)).unwrap();
        let single = solve(500, None).unwrap();

        assert_eq!(batched.steps_taken, 500);
        assert_eq!(batched.best_path, single.best_path);
        assert_eq!(batched.stop_reason, SolveStopReason::BudgetExhausted);
        assert_eq!(batched.best_final_state.score() as usize, batched.best_path.len());
    }

    #[test]
    fn saved_checkpoint_resumes_where_it_stopped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("search.json");

        let first = SolveSettings { save: Some(path.clone()), ..settings(300, 100) };
        run_search(&first).unwrap();
        assert!(path.exists());

        let second = SolveSettings { resume: Some(path.clone()), ..settings(200, 100) };
        let resumed = run_search(&second).unwrap();
        let single = solve(500, None).unwrap();

        assert_eq!(resumed.best_path, single.best_path);
    }

    #[test]
    fn zero_budget_does_no_work() {
        let summary = run_search(&settings(0, 10)).unwrap();
        assert_eq!(summary.steps_taken, 0);
        assert!(summary.best_path.is_empty());
        assert_eq!(summary.best_final_state, GameState::new());
    }

    #[test]
    fn missing_resume_file_is_reported() {
        let dir = tempdir().unwrap();
        let missing = SolveSettings { resume: Some(dir.path().join("nope.json")), ..settings(10, 10) };
        let err = run_search(&missing).unwrap_err();
        assert!(err.to_string().contains("failed to load checkpoint"));
    }
}
