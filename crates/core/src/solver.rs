//! Depth-first search for the longest sequence of moves before capture.
//!
//! The search keeps three parallel stacks (states, untried moves per depth,
//! and the path to the top state) instead of recursing, which lets callers
//! run it in bounded batches and persist it between batches as a
//! [`SearchCheckpoint`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::game::transition;
use crate::state::GameState;
use crate::types::*;

mod snapshot;

#[cfg(test)]
mod tests;

pub use snapshot::{CorruptReason, SearchCheckpoint, SearchSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("corrupt search state: {0}")]
    CorruptSearchState(CorruptReason),
    #[error(transparent)]
    Transition(#[from] GameError),
}

/// What a single [`Solver::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Descended from a live state; the new top sits at `depth`.
    Expanded { depth: usize },
    /// The top state was captured at path length `captured_at`; the search
    /// unwound and descended into the next untried move, ending at `depth`.
    Backtracked { captured_at: usize, depth: usize },
    /// Every branch from the initial state has been searched.
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStopReason {
    BudgetExhausted,
    SearchExhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveReport {
    pub best_path: Vec<Direction>,
    pub checkpoint: SearchCheckpoint,
    pub steps_taken: u64,
    pub stop_reason: SolveStopReason,
}

#[derive(Clone, Debug)]
pub struct Solver {
    states: Vec<GameState>,
    pending_moves: Vec<Vec<Direction>>,
    path: Vec<Direction>,
    best_path: Vec<Direction>,
}

impl Solver {
    pub fn new() -> Self {
        Self {
            states: vec![GameState::new()],
            pending_moves: Vec::new(),
            path: Vec::new(),
            best_path: Vec::new(),
        }
    }

    /// Rebuilds a solver from a checkpoint, rejecting snapshots that could
    /// not have been produced by [`Solver::step`].
    pub fn resume(checkpoint: SearchCheckpoint) -> Result<Self, SolverError> {
        checkpoint.validate().map_err(SolverError::CorruptSearchState)?;
        let SearchCheckpoint { snapshot, best_path } = checkpoint;
        debug!(
            depth = snapshot.path.len(),
            best = best_path.len(),
            exhausted = snapshot.is_exhausted(),
            "search resumed"
        );
        Ok(Self {
            states: snapshot.states,
            pending_moves: snapshot.pending_moves,
            path: snapshot.path,
            best_path,
        })
    }

    pub fn best_path(&self) -> &[Direction] {
        &self.best_path
    }

    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn current_state(&self) -> Option<&GameState> {
        self.states.last()
    }

    pub fn is_exhausted(&self) -> bool {
        self.states.is_empty()
    }

    /// Performs one unit of search work.
    pub fn step(&mut self) -> Result<StepOutcome, SolverError> {
        let Some(top) = self.states.last() else {
            return Ok(StepOutcome::Exhausted);
        };
        let top_done = top.is_done();

        if self.path.len() > self.best_path.len() {
            self.best_path.clone_from(&self.path);
            debug!(length = self.best_path.len(), "new longest path");
        }

        let captured_at = if top_done {
            let captured_at = self.path.len();
            self.states.pop();
            self.path.pop();
            if !self.unwind_exhausted() {
                debug!(best = self.best_path.len(), "search space exhausted");
                return Ok(StepOutcome::Exhausted);
            }
            Some(captured_at)
        } else {
            self.pending_moves.push(SEARCH_ORDER.to_vec());
            None
        };

        self.descend()?;
        let depth = self.path.len();
        Ok(match captured_at {
            Some(captured_at) => StepOutcome::Backtracked { captured_at, depth },
            None => StepOutcome::Expanded { depth },
        })
    }

    /// Runs up to `step_budget` steps, stopping early once the search is
    /// exhausted.
    pub fn run(&mut self, step_budget: u64) -> Result<SolveReport, SolverError> {
        let mut steps_taken = 0;
        while steps_taken < step_budget && !self.is_exhausted() {
            self.step()?;
            steps_taken += 1;
        }

        let stop_reason = if self.is_exhausted() {
            SolveStopReason::SearchExhausted
        } else {
            SolveStopReason::BudgetExhausted
        };

        Ok(SolveReport {
            best_path: self.best_path.clone(),
            checkpoint: self.checkpoint(),
            steps_taken,
            stop_reason,
        })
    }

    pub fn checkpoint(&self) -> SearchCheckpoint {
        SearchCheckpoint {
            snapshot: SearchSnapshot {
                states: self.states.clone(),
                pending_moves: self.pending_moves.clone(),
                path: self.path.clone(),
            },
            best_path: self.best_path.clone(),
        }
    }

    /// Pops ancestors whose moves are all spent. Returns `false` once the
    /// root itself is spent, leaving every stack empty.
    fn unwind_exhausted(&mut self) -> bool {
        loop {
            match self.pending_moves.last() {
                Some(moves) if moves.is_empty() => {
                    self.pending_moves.pop();
                    self.path.pop();
                    self.states.pop();
                }
                Some(_) => return true,
                None => {
                    self.states.clear();
                    self.path.clear();
                    return false;
                }
            }
        }
    }

    /// Takes the next untried move from the top state. The move is only
    /// consumed once its transition succeeds.
    fn descend(&mut self) -> Result<(), SolverError> {
        let (Some(current), Some(&action)) =
            (self.states.last(), self.pending_moves.last().and_then(|moves| moves.last()))
        else {
            return Err(SolverError::CorruptSearchState(CorruptReason::StackLengthMismatch {
                states: self.states.len(),
                pending_moves: self.pending_moves.len(),
                path: self.path.len(),
            }));
        };

        let next = transition(current, action)?;
        if let Some(moves) = self.pending_moves.last_mut() {
            moves.pop();
        }
        self.path.push(action);
        self.states.push(next);
        Ok(())
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a fresh search, or continues `resume_from`, for up to `step_budget`
/// steps.
pub fn solve(
    step_budget: u64,
    resume_from: Option<SearchCheckpoint>,
) -> Result<SolveReport, SolverError> {
    let mut solver = match resume_from {
        Some(checkpoint) => Solver::resume(checkpoint)?,
        None => Solver::new(),
    };
    solver.run(step_budget)
}
