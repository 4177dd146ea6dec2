//! Serializable solver state and its consistency checks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::transition;
use crate::state::GameState;
use crate::types::{Direction, SEARCH_ORDER};

/// The solver's three stacks, bottom to top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    pub states: Vec<GameState>,
    pub pending_moves: Vec<Vec<Direction>>,
    pub path: Vec<Direction>,
}

/// A snapshot plus the longest path seen so far; enough to continue a
/// search exactly where it stopped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCheckpoint {
    pub snapshot: SearchSnapshot,
    pub best_path: Vec<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorruptReason {
    #[error(
        "stack lengths do not line up (states={states}, pending_moves={pending_moves}, path={path})"
    )]
    StackLengthMismatch { states: usize, pending_moves: usize, path: usize },
    #[error("bottom state is not the initial game state")]
    WrongRoot,
    #[error("state at depth {depth} is captured but has descendants")]
    TerminalInterior { depth: usize },
    #[error("move at depth {depth} does not reproduce the recorded child state")]
    BrokenTransition { depth: usize },
    #[error("untried moves at depth {depth} do not match the search order")]
    PendingMovesOutOfOrder { depth: usize },
    #[error("best path is captured before move {index}")]
    InvalidBestPath { index: usize },
}

impl SearchSnapshot {
    /// Stacks of a search that has not taken a step yet.
    pub fn initial() -> Self {
        Self { states: vec![GameState::new()], pending_moves: Vec::new(), path: Vec::new() }
    }

    pub fn is_exhausted(&self) -> bool {
        self.states.is_empty() && self.pending_moves.is_empty() && self.path.is_empty()
    }

    /// Checks that the stacks are exactly what a sequence of solver steps
    /// would leave behind.
    pub fn validate(&self) -> Result<(), CorruptReason> {
        if self.is_exhausted() {
            return Ok(());
        }

        if self.states.len() != self.path.len() + 1 || self.pending_moves.len() != self.path.len()
        {
            return Err(CorruptReason::StackLengthMismatch {
                states: self.states.len(),
                pending_moves: self.pending_moves.len(),
                path: self.path.len(),
            });
        }

        if self.states[0] != GameState::new() {
            return Err(CorruptReason::WrongRoot);
        }

        let edges = self.states.windows(2).zip(&self.path).zip(&self.pending_moves);
        for (depth, ((pair, &action), pending)) in edges.enumerate() {
            let tried = pending.len();
            if tried >= SEARCH_ORDER.len()
                || pending[..] != SEARCH_ORDER[..tried]
                || action != SEARCH_ORDER[tried]
            {
                return Err(CorruptReason::PendingMovesOutOfOrder { depth });
            }

            let (parent, child) = (&pair[0], &pair[1]);
            if parent.is_done() {
                return Err(CorruptReason::TerminalInterior { depth });
            }
            match transition(parent, action) {
                Ok(expected) if expected == *child => {}
                _ => return Err(CorruptReason::BrokenTransition { depth }),
            }
        }

        Ok(())
    }
}

impl SearchCheckpoint {
    pub fn initial() -> Self {
        Self { snapshot: SearchSnapshot::initial(), best_path: Vec::new() }
    }

    pub fn validate(&self) -> Result<(), CorruptReason> {
        self.snapshot.validate()?;

        let mut state = GameState::new();
        for (index, &action) in self.best_path.iter().enumerate() {
            state = transition(&state, action)
                .map_err(|_| CorruptReason::InvalidBestPath { index })?;
        }
        Ok(())
    }
}
