use thiserror::Error;

use crate::{
    game::transition,
    journal::{JOURNAL_FORMAT_VERSION, MoveJournal},
    state::GameState,
    types::{Direction, GRID_SIZE},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("unsupported journal format version {found}")]
    UnsupportedVersion { found: u16 },
    #[error("journal was recorded on a {found}x{found} grid")]
    GridSizeMismatch { found: i32 },
    #[error("move {index} comes after the game already ended")]
    MovesAfterCapture { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_state: GameState,
    pub final_score: u32,
    pub captured: bool,
    pub enemy_count: usize,
    pub fingerprint: u64,
}

/// Applies `moves` from the initial state.
pub fn replay_moves(moves: &[Direction]) -> Result<GameState, ReplayError> {
    let mut state = GameState::new();
    for (index, &action) in moves.iter().enumerate() {
        state = transition(&state, action).map_err(|_| ReplayError::MovesAfterCapture { index })?;
    }
    Ok(state)
}

pub fn replay_to_end(journal: &MoveJournal) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion { found: journal.format_version });
    }
    if journal.grid_size != GRID_SIZE {
        return Err(ReplayError::GridSizeMismatch { found: journal.grid_size });
    }

    let final_state = replay_moves(&journal.moves)?;
    Ok(ReplayResult {
        final_score: final_state.score(),
        captured: final_state.is_done(),
        enemy_count: final_state.enemies().len(),
        fingerprint: final_state.fingerprint(),
        final_state,
    })
}
