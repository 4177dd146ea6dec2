//! Transition engine: applies one player move, then resolves enemy spawning
//! and pursuit. Pure; every call returns a fresh [`GameState`].

use tracing::trace;

use crate::state::GameState;
use crate::types::*;

mod hash;
mod pursuit;


pub use pursuit::pursuit_delta;

/// Advances `state` by one move.
///
/// Fails with [`GameError::TerminalState`] when `state` is already captured.
pub fn transition(state: &GameState, action: Direction) -> Result<GameState, GameError> {
    if state.is_done() {
        return Err(GameError::TerminalState { score: state.score() });
    }

    let score = state.score() + 1;
    let player = state.player().saturating_add(action.delta());

    let mut enemies = state.enemies().to_vec();
    if let Some(corner) = spawn_corner(score) {
        trace!(score, %corner, "enemy spawned");
        enemies.push(corner);
    }

    let done = pursuit::advance_enemies(&mut enemies, player, score);
    Ok(GameState::produced(player, enemies, score, done))
}

/// Corner a new enemy appears at after move `score`, if one spawns.
pub fn spawn_corner(score: u32) -> Option<Pos> {
    if score % SPAWN_INTERVAL != 0 {
        return None;
    }
    Some(SPAWN_CORNERS[(score % 4) as usize])
}

impl GameState {
    pub fn advance(&self, action: Direction) -> Result<GameState, GameError> {
        transition(self, action)
    }
}
