use serde::{Deserialize, Serialize};

use crate::types::*;

/// One immutable position of the game. New states are only produced by
/// [`crate::transition`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    player: Pos,
    enemies: Vec<Pos>,
    score: u32,
    done: bool,
}

impl GameState {
    /// Player at the grid center, no enemies, score zero.
    pub fn new() -> Self {
        Self { player: Pos::center(), enemies: Vec::new(), score: 0, done: false }
    }

    /// Builds an arbitrary state. Positions are clamped into the grid and
    /// `done` is derived from whether any enemy sits on the player.
    pub fn from_parts(player: Pos, enemies: Vec<Pos>, score: u32) -> Self {
        let player = player.clamped();
        let enemies: Vec<Pos> = enemies.into_iter().map(Pos::clamped).collect();
        let done = enemies.contains(&player);
        Self { player, enemies, score, done }
    }

    pub(crate) fn produced(player: Pos, enemies: Vec<Pos>, score: u32, done: bool) -> Self {
        Self { player, enemies, score, done }
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn enemies(&self) -> &[Pos] {
        &self.enemies
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// True when every coordinate lies on the grid.
    pub fn is_in_grid(&self) -> bool {
        self.player.in_grid() && self.enemies.iter().all(|enemy| enemy.in_grid())
    }

    /// Enemy count expected after `score` moves from the initial state.
    pub fn expected_enemy_count(score: u32) -> usize {
        (score / SPAWN_INTERVAL) as usize
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
