//! Enemy pursuit policy.
//!
//! Enemies never step diagonally: when both axes point at the player, odd
//! moves go horizontal and even moves go vertical. Enemies resolve in list
//! order against a running set of occupied cells, so an earlier enemy wins
//! any contested cell.

use std::collections::BTreeSet;

use crate::types::Pos;

/// Unit step an enemy at `enemy` takes toward `target` on move `score`.
pub fn pursuit_delta(enemy: Pos, target: Pos, score: u32) -> Pos {
    let mut dx = (target.x - enemy.x).signum();
    let mut dy = (target.y - enemy.y).signum();

    if dx != 0 && dy != 0 {
        if score % 2 == 1 {
            dy = 0;
        } else {
            dx = 0;
        }
    }

    Pos { y: dy, x: dx }
}

/// Moves every enemy one step toward `player`, in order. Returns `true` as
/// soon as an enemy ends on the player's cell; enemies after it keep their
/// positions.
pub(super) fn advance_enemies(enemies: &mut [Pos], player: Pos, score: u32) -> bool {
    let mut occupied: BTreeSet<Pos> = enemies.iter().copied().collect();

    for enemy in enemies.iter_mut() {
        let current = *enemy;
        let candidate = current.saturating_add(pursuit_delta(current, player, score));

        // Blocked enemies, including ones with nowhere to go, hold position.
        if !occupied.contains(&candidate) {
            occupied.remove(&current);
            occupied.insert(candidate);
            *enemy = candidate;
        }

        if *enemy == player {
            return true;
        }
    }

    false
}
