//! Stable state fingerprints for determinism checks and reports.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::state::GameState;

impl GameState {
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u32(self.score());
        hasher.write_u8(u8::from(self.is_done()));
        hasher.write_i32(self.player().x);
        hasher.write_i32(self.player().y);
        hasher.write_u64(self.enemies().len() as u64);
        for enemy in self.enemies() {
            hasher.write_i32(enemy.x);
            hasher.write_i32(enemy.y);
        }
        hasher.finish()
    }
}
