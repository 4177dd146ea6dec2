//! Text rendering of the board.

use cornered_core::{GRID_SIZE, GameState};

const EMPTY: char = ' ';
const ENEMY: char = 'X';
const PLAYER: char = 'O';

/// Renders the grid row by row, top to bottom, as `|c|c|...|c|` lines.
/// The player is drawn last so a captured cell shows `O`.
pub fn render_board(state: &GameState) -> String {
    let size = GRID_SIZE as usize;
    let mut grid = vec![vec![EMPTY; size]; size];

    for enemy in state.enemies() {
        grid[enemy.y as usize][enemy.x as usize] = ENEMY;
    }
    let player = state.player();
    grid[player.y as usize][player.x as usize] = PLAYER;

    grid.iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(char::to_string).collect();
            format!("|{}|", cells.join("|"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Board followed by the score line.
pub fn render_frame(state: &GameState) -> String {
    format!("{}\n{}", render_board(state), state.score())
}
