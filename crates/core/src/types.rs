use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of the square grid.
pub const GRID_SIZE: i32 = 32;

/// Largest valid coordinate component.
pub const GRID_MAX: i32 = GRID_SIZE - 1;

/// A new enemy joins every `SPAWN_INTERVAL` moves.
pub const SPAWN_INTERVAL: u32 = 3;

/// Spawn slots, indexed by `score % 4`.
pub const SPAWN_CORNERS: [Pos; 4] = [
    Pos { y: 0, x: 0 },
    Pos { y: GRID_MAX, x: GRID_MAX },
    Pos { y: 0, x: GRID_MAX },
    Pos { y: GRID_MAX, x: 0 },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Grid center, where the player starts.
    pub const fn center() -> Self {
        Self { y: GRID_SIZE / 2, x: GRID_SIZE / 2 }
    }

    /// Component-wise addition, each component clamped to `[0, GRID_MAX]`.
    pub fn saturating_add(self, delta: Pos) -> Pos {
        Pos { y: self.y.saturating_add(delta.y), x: self.x.saturating_add(delta.x) }.clamped()
    }

    pub fn clamped(self) -> Pos {
        Pos { y: self.y.clamp(0, GRID_MAX), x: self.x.clamp(0, GRID_MAX) }
    }

    pub fn in_grid(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Serialized as the upper-case name; read back through [`FromStr`], so any
/// letter case is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Order in which the solver lists a node's moves. Moves are taken from the
/// back, so `Left` is tried first and `Down` last.
pub const SEARCH_ORDER: [Direction; 4] =
    [Direction::Down, Direction::Right, Direction::Up, Direction::Left];

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit move vector.
    pub const fn delta(self) -> Pos {
        match self {
            Direction::Up => Pos { y: -1, x: 0 },
            Direction::Down => Pos { y: 1, x: 0 },
            Direction::Left => Pos { y: 0, x: -1 },
            Direction::Right => Pos { y: 0, x: 1 },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::InvalidAction(s.to_string()))
    }
}

impl TryFrom<String> for Direction {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown action '{0}', expected one of UP, DOWN, LEFT, RIGHT")]
    InvalidAction(String),
    #[error("game already ended at score {score}; no further moves are allowed")]
    TerminalState { score: u32 },
}
