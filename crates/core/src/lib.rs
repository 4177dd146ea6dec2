pub mod checkpoint_file;
pub mod game;
pub mod journal;
pub mod replay;
pub mod solver;
pub mod state;
pub mod types;

pub use checkpoint_file::{CheckpointLoadError, load_checkpoint, write_checkpoint};
pub use game::{spawn_corner, transition};
pub use journal::MoveJournal;
pub use replay::*;
pub use solver::{
    CorruptReason, SearchCheckpoint, SearchSnapshot, SolveReport, SolveStopReason, Solver,
    SolverError, StepOutcome, solve,
};
pub use state::GameState;
pub use types::*;
