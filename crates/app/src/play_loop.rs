//! Interactive game loop over an injected direction source and output sink.

use std::io::Write;

use anyhow::Result;
use cornered_core::{GameState, MoveJournal, transition};
use tracing::{debug, info};

use crate::board::render_frame;
use crate::compact_path;
use crate::input::{DirectionSource, InputError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayEnd {
    Captured,
    Quit,
}

#[derive(Clone, Debug)]
pub struct PlayOutcome {
    pub final_state: GameState,
    pub journal: MoveJournal,
    pub end: PlayEnd,
    pub rejected_keys: usize,
}

/// Raw mode does not translate `\n`, so every line break is written as `\r\n`.
fn write_lines(out: &mut impl Write, text: &str) -> Result<()> {
    for line in text.lines() {
        write!(out, "{line}\r\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Plays one game: draw, read a direction, apply it, until the player is
/// captured or the source asks to quit.
pub fn run_play<S: DirectionSource, W: Write>(source: &mut S, out: &mut W) -> Result<PlayOutcome> {
    let mut state = GameState::new();
    let mut journal = MoveJournal::new();
    let mut rejected_keys = 0;

    let end = loop {
        write_lines(out, &render_frame(&state))?;
        if state.is_done() {
            break PlayEnd::Captured;
        }

        let action = match source.read_direction() {
            Ok(action) => action,
            Err(InputError::Unmapped(key)) => {
                rejected_keys += 1;
                debug!(%key, "unmapped key");
                write_lines(out, &format!("unmapped key {key}, try again"))?;
                continue;
            }
            Err(InputError::Quit) => break PlayEnd::Quit,
            Err(err) => return Err(err.into()),
        };

        state = transition(&state, action)?;
        journal.append(action);
    };

    info!(score = state.score(), moves = journal.moves.len(), ?end, "game finished");
    write_lines(out, &format!("game over: {}", state.score()))?;
    write_lines(out, &compact_path(&journal.moves))?;

    Ok(PlayOutcome { final_state: state, journal, end, rejected_keys })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cornered_core::Direction;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Result<Direction, InputError>>);

    impl DirectionSource for Scripted {
        fn read_direction(&mut self) -> Result<Direction, InputError> {
            self.0.pop_front().unwrap_or(Err(InputError::Quit))
        }
    }

    #[test]
    fn quitting_immediately_reports_score_zero() {
        let mut source = Scripted(VecDeque::new());
        let mut out = Vec::new();
        let outcome = run_play(&mut source, &mut out).unwrap();

        assert_eq!(outcome.end, PlayEnd::Quit);
        assert_eq!(outcome.final_state, GameState::new());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("game over: 0\r\n"));
        assert_eq!(text.matches('\n').count(), text.matches("\r\n").count());
    }

    #[test]
    fn unmapped_keys_reprompt_without_moving() {
        let mut source = Scripted(VecDeque::from([
            Err(InputError::Unmapped("'x'".to_string())),
            Ok(Direction::Up),
        ]));
        let mut out = Vec::new();
        let outcome = run_play(&mut source, &mut out).unwrap();

        assert_eq!(outcome.rejected_keys, 1);
        assert_eq!(outcome.journal.moves, vec![Direction::Up]);
        assert_eq!(outcome.final_state.score(), 1);
        assert!(String::from_utf8(out).unwrap().contains("unmapped key 'x'"));
    }
}
