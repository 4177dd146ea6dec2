//! Keyboard input for interactive play.
//!
//! Raw terminal mode is owned by [`TerminalSession`]; it is enabled when the
//! session is created and restored when it drops, on every exit path
//! including panics and early returns.

use std::io;

use cornered_core::Direction;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use thiserror::Error;

/// Anything that can hand the play loop one direction at a time.
pub trait DirectionSource {
    fn read_direction(&mut self) -> Result<Direction, InputError>;
}

#[derive(Debug, Error)]
pub enum InputError {
    /// Recoverable: the caller should prompt again.
    #[error("key {0} is not bound to a direction")]
    Unmapped(String),
    #[error("quit requested")]
    Quit,
    #[error("terminal input failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyMapError {
    #[error("key '{key}' is bound to more than one direction")]
    DuplicateBinding { key: char },
}

/// Character bindings for the four directions. Arrow keys always work in
/// addition to these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyMap {
    up: char,
    down: char,
    left: char,
    right: char,
}

impl KeyMap {
    pub fn new(up: char, down: char, left: char, right: char) -> Result<Self, KeyMapError> {
        let keys = [up, down, left, right];
        for (index, key) in keys.iter().enumerate() {
            if keys[index + 1..].contains(key) {
                return Err(KeyMapError::DuplicateBinding { key: *key });
            }
        }
        Ok(Self { up, down, left, right })
    }

    pub fn direction_for(&self, key: char) -> Option<Direction> {
        match key {
            k if k == self.up => Some(Direction::Up),
            k if k == self.down => Some(Direction::Down),
            k if k == self.left => Some(Direction::Left),
            k if k == self.right => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn key_for(&self, direction: Direction) -> char {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self { up: 'l', down: 'n', left: 'r', right: 's' }
    }
}

/// Maps one key event to a direction. Returns `None` for events that should
/// be ignored silently (key releases).
pub fn translate_key(key: KeyEvent, keymap: &KeyMap) -> Option<Result<Direction, InputError>> {
    if matches!(key.kind, KeyEventKind::Release) {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Err(InputError::Quit));
    }

    Some(match key.code {
        KeyCode::Up => Ok(Direction::Up),
        KeyCode::Down => Ok(Direction::Down),
        KeyCode::Left => Ok(Direction::Left),
        KeyCode::Right => Ok(Direction::Right),
        KeyCode::Esc => Err(InputError::Quit),
        KeyCode::Char(c) => match keymap.direction_for(c) {
            Some(direction) => Ok(direction),
            None if c == 'q' => Err(InputError::Quit),
            None => Err(InputError::Unmapped(format!("'{c}'"))),
        },
        other => Err(InputError::Unmapped(format!("{other:?}"))),
    })
}

/// Raw-mode guard for the controlling terminal.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Blocking key reader. Requires a live [`TerminalSession`] so keys arrive
/// unbuffered and unechoed.
pub struct KeyboardInput<'session> {
    keymap: KeyMap,
    _session: &'session TerminalSession,
}

impl<'session> KeyboardInput<'session> {
    pub fn new(session: &'session TerminalSession, keymap: KeyMap) -> Self {
        Self { keymap, _session: session }
    }
}

impl DirectionSource for KeyboardInput<'_> {
    fn read_direction(&mut self) -> Result<Direction, InputError> {
        loop {
            if let Event::Key(key) = event::read()?
                && let Some(result) = translate_key(key, &self.keymap)
            {
                return result;
            }
        }
    }
}
