use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical movement directions, each a unit step on the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(dx, dy)` unit vector. Rows grow downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Maps a raw `(dx, dy)` pair back to a direction.
    ///
    /// Anything other than one of the four unit vectors yields `None`.
    #[must_use]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Inbound commands accepted by the game state machine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Start,
    /// Flips between running and paused.
    Pause,
    Resume,
    Restart,
    Direction(Direction),
}

impl Command {
    /// Builds a direction command from a raw vector, rejecting non-unit input.
    #[must_use]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Direction::from_delta(dx, dy).map(Self::Direction)
    }
}

/// A text command line that did not name a known command.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown command `{0}`")]
pub struct ParseCommandError(pub String);

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let command = match raw.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Self::Direction(Direction::Up),
            "down" | "s" => Self::Direction(Direction::Down),
            "left" | "a" => Self::Direction(Direction::Left),
            "right" | "d" => Self::Direction(Direction::Right),
            "start" => Self::Start,
            "pause" | "p" => Self::Pause,
            "resume" => Self::Resume,
            "restart" | "r" => Self::Restart,
            _ => return Err(ParseCommandError(raw.trim().to_owned())),
        };

        Ok(command)
    }
}
