//! Migration direction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way a step moves the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Advance: apply "up" scripts in ascending version order
    Up,
    /// Revert: apply "down" scripts in descending version order
    Down,
}

impl Direction {
    /// Present participle used in progress messages.
    pub fn verb(self) -> &'static str {
        match self {
            Direction::Up => "migrating",
            Direction::Down => "reverting",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}
