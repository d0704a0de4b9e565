//! Action types and action space

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, Twenty48Error};

/// A direction to slide and merge tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, ordered by discrete index
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Discrete action index (Up=0, Down=1, Left=2, Right=3)
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Lowercase action name
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i64> for Direction {
    type Error = Twenty48Error;

    fn try_from(value: i64) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Direction::ALL.get(i).copied())
            .ok_or_else(|| {
                Twenty48Error::InvalidAction(format!("{} (expected 0..=3)", value))
            })
    }
}

impl FromStr for Direction {
    type Err = Twenty48Error;

    /// Accepts direction names and the w/s/a/d keys
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            other => Err(Twenty48Error::InvalidAction(other.to_string())),
        }
    }
}

/// Description of an action space
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub enum ActionSpace {
    /// Discrete action space
    Discrete {
        /// Number of discrete actions
        n: usize,
        /// Action names, ordered by index
        #[serde(skip_serializing_if = "Option::is_none")]
        names: Option<Vec<String>>,
    },
}

impl ActionSpace {
    /// The four-direction space used by the board engine
    pub fn directions() -> Self {
        ActionSpace::Discrete {
            n: Direction::ALL.len(),
            names: Some(Direction::ALL.iter().map(|d| d.name().to_string()).collect()),
        }
    }
}
