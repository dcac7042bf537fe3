//! Directional moves

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// One of the four grid moves.
///
/// The discriminant doubles as the column index into the navigability table
/// and the action index into the Q-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Action {
    /// Number of actions
    pub const COUNT: usize = 4;

    /// All actions in index order
    pub const ALL: [Action; Action::COUNT] =
        [Action::North, Action::East, Action::South, Action::West];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Action> {
        Action::ALL.get(index).copied()
    }

    /// Coordinate delta `(dx, dy)`; north decreases `y`.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::North => (0, -1),
            Action::East => (1, 0),
            Action::South => (0, 1),
            Action::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Action {
        match self {
            Action::North => Action::South,
            Action::East => Action::West,
            Action::South => Action::North,
            Action::West => Action::East,
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Action::from_index(index).ok_or(Error::ActionOutOfRange { action: index })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::North => "north",
            Action::East => "east",
            Action::South => "south",
            Action::West => "west",
        };
        write!(f, "{name}")
    }
}
