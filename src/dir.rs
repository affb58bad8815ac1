use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

/// Absolute heading. The declaration order is the clockwise rotation order
/// the perception table is indexed by; turning is +/-1 modulo 4 on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dir {
    North,
    East,
    South,
    West,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::North, Dir::East, Dir::South, Dir::West];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Dir {
        Self::ALL[i % 4]
    }

    pub fn turn_left(self) -> Dir {
        Self::from_index(self.index() + 3)
    }

    pub fn turn_right(self) -> Dir {
        Self::from_index(self.index() + 1)
    }

    pub fn opposite(self) -> Dir {
        Self::from_index(self.index() + 2)
    }

    /// Unit step `(d_col, d_row)`; rows grow downward.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Dir::North => (0, -1),
            Dir::East => (1, 0),
            Dir::South => (0, 1),
            Dir::West => (-1, 0),
        }
    }

    pub fn after(self, decision: Decision) -> Dir {
        match decision {
            Decision::TurnLeft => self.turn_left(),
            Decision::GoStraight => self,
            Decision::TurnRight => self.turn_right(),
        }
    }
}

/// Relative steering choice supplied by the decision process each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    TurnLeft,
    GoStraight,
    TurnRight,
}

impl Decision {
    pub const ALL: [Decision; 3] = [Decision::TurnLeft, Decision::GoStraight, Decision::TurnRight];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_turn(self) -> bool {
        self != Decision::GoStraight
    }
}

impl TryFrom<usize> for Decision {
    type Error = SimError;

    fn try_from(i: usize) -> Result<Self> {
        Decision::ALL.get(i).copied().ok_or(SimError::InvalidDecision(i))
    }
}
