use serde::{Deserialize, Serialize};

/// Absolute heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Heading after applying a relative turn (90 degrees, no reverse)
    pub fn turned(&self, turn: Turn) -> Direction {
        match turn {
            Turn::Straight => *self,
            Turn::Right => match self {
                Direction::Up => Direction::Right,
                Direction::Right => Direction::Down,
                Direction::Down => Direction::Left,
                Direction::Left => Direction::Up,
            },
            Turn::Left => match self {
                Direction::Up => Direction::Left,
                Direction::Left => Direction::Down,
                Direction::Down => Direction::Right,
                Direction::Right => Direction::Up,
            },
        }
    }

    /// Map a discrete action index onto an absolute heading
    ///
    /// Used by the full-grid environment variant, which exposes four
    /// absolute actions instead of relative turns.
    pub fn from_index(idx: usize) -> Direction {
        match idx {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        }
    }
}

/// Relative control input: rotate the current heading, never reverse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Straight,
    Right,
    Left,
}

impl Turn {
    /// Number of distinct turns (the action space of the compact environment)
    pub const COUNT: usize = 3;

    /// Map a discrete action index onto a turn
    pub fn from_index(idx: usize) -> Turn {
        match idx {
            1 => Turn::Right,
            2 => Turn::Left,
            _ => Turn::Straight,
        }
    }

    /// The turn that takes `current` to `desired`, if one exists
    ///
    /// Returns `None` for a reversal, which the snake cannot perform.
    pub fn between(current: Direction, desired: Direction) -> Option<Turn> {
        if current == desired {
            Some(Turn::Straight)
        } else if current.turned(Turn::Right) == desired {
            Some(Turn::Right)
        } else if current.turned(Turn::Left) == desired {
            Some(Turn::Left)
        } else {
            None
        }
    }
}
