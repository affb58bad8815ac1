//! Heading-relative sensor vector fed to the decision process.
//!
//! Three per-direction tables (wall, body, food) are built in absolute
//! North/East/South/West order and then read at the heading index and at the
//! heading index rotated by -1 and +1. "Left" and "right" are therefore array
//! rotations of the absolute table, not a geometric frame built from the body.

use crate::dir::Dir;
use crate::grid::Grid;
use crate::pos::Cell;
use crate::snake::Snake;
use serde::{Deserialize, Serialize};

pub const PERCEPTION_LEN: usize = 6;

/// `[danger ahead, danger left, danger right, food ahead, food left, food right]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Perception(pub [bool; PERCEPTION_LEN]);

impl Perception {
    pub fn danger_ahead(&self) -> bool {
        self.0[0]
    }

    pub fn danger_left(&self) -> bool {
        self.0[1]
    }

    pub fn danger_right(&self) -> bool {
        self.0[2]
    }

    pub fn food_ahead(&self) -> bool {
        self.0[3]
    }

    pub fn food_left(&self) -> bool {
        self.0[4]
    }

    pub fn food_right(&self) -> bool {
        self.0[5]
    }

    /// 0/1 encoding for numeric consumers.
    pub fn as_inputs(&self) -> [f32; PERCEPTION_LEN] {
        self.0.map(|b| if b { 1.0 } else { 0.0 })
    }
}

pub fn perceive(grid: &Grid, snake: &Snake, food: Cell, heading: Dir) -> Perception {
    let head = snake.head();

    let mut wall = [false; 4];
    let mut body = [false; 4];
    for d in Dir::ALL {
        let next = head.offset(d.offset());
        wall[d.index()] = !grid.in_bounds(next);
        body[d.index()] = snake.contains(next);
    }
    let food_dir = [food.row < head.row, food.col > head.col, food.row > head.row, food.col < head.col];

    let danger = |d: Dir| wall[d.index()] || body[d.index()];
    let (ahead, left, right) = (heading, heading.turn_left(), heading.turn_right());

    Perception([
        danger(ahead),
        danger(left),
        danger(right),
        food_dir[ahead.index()],
        food_dir[left.index()],
        food_dir[right.index()],
    ])
}
