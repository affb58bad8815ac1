use serde::{Deserialize, Serialize};

/// One grid position. Signed so a head that walked off the board can still be
/// represented and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn offset(self, (dc, dr): (i32, i32)) -> Self {
        Self::new(self.col + dc, self.row + dr)
    }

    /// True if `other` differs by exactly one unit along exactly one axis.
    pub fn is_adjacent(self, other: Cell) -> bool {
        (self.col - other.col).abs() + (self.row - other.row).abs() == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}
