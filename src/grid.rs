use crate::dir::Dir;
use crate::error::{Result, SimError};
use crate::pos::Cell;
use rand::Rng;

/// Square `size x size` board. Stateless apart from its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: i32,
}

impl Grid {
    pub fn new(size: i32) -> Result<Self> {
        if size <= 0 {
            return Err(SimError::Configuration(format!("grid size must be positive, got {size}")));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }

    pub fn in_bounds(&self, c: Cell) -> bool {
        (0..self.size).contains(&c.col) && (0..self.size).contains(&c.row)
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.size), rng.gen_range(0..self.size))
    }

    /// Row-major iteration over every in-bounds cell.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let n = self.size;
        (0..n).flat_map(move |row| (0..n).map(move |col| Cell::new(col, row)))
    }

    /// Free steps from `c` to the wall when travelling in `dir`.
    pub fn open_distance(&self, c: Cell, dir: Dir) -> i32 {
        let last = self.size - 1;
        match dir {
            Dir::North => c.row,
            Dir::East => last - c.col,
            Dir::South => last - c.row,
            Dir::West => c.col,
        }
    }
}
