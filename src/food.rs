use crate::grid::Grid;
use crate::pos::Cell;
use crate::snake::Snake;
use log::{trace, warn};
use rand::Rng;
use rand::seq::IteratorRandom;

/// Picks a uniformly random cell not covered by the snake.
///
/// Redraws up to `attempts` times, then falls back to choosing among the free
/// cells directly so a crowded board never spins. `None` means every cell is
/// occupied.
pub fn place_food<R: Rng + ?Sized>(grid: &Grid, snake: &Snake, rng: &mut R, attempts: u32) -> Option<Cell> {
    for _ in 0..attempts {
        let c = grid.random_cell(rng);
        if !snake.contains(c) {
            trace!("food placed at ({}, {})", c.col, c.row);
            return Some(c);
        }
    }
    warn!(
        "food rejection sampling exhausted after {attempts} draws (snake length {}), scanning free cells",
        snake.len()
    );
    grid.cells().filter(|&c| !snake.contains(c)).choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dir::Dir;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_never_on_snake() {
        let grid = Grid::new(5).unwrap();
        let mut snake = Snake::new(Cell::new(0, 0));
        for _ in 0..4 {
            snake.grow(Dir::West);
        }
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let c = place_food(&grid, &snake, &mut rng, 100).unwrap();
            assert!(grid.in_bounds(c));
            assert!(!snake.contains(c));
        }
    }

    #[test]
    fn test_fallback_finds_last_free_cell() {
        let grid = Grid::new(2).unwrap();
        let snake = Snake::from_cells([Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(place_food(&grid, &snake, &mut rng, 0), Some(Cell::new(0, 1)));
    }

    #[test]
    fn test_full_board_yields_none() {
        let grid = Grid::new(2).unwrap();
        let snake =
            Snake::from_cells([Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1), Cell::new(0, 1)]).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(place_food(&grid, &snake, &mut rng, 50), None);
    }
}
