use log::debug;
use rand::Rng;

use crate::grid::{Cell, Grid};
use crate::snake::Snake;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Rejection-samples a free cell. Gives up after `max_attempts` draws, so a
/// nearly full board can return `None` even though a free cell exists.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    snake: &Snake,
    max_attempts: u32,
) -> Option<Cell> {
    if snake.len() >= grid.area() {
        debug!("no free cell left for food ({} cells occupied)", snake.len());
        return None;
    }
    for _ in 0..max_attempts {
        let cell = Cell {
            x: rng.random_range(0..grid.cols()),
            y: rng.random_range(0..grid.rows()),
        };
        if !snake.contains(cell) {
            return Some(cell);
        }
    }
    debug!("food placement gave up after {max_attempts} attempts");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn never_lands_on_the_snake() {
        let grid = Grid::new(4, 4).unwrap();
        let snake = Snake::from_cells((0..4).flat_map(|y| [Cell::new(0, y), Cell::new(1, y), Cell::new(2, y)])).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let food = place_food(&mut rng, &grid, &snake, DEFAULT_MAX_ATTEMPTS).unwrap();
            assert_eq!(food.x, 3);
            assert!(grid.contains(food));
        }
    }

    #[test]
    fn full_board_gives_up() {
        let grid = Grid::new(2, 1).unwrap();
        let snake = Snake::from_cells([Cell::new(0, 0), Cell::new(1, 0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(place_food(&mut rng, &grid, &snake, DEFAULT_MAX_ATTEMPTS), None);
    }

    #[test]
    fn zero_budget_gives_up() {
        let grid = Grid::new(5, 5).unwrap();
        let snake = Snake::new(Cell::new(0, 0));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(place_food(&mut rng, &grid, &snake, 0), None);
    }
}
