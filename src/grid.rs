use anyhow::{Result, bail};
use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool { self.opposite() == other }

    /// Unit vector in screen coordinates (y grows downwards).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }

    pub fn offset(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Cell { x: self.x + dx, y: self.y + dy }
    }
}

/// What happens when the head leaves the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Re-enter on the opposite edge.
    #[default]
    Wrap,
    /// Leaving the grid ends the game.
    Walls,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: i32,
    rows: i32,
}

impl Grid {
    pub fn new(cols: i32, rows: i32) -> Result<Self> {
        if cols <= 0 || rows <= 0 {
            bail!("grid must have at least one column and one row, got {cols}x{rows}");
        }
        Ok(Self { cols, rows })
    }

    /// Grid covering a canvas of `width` x `height` pixels split into square cells.
    pub fn from_canvas(width: u32, height: u32, cell_size: u32) -> Result<Self> {
        if cell_size == 0 {
            bail!("cell size must be non-zero");
        }
        Self::new((width / cell_size) as i32, (height / cell_size) as i32)
    }

    pub fn cols(&self) -> i32 { self.cols }
    pub fn rows(&self) -> i32 { self.rows }
    pub fn area(&self) -> usize { (self.cols as usize) * (self.rows as usize) }

    pub fn contains(&self, c: Cell) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.cols && c.y < self.rows
    }

    pub fn wrap(&self, c: Cell) -> Cell {
        Cell { x: c.x.rem_euclid(self.cols), y: c.y.rem_euclid(self.rows) }
    }

    /// Applies `boundary` to a freshly stepped cell. `None` means it left a walled grid.
    pub fn resolve(&self, c: Cell, boundary: Boundary) -> Option<Cell> {
        match boundary {
            Boundary::Wrap => Some(self.wrap(c)),
            Boundary::Walls => self.contains(c).then_some(c),
        }
    }

    /// Where a new snake starts: one cell left of centre.
    pub fn spawn_cell(&self) -> Cell {
        Cell { x: (self.cols / 2 - 1).max(0), y: self.rows / 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_pairs() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Left.is_opposite(Direction::Up));
        assert!(!Direction::Left.is_opposite(Direction::Left));
    }

    #[test]
    fn canvas_division_matches_classic_board() {
        let g = Grid::from_canvas(400, 400, 20).unwrap();
        assert_eq!((g.cols(), g.rows()), (20, 20));
        assert_eq!(g.spawn_cell(), Cell::new(9, 10));
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert!(Grid::from_canvas(400, 400, 0).is_err());
        assert!(Grid::from_canvas(10, 400, 20).is_err());
        assert!(Grid::new(0, 3).is_err());
    }

    #[test]
    fn wrap_reenters_on_opposite_edge() {
        let g = Grid::new(10, 8).unwrap();
        assert_eq!(g.wrap(Cell::new(10, 3)), Cell::new(0, 3));
        assert_eq!(g.wrap(Cell::new(-1, 3)), Cell::new(9, 3));
        assert_eq!(g.wrap(Cell::new(4, -1)), Cell::new(4, 7));
        assert_eq!(g.wrap(Cell::new(4, 8)), Cell::new(4, 0));
    }

    #[test]
    fn walls_reject_out_of_bounds() {
        let g = Grid::new(10, 8).unwrap();
        assert_eq!(g.resolve(Cell::new(10, 3), Boundary::Walls), None);
        assert_eq!(g.resolve(Cell::new(9, 3), Boundary::Walls), Some(Cell::new(9, 3)));
        assert_eq!(g.resolve(Cell::new(10, 3), Boundary::Wrap), Some(Cell::new(0, 3)));
    }
}
