use std::collections::{HashSet, VecDeque};

use crate::grid::Cell;

/// Snake body, head first. `occupied` mirrors `body` for O(1) membership tests.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupied: HashSet<Cell>,
}

impl Snake {
    pub fn new(head: Cell) -> Self {
        let mut snake = Self { body: VecDeque::new(), occupied: HashSet::new() };
        snake.push_head(head);
        snake
    }

    /// Builds a snake from head-first cells. Returns `None` on duplicates or an empty list.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let mut body = VecDeque::new();
        let mut occupied = HashSet::new();
        for c in cells {
            if !occupied.insert(c) {
                return None;
            }
            body.push_back(c);
        }
        if body.is_empty() {
            return None;
        }
        Some(Self { body, occupied })
    }

    pub fn head(&self) -> Cell {
        // never empty between ticks: constructors insert at least one cell and
        // the engine pushes the new head right after popping the tail
        self.body[0]
    }

    pub fn tail(&self) -> Cell { self.body[self.body.len() - 1] }

    pub fn len(&self) -> usize { self.body.len() }
    pub fn is_empty(&self) -> bool { self.body.is_empty() }
    pub fn contains(&self, c: Cell) -> bool { self.occupied.contains(&c) }
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ { self.body.iter().copied() }
    pub fn occupied_count(&self) -> usize { self.occupied.len() }
    pub fn to_vec(&self) -> Vec<Cell> { self.body.iter().copied().collect() }

    pub(crate) fn push_head(&mut self, c: Cell) {
        self.body.push_front(c);
        self.occupied.insert(c);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        let tail = self.body.pop_back()?;
        self.occupied.remove(&tail);
        Some(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop_keep_set_in_sync() {
        let mut s = Snake::new(Cell::new(1, 1));
        s.push_head(Cell::new(2, 1));
        s.push_head(Cell::new(3, 1));
        assert_eq!(s.len(), 3);
        assert_eq!(s.occupied_count(), 3);
        assert_eq!(s.pop_tail(), Some(Cell::new(1, 1)));
        assert!(!s.contains(Cell::new(1, 1)));
        assert_eq!(s.occupied_count(), s.len());
        assert_eq!(s.head(), Cell::new(3, 1));
    }

    #[test]
    fn single_cell_moves_by_pop_then_push() {
        let mut s = Snake::new(Cell::new(4, 4));
        assert_eq!(s.pop_tail(), Some(Cell::new(4, 4)));
        assert!(s.is_empty());
        s.push_head(Cell::new(5, 4));
        assert_eq!(s.head(), Cell::new(5, 4));
        assert_eq!(s.tail(), Cell::new(5, 4));
        assert_eq!(s.occupied_count(), 1);
    }

    #[test]
    fn from_cells_rejects_overlap() {
        assert!(Snake::from_cells([Cell::new(0, 0), Cell::new(0, 0)]).is_none());
        assert!(Snake::from_cells(Vec::<Cell>::new()).is_none());
        let s = Snake::from_cells([Cell::new(5, 5), Cell::new(4, 5)]).unwrap();
        assert_eq!(s.to_vec(), vec![Cell::new(5, 5), Cell::new(4, 5)]);
    }
}
