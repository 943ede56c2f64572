use std::collections::VecDeque;

use crate::grid::Direction;

const MAX_BUFFERED: usize = 2;

/// Turn requests collected between ticks. One is drained per tick so two
/// quick presses (e.g. up then left) become two consecutive turns.
#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    queued: VecDeque<Direction>,
}

impl InputQueue {
    pub fn new() -> Self { Self::default() }

    /// Queues `dir` unless it repeats or reverses the latest heading.
    /// `current` is the snake's heading, used when nothing is queued yet.
    pub fn push(&mut self, dir: Direction, current: Direction) -> bool {
        let last = self.queued.back().copied().unwrap_or(current);
        if dir == last || dir.is_opposite(last) || self.queued.len() >= MAX_BUFFERED {
            return false;
        }
        self.queued.push_back(dir);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> { self.queued.pop_front() }
    pub fn clear(&mut self) { self.queued.clear(); }
    pub fn len(&self) -> usize { self.queued.len() }
    pub fn is_empty(&self) -> bool { self.queued.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_two_turns_in_order() {
        let mut q = InputQueue::new();
        assert!(q.push(Direction::Up, Direction::Right));
        assert!(q.push(Direction::Left, Direction::Right));
        assert!(!q.push(Direction::Down, Direction::Right));
        assert_eq!(q.pop(), Some(Direction::Up));
        assert_eq!(q.pop(), Some(Direction::Left));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn drops_repeats_and_reversals() {
        let mut q = InputQueue::new();
        assert!(!q.push(Direction::Right, Direction::Right));
        assert!(!q.push(Direction::Left, Direction::Right));
        assert!(q.push(Direction::Up, Direction::Right));
        assert!(!q.push(Direction::Down, Direction::Right));
        assert_eq!(q.len(), 1);
        q.clear();
        assert!(q.is_empty());
    }
}
