//! One-tick simulation of a single snake on a fixed grid.
//!
//! The whole game lives in a [`GameState`] value that is moved into
//! [`GameState::step`] and handed back, so a session can be driven and
//! inspected without any window or clock.

use log::debug;
use rand::Rng;

use crate::food::{DEFAULT_MAX_ATTEMPTS, place_food};
use crate::grid::{Boundary, Cell, Direction, Grid};
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeathCause {
    SelfCollision,
    Wall,
}

/// What a single tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickEvent {
    Moved,
    Ate { score: u32 },
    Died { cause: DeathCause },
    /// The state was already terminal; nothing happened.
    Dead,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: Grid,
    pub boundary: Boundary,
    pub snake: Snake,
    pub direction: Direction,
    pub pending: Option<Direction>,
    pub food: Cell,
    pub score: u32,
    pub alive: bool,
    pub food_attempts: u32,
}

impl GameState {
    /// Fresh session: one-cell snake left of centre heading right.
    pub fn new<R: Rng + ?Sized>(grid: Grid, boundary: Boundary, rng: &mut R) -> Self {
        Self::with_food_budget(grid, boundary, DEFAULT_MAX_ATTEMPTS, rng)
    }

    /// Like [`GameState::new`], with `food_attempts` used for every placement including the first.
    pub fn with_food_budget<R: Rng + ?Sized>(
        grid: Grid,
        boundary: Boundary,
        food_attempts: u32,
        rng: &mut R,
    ) -> Self {
        let snake = Snake::new(grid.spawn_cell());
        // a 1x1 grid has nowhere to put food; park it on the head
        let food = place_food(rng, &grid, &snake, food_attempts).unwrap_or(snake.head());
        Self {
            grid,
            boundary,
            snake,
            direction: Direction::Right,
            pending: None,
            food,
            score: 0,
            alive: true,
            food_attempts,
        }
    }

    /// Explicit layout, mainly for replaying a known position.
    pub fn with_layout(
        grid: Grid,
        boundary: Boundary,
        snake: Snake,
        direction: Direction,
        food: Cell,
    ) -> Self {
        Self {
            grid,
            boundary,
            snake,
            direction,
            pending: None,
            food,
            score: 0,
            alive: true,
            food_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Requests a turn for the next tick. Reversals are filtered when the tick runs.
    pub fn steer(&mut self, dir: Direction) {
        self.pending = Some(dir);
    }

    pub fn step<R: Rng + ?Sized>(mut self, rng: &mut R) -> (Self, TickEvent) {
        let event = self.advance(rng);
        (self, event)
    }

    /// In-place form of [`GameState::step`].
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickEvent {
        if !self.alive {
            return TickEvent::Dead;
        }

        if let Some(next) = self.pending.take()
            && !next.is_opposite(self.direction)
        {
            self.direction = next;
        }

        // an earlier placement may have failed and left food under the body
        if self.snake.contains(self.food) {
            self.relocate_food(rng);
        }

        let tentative = self.snake.head().offset(self.direction);
        let Some(new_head) = self.grid.resolve(tentative, self.boundary) else {
            self.alive = false;
            return TickEvent::Died { cause: DeathCause::Wall };
        };

        // the tail cell is free this tick unless the snake is about to grow
        let eating = new_head == self.food;
        if self.snake.contains(new_head) && (eating || new_head != self.snake.tail()) {
            self.alive = false;
            return TickEvent::Died { cause: DeathCause::SelfCollision };
        }

        if !eating {
            self.snake.pop_tail();
        }
        self.snake.push_head(new_head);
        if eating {
            self.score += 1;
            self.relocate_food(rng);
            TickEvent::Ate { score: self.score }
        } else {
            TickEvent::Moved
        }
    }

    fn relocate_food<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match place_food(rng, &self.grid, &self.snake, self.food_attempts) {
            Some(cell) => self.food = cell,
            None => debug!("food stays at ({}, {})", self.food.x, self.food.y),
        }
    }
}
