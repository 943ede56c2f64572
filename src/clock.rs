use std::time::Duration;

pub const DEFAULT_MAX_CATCH_UP: u32 = 5;

/// Fixed-timestep accumulator. Frames feed it their elapsed time and get
/// back how many logical ticks are due.
#[derive(Clone, Debug)]
pub struct TickClock {
    interval: Duration,
    accumulated: Duration,
    max_catch_up: u32,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self { interval, accumulated: Duration::ZERO, max_catch_up: DEFAULT_MAX_CATCH_UP }
    }

    pub fn with_max_catch_up(mut self, ticks: u32) -> Self {
        self.max_catch_up = ticks.max(1);
        self
    }

    pub fn interval(&self) -> Duration { self.interval }

    /// Takes effect from the next tick; time already banked is kept.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulated += dt;
        let mut ticks = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            ticks += 1;
            if ticks == self.max_catch_up {
                // drop the backlog rather than bursting after a stall
                self.accumulated = Duration::ZERO;
                break;
            }
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    #[test]
    fn ticks_once_per_interval() {
        let mut clock = TickClock::new(ms(100));
        assert_eq!(clock.advance(ms(40)), 0);
        assert_eq!(clock.advance(ms(40)), 0);
        assert_eq!(clock.advance(ms(40)), 1);
        assert_eq!(clock.advance(ms(250)), 2);
        assert_eq!(clock.advance(ms(30)), 1);
    }

    #[test]
    fn interval_change_applies_to_next_tick() {
        let mut clock = TickClock::new(ms(100));
        assert_eq!(clock.advance(ms(60)), 0);
        clock.set_interval(ms(50));
        assert_eq!(clock.advance(ms(0)), 1);
        assert_eq!(clock.advance(ms(50)), 1);
    }

    #[test]
    fn stalls_are_capped() {
        let mut clock = TickClock::new(ms(10)).with_max_catch_up(3);
        assert_eq!(clock.advance(ms(1_000)), 3);
        assert_eq!(clock.advance(ms(5)), 0);
    }

    #[test]
    fn reset_discards_banked_time() {
        let mut clock = TickClock::new(ms(100));
        clock.advance(ms(90));
        clock.reset();
        assert_eq!(clock.advance(ms(20)), 0);
        assert_eq!(clock.advance(ms(79)), 0);
        assert_eq!(clock.advance(ms(1)), 1);
    }
}
