use std::time::{Duration, Instant};

use crate::game::Position;

/// A point in continuous world space, for drawing between cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<Position> for Point {
    fn from(pos: Position) -> Self {
        Self {
            x: pos.x as f64,
            y: pos.y as f64,
        }
    }
}

/// Eased move of one segment from one cell to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: Point,
    to: Point,
    start: Instant,
    duration: Duration,
}

impl Tween {
    pub fn new(from: Position, to: Position, start: Instant, duration: Duration) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            start,
            duration,
        }
    }

    /// A tween already at rest on `pos`
    pub fn resting(pos: Position, now: Instant) -> Self {
        Self::new(pos, pos, now, Duration::ZERO)
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn sample(&self, now: Instant) -> Point {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        let eased = ezing::sine_inout(t);
        Point {
            x: self.from.x + (self.to.x - self.from.x) * eased,
            y: self.from.y + (self.to.y - self.from.y) * eased,
        }
    }
}
