use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::game::{SegmentId, SegmentMove, Snake};

use super::tween::{Point, Tween};

/// Visual positions of the snake, keyed by segment identity.
///
/// A new move supersedes whatever tween a segment was running; the new tween
/// starts from the logical source cell and ends on the logical target.
#[derive(Debug, Clone)]
pub struct SnakeAnimator {
    duration: Duration,
    tweens: HashMap<SegmentId, Tween>,
}

impl SnakeAnimator {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            tweens: HashMap::new(),
        }
    }

    /// Place every segment at rest, dropping tweens of segments that no longer exist
    pub fn snap_to(&mut self, snake: &Snake, now: Instant) {
        self.tweens = snake
            .segments
            .iter()
            .map(|s| (s.id, Tween::resting(s.position, now)))
            .collect();
    }

    pub fn apply_moves(&mut self, moves: &[SegmentMove], now: Instant) {
        for m in moves {
            self.tweens
                .insert(m.id, Tween::new(m.from, m.to, now, self.duration));
        }
    }

    pub fn position(&self, id: SegmentId, now: Instant) -> Option<Point> {
        self.tweens.get(&id).map(|t| t.sample(now))
    }
}
