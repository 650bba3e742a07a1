use std::time::{Duration, Instant};

/// Counters shown in the header of the play screen
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub moves: u32,
    pub game_overs: u32,
    pub restarts: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            moves: 0,
            game_overs: 0,
            restarts: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_move(&mut self) {
        self.moves += 1;
    }

    /// A fresh snake was laid out: restart the clock and the move count
    pub fn on_new_snake(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.moves = 0;
    }

    /// Only a game over that laid out a fresh snake counts as a restart
    pub fn on_game_over(&mut self, restarted: bool) {
        self.game_overs += 1;
        if restarted {
            self.restarts += 1;
            self.on_new_snake();
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
