use std::time::{Duration, Instant};

use crate::game::SessionEvent;

/// In-memory statistics for the running session
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Longest snake seen this session
    pub best_length: usize,
    /// Runs started, counting the first one
    pub runs: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_length: 1,
            runs: 1,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_run_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.runs += 1;
    }

    pub fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Reset | SessionEvent::Restarted => self.on_run_start(),
            SessionEvent::FoodEaten { length } => {
                self.best_length = self.best_length.max(*length);
            }
            SessionEvent::Started => {}
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
