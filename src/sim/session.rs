//! Run timing and best time
//!
//! All durations are whole milliseconds; display formatting happens only
//! in [`format_duration`].

use crate::best_time::BestTime;

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub duration_ms: u64,
    /// The run beat the previous best (strictly longer)
    pub new_best: bool,
}

/// Timing for the current and past runs
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Wall-clock time the current run started (ms since epoch)
    pub game_start_ms: f64,
    /// Duration of the last completed run
    pub current_time_ms: u64,
    /// Longest run so far, including previous visits
    pub best: BestTime,
}

impl Session {
    pub fn new(best: BestTime) -> Self {
        Self {
            game_start_ms: 0.0,
            current_time_ms: 0,
            best,
        }
    }

    pub fn begin(&mut self, now_ms: f64) {
        self.game_start_ms = now_ms;
    }

    /// Milliseconds since the run started (0 if the clock went backwards)
    pub fn elapsed_ms(&self, now_ms: f64) -> u64 {
        (now_ms - self.game_start_ms).max(0.0).round() as u64
    }

    /// Close the run: record its duration and raise the best if beaten
    pub fn finish(&mut self, now_ms: f64) -> RunResult {
        let duration_ms = self.elapsed_ms(now_ms);
        self.current_time_ms = duration_ms;
        let new_best = duration_ms > self.best.ms;
        if new_best {
            self.best = BestTime::new(duration_ms);
        }
        RunResult {
            duration_ms,
            new_best,
        }
    }
}

/// Format milliseconds as `mm:ss.sss`
///
/// Minutes keep growing past 99 instead of rolling over into hours.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
}
