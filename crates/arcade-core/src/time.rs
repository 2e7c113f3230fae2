//! Tick clock for the arcade controls
//!
//! Hosts report frame deltas in milliseconds. `GameTime` clamps and scales
//! them into the `(time, time_delta)` pair handed to the controller each tick.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many in-game milliseconds pass per real millisecond
    pub time_scale: f64,
    /// Maximum delta per tick in milliseconds, to prevent spiral of death
    pub max_delta_ms: f64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_ms: 250.0,
        }
    }
}

/// Game time tracking
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in milliseconds
    pub total_ms: f64,
    /// Delta time for this tick in milliseconds (clamped and scaled)
    pub delta_ms: f64,
    /// Tick counter
    pub frame_count: u64,
    /// Whether the simulation is paused
    pub paused: bool,
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Update the game time with the raw delta (ms) from the previous frame
    pub fn update(&mut self, raw_delta_ms: f64) {
        let clamped = raw_delta_ms.clamp(0.0, self.config.max_delta_ms);
        self.frame_count += 1;

        if self.paused {
            self.delta_ms = 0.0;
            return;
        }

        self.delta_ms = clamped * self.config.time_scale;
        self.total_ms += self.delta_ms;
    }

    /// Pause the clock
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume the clock
    pub fn resume(&mut self) {
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(16.0);

        assert_eq!(time.delta_ms, 16.0);
        assert_eq!(time.frame_count, 1);

        time.pause();
        time.update(16.0);
        assert_eq!(time.delta_ms, 0.0);
        assert_eq!(time.total_ms, 16.0);
        assert_eq!(time.frame_count, 2);

        time.resume();
        time.update(16.0);
        assert_eq!(time.delta_ms, 16.0);
        assert_eq!(time.total_ms, 32.0);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut time = GameTime::default();
        time.update(5000.0);
        assert_eq!(time.delta_ms, 250.0);

        time.update(-3.0);
        assert_eq!(time.delta_ms, 0.0);
    }

    #[test]
    fn test_time_scale() {
        let mut time = GameTime::new(TimeConfig {
            time_scale: 2.0,
            ..Default::default()
        });
        time.update(10.0);
        assert_eq!(time.delta_ms, 20.0);
        assert_eq!(time.total_ms, 20.0);

        // Clamping happens before scaling.
        time.update(1000.0);
        assert_eq!(time.delta_ms, 500.0);
    }
}
