//! Game balance knobs
//!
//! Every number the simulation uses that is not arena geometry lives here so a
//! build can ship a different JSON tuning file without touching code.

use serde::{Deserialize, Serialize};

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    pub ship_width: f32,
    pub ship_height: f32,
    /// Horizontal thrust while a single button is held (units/s²)
    pub ship_thrust: f32,
    /// Deceleration applied when no button is held (units/s²)
    pub ship_drag: f32,
    /// Horizontal speed cap, both directions (units/s)
    pub ship_max_speed: f32,

    // === Enemies ===
    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Downward speed given at spawn
    pub enemy_initial_speed: f32,
    /// Downward acceleration per level (units/s²)
    pub enemy_accel_per_level: f32,
    pub enemy_max_speed_base: f32,
    pub enemy_max_speed_per_level: f32,
    /// Live enemies allowed at level 0; one more per level
    pub enemy_base_capacity: usize,
    /// Live enemies allowed at any level
    pub enemy_hard_cap: usize,
    /// Points for each enemy that falls past the bottom edge
    pub enemy_score: u64,

    // === Enemy spawn timing (microseconds) ===
    pub spawn_interval_base_us: u64,
    pub spawn_interval_decay_us: u64,
    /// Shortest interval the level decay may reach
    pub spawn_interval_floor_us: u64,
    pub level_interval_us: u64,

    // === Bubbles ===
    pub bubble_period_us: u64,
    pub bubble_radius_min: f32,
    pub bubble_radius_max: f32,
    pub bubble_speed_min: f32,
    pub bubble_speed_max: f32,
    pub max_bubbles: usize,

    // === Sidewalls ===
    pub wall_width_min: f32,
    pub wall_width_max: f32,
    pub wall_segment_min: f32,
    pub wall_segment_max: f32,
    pub wall_speed: f32,
    /// Slot limit of each sidewall pool
    pub max_wall_segments: usize,

    // === Debounce ===
    /// Delay after entering Intro before a press starts a round
    pub intro_settle_us: u64,
    /// Delay after a crash before a press returns to Intro
    pub game_over_settle_us: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_width: 20.0,
            ship_height: 40.0,
            ship_thrust: 200.0,
            ship_drag: 100.0,
            ship_max_speed: 100.0,

            enemy_width: 8.0,
            enemy_height: 16.0,
            enemy_initial_speed: 10.0,
            enemy_accel_per_level: 10.0,
            enemy_max_speed_base: 30.0,
            enemy_max_speed_per_level: 30.0,
            enemy_base_capacity: 5,
            enemy_hard_cap: 20,
            enemy_score: 100,

            spawn_interval_base_us: 4_000_000,
            spawn_interval_decay_us: 250_000,
            spawn_interval_floor_us: 500_000,
            level_interval_us: 10_000_000,

            bubble_period_us: 250_000,
            bubble_radius_min: 1.5,
            bubble_radius_max: 5.0,
            bubble_speed_min: 15.0,
            bubble_speed_max: 45.0,
            max_bubbles: 48,

            wall_width_min: 3.0,
            wall_width_max: 9.0,
            wall_segment_min: 20.0,
            wall_segment_max: 60.0,
            wall_speed: 40.0,
            max_wall_segments: 32,

            intro_settle_us: 500_000,
            game_over_settle_us: 2_000_000,
        }
    }
}

impl Tuning {
    /// Parse a tuning file; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize for writing out a starting-point tuning file
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a file path, falling back to defaults when unreadable
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Starting x of the ship (top-left), one unit right of true center
    pub fn ship_start_x(&self) -> f32 {
        (crate::consts::ARENA_WIDTH / 2.0).floor() + 1.0 - self.ship_width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "enemy_hard_cap": 7, "ship_thrust": 150.0 }"#).unwrap();
        assert_eq!(tuning.enemy_hard_cap, 7);
        assert_eq!(tuning.ship_thrust, 150.0);
        assert_eq!(tuning.enemy_score, Tuning::default().enemy_score);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json_pretty().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_ship_start_is_centered() {
        assert_eq!(Tuning::default().ship_start_x(), 58.0);
    }
}
