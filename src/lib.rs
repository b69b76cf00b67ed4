//! Bubble Dodge - a two-button falling-enemy dodger for small portrait displays
//!
//! Core modules:
//! - `sim`: Entity pools, physics, collision, spawning and the game state machine
//! - `renderer`: Draw command lists handed to the display driver
//! - `platform`: Clock and button collaborators
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Fixed arena geometry and timing constants
pub mod consts {
    /// Arena dimensions (portrait, logical units)
    pub const ARENA_WIDTH: f32 = 135.0;
    pub const ARENA_HEIGHT: f32 = 240.0;

    /// Microseconds per second (the clock ticks in microseconds)
    pub const MICROS_PER_SEC: f32 = 1.0e6;
    /// Longest frame delta fed to the integrator, in seconds
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Convert a microsecond span to seconds
#[inline]
pub fn micros_to_secs(micros: u64) -> f32 {
    micros as f32 / consts::MICROS_PER_SEC
}
