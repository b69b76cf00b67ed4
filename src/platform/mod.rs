//! Platform abstraction layer
//!
//! The simulation never talks to hardware. Boards plug in:
//! - A monotonic microsecond clock
//! - A two-button sampler
//! - A `Surface` that rasterizes draw commands

pub mod clock;
pub mod runner;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use runner::{ButtonSource, Runner, ScriptedButtons};
