//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, tuning, button samples
//! and clock readings, a run replays exactly:
//! - Time only comes in through `TickInput::now_us`
//! - Randomness only comes from the seeded RNG in `GameState`
//! - Pools iterate in insertion order
//! - No rasterization or hardware access

pub mod collision;
pub mod error;
pub mod input;
pub mod physics;
pub mod pool;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{below_arena, overlaps};
pub use error::{SimError, SimResult};
pub use input::{ButtonCombo, Buttons, EdgeDetector};
pub use physics::{VelocityBounds, integrate, step_ship};
pub use pool::{EntityPool, Handle};
pub use spawner::{Side, enemy_capacity, spawn_interval_us};
pub use state::{GameEvent, GamePhase, GameState, Piece, Timers};
pub use tick::{TickInput, tick};
