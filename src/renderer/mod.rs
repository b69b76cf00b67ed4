//! Rendering module
//!
//! The game never rasterizes. Each frame becomes an ordered list of clear,
//! rectangle, circle and text commands that the display driver replays.

pub mod command;
pub mod scene;

pub use command::{Color, DrawCommand, Frame, Surface, TextAnchor};
pub use scene::{draw_game_over, draw_intro, draw_playing};
