//! Frame loop wiring
//!
//! `Runner` owns the game state and its three collaborators. Each call to
//! `run_frame` samples the buttons once, reads the clock once, ticks the
//! simulation and hands the resulting commands to the surface.

use std::collections::VecDeque;

use super::clock::Clock;
use crate::Tuning;
use crate::renderer::{Frame, Surface};
use crate::sim::{Buttons, GameState, TickInput, tick};

/// Source of one button sample per frame
pub trait ButtonSource {
    fn sample(&mut self) -> Buttons;
}

/// Plays back a fixed sequence of samples, then reports nothing held
#[derive(Debug, Clone, Default)]
pub struct ScriptedButtons {
    samples: VecDeque<Buttons>,
}

impl ScriptedButtons {
    pub fn new(samples: impl IntoIterator<Item = Buttons>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    /// Hold `buttons` for `frames` frames
    pub fn hold(mut self, buttons: Buttons, frames: usize) -> Self {
        self.samples
            .extend(std::iter::repeat_n(buttons, frames));
        self
    }
}

impl ButtonSource for ScriptedButtons {
    fn sample(&mut self) -> Buttons {
        self.samples.pop_front().unwrap_or_default()
    }
}

pub struct Runner<C, B, S> {
    state: GameState,
    clock: C,
    buttons: B,
    surface: S,
    frames: u64,
}

impl<C: Clock, B: ButtonSource, S: Surface> Runner<C, B, S> {
    pub fn new(seed: u64, tuning: Tuning, clock: C, buttons: B, surface: S) -> Self {
        let state = GameState::new(seed, tuning, clock.now_micros());
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state,
            clock,
            buttons,
            surface,
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One frame using the button source
    pub fn run_frame(&mut self) -> Frame {
        let buttons = self.buttons.sample();
        self.run_frame_with(buttons)
    }

    /// One frame with an explicit sample (autopilots, replays)
    pub fn run_frame_with(&mut self, buttons: Buttons) -> Frame {
        let input = TickInput {
            buttons,
            now_us: self.clock.now_micros(),
        };
        let frame = tick(&mut self.state, &input);
        frame.replay(&mut self.surface);
        self.frames += 1;
        frame
    }
}
