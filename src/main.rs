//! Bubble Dodge headless entry point
//!
//! Boards link the library and supply their own clock, buttons and display.
//! This binary runs the simulation against a manual clock with a simple
//! autopilot so balance changes can be checked from a terminal:
//!
//! ```text
//! RUST_LOG=info bubble-dodge [seed] [seconds]
//! BUBBLE_DODGE_TUNING=tuning.json bubble-dodge 42 120
//! ```

use bubble_dodge::Tuning;
use bubble_dodge::platform::{Clock, ManualClock, Runner, ScriptedButtons};
use bubble_dodge::renderer::{DrawCommand, Surface};
use bubble_dodge::sim::{Buttons, GameEvent, GamePhase, GameState};

/// 60 Hz
const FRAME_US: u64 = 16_667;

/// Surface that only keeps counts
#[derive(Debug, Default)]
struct TallySurface {
    frames: u64,
    rects: u64,
    circles: u64,
    texts: u64,
}

impl Surface for TallySurface {
    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear(_) => {}
            DrawCommand::Rect { .. } => self.rects += 1,
            DrawCommand::Circle { .. } => self.circles += 1,
            DrawCommand::Text { .. } => self.texts += 1,
            DrawCommand::Present => self.frames += 1,
        }
    }
}

/// Steer away from the closest enemy that is about to reach the ship's row
fn autopilot(state: &GameState, frame_index: u64) -> Buttons {
    match state.phase {
        // Tap about twice a second to get through the title and crash screens
        GamePhase::Intro | GamePhase::GameOver => {
            if frame_index % 30 == 0 {
                Buttons::LEFT
            } else {
                Buttons::NONE
            }
        }
        GamePhase::Playing => {
            let Some(ship) = state.ship else {
                return Buttons::NONE;
            };
            let ship_center = ship.center().x;
            let threat = state
                .enemies
                .iter()
                .map(|(_, enemy)| *enemy)
                .filter(|enemy| enemy.bottom() > ship.top() - 60.0 && enemy.top() < ship.bottom())
                .filter(|enemy| (enemy.center().x - ship_center).abs() < ship.dimensions.x)
                .min_by(|a, b| {
                    (a.center().x - ship_center)
                        .abs()
                        .partial_cmp(&(b.center().x - ship_center).abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

            match threat {
                Some(enemy) if enemy.center().x >= ship_center => {
                    if ship.left() > 1.0 {
                        Buttons::LEFT
                    } else {
                        Buttons::RIGHT
                    }
                }
                Some(_) => {
                    if ship.right() < bubble_dodge::consts::ARENA_WIDTH - 1.0 {
                        Buttons::RIGHT
                    } else {
                        Buttons::LEFT
                    }
                }
                None => Buttons::NONE,
            }
        }
    }
}

fn load_tuning() -> Tuning {
    match std::env::var_os("BUBBLE_DODGE_TUNING") {
        Some(path) => Tuning::load(std::path::Path::new(&path)),
        None => Tuning::default(),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED_u64);
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);

    log::info!("Bubble Dodge (headless) starting...");
    let mut runner = Runner::new(
        seed,
        load_tuning(),
        ManualClock::new(0),
        ScriptedButtons::default(),
        TallySurface::default(),
    );

    let total_frames = seconds * 1_000_000 / FRAME_US;
    let mut rounds = 0u32;
    let mut best = 0u64;

    for frame_index in 0..total_frames {
        runner.clock().advance(FRAME_US);
        let buttons = autopilot(runner.state(), frame_index);
        runner.run_frame_with(buttons);

        for event in &runner.state().events {
            match event {
                GameEvent::RoundStarted => rounds += 1,
                GameEvent::RoundEnded { score, level } => {
                    best = best.max(*score);
                    log::info!("Round {} over: score {} at level {}", rounds, score, level);
                }
                GameEvent::RoundAborted(e) => log::error!("Round {} aborted: {}", rounds, e),
                _ => {}
            }
        }
    }

    let surface = runner.surface();
    log::info!(
        "Ran {} frames ({:.1}s simulated): {} rounds, best score {}",
        runner.frames(),
        runner.clock().now_micros() as f64 / 1.0e6,
        rounds,
        best.max(runner.state().score)
    );
    log::info!(
        "Draw calls: {} rects, {} circles, {} texts over {} presents",
        surface.rects,
        surface.circles,
        surface.texts,
        surface.frames
    );
}
