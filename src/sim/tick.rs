//! Frame update
//!
//! One call to `tick` is one frame: read the buttons and the clock, advance
//! the simulation, emit the draw commands, then apply any phase change the
//! frame produced. A crash is only acted on after the frame that detected it
//! has been fully updated and drawn.

use glam::Vec2;

use super::collision::{below_arena, overlaps};
use super::error::{SimError, SimResult};
use super::input::Buttons;
use super::physics::{VelocityBounds, integrate, step_ship};
use super::pool::EntityPool;
use super::spawner::{Side, seed_sidewall, spawn_bubble, spawn_enemy, wall_segment};
use super::state::{GameEvent, GamePhase, GameState, Piece};
use crate::Tuning;
use crate::consts::ARENA_HEIGHT;
use crate::renderer::{Frame, draw_game_over, draw_intro, draw_playing};

/// Inputs for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Button levels sampled this frame
    pub buttons: Buttons,
    /// Monotonic clock reading (microseconds)
    pub now_us: u64,
}

/// Advance the game by one frame and return what to draw
pub fn tick(state: &mut GameState, input: &TickInput) -> Frame {
    state.events.clear();
    let now = input.now_us;
    let dt = state.frame_dt(now);
    let pressed = state.edge.update(input.buttons);
    let mut frame = Frame::new();

    match state.phase {
        GamePhase::Intro => {
            if let Err(e) = advance_decor(state, now, dt) {
                log::warn!("Decoration update failed: {}", e);
            }
            draw_intro(&mut frame, state);
            if pressed && state.time_in_phase(now) >= state.tuning.intro_settle_us {
                start_round(state, now);
            }
        }

        GamePhase::Playing => {
            let result = play_frame(state, input, dt);
            draw_playing(&mut frame, state);
            match result {
                Err(e) => abort_round(state, e, now),
                Ok(()) if state.crashed => end_round(state, now),
                Ok(()) => {}
            }
        }

        GamePhase::GameOver => {
            if let Err(e) = advance_decor(state, now, dt) {
                log::warn!("Decoration update failed: {}", e);
            }
            draw_game_over(&mut frame, state);
            if pressed && state.time_in_phase(now) >= state.tuning.game_over_settle_us {
                state.enter_phase(GamePhase::Intro, now);
                state.events.push(GameEvent::ReturnedToIntro);
            }
        }
    }

    frame.present();
    frame
}

/// Intro -> Playing
fn start_round(state: &mut GameState, now: u64) {
    state.score = 0;
    state.level = 1;
    state.crashed = false;
    state.enemies.clear();
    state.ship = Some(state.spawn_ship());
    state.timers.last_enemy_spawn = now;
    state.timers.last_level_change = now;

    let tuning = &state.tuning;
    for (wall, side) in [
        (&mut state.left_wall, Side::Left),
        (&mut state.right_wall, Side::Right),
    ] {
        if let Err(e) = seed_sidewall(wall, side, tuning, &mut state.rng) {
            log::warn!("Could not seed {:?} sidewall: {}", side, e);
        }
    }

    state.enter_phase(GamePhase::Playing, now);
    state.events.push(GameEvent::RoundStarted);
    log::info!("Round started");
}

/// Playing -> GameOver after a crash
fn end_round(state: &mut GameState, now: u64) {
    log::info!("Crashed at level {} with score {}", state.level, state.score);
    state.enemies.clear();
    state.ship = None;
    state.enter_phase(GamePhase::GameOver, now);
    state.events.push(GameEvent::RoundEnded {
        score: state.score,
        level: state.level,
    });
}

/// Playing -> GameOver because the frame could not be completed
fn abort_round(state: &mut GameState, error: SimError, now: u64) {
    log::error!("Round aborted: {}", error);
    state.enemies.clear();
    state.ship = None;
    state.enter_phase(GamePhase::GameOver, now);
    state.events.push(GameEvent::RoundAborted(error));
}

/// Everything that happens in one Playing frame before drawing
fn play_frame(state: &mut GameState, input: &TickInput, dt: f32) -> SimResult<()> {
    let now = input.now_us;
    advance_decor(state, now, dt)?;

    let ship = state.ship.as_mut().ok_or(SimError::InvalidState {
        phase: state.phase,
        operation: "playing without a ship",
    })?;
    step_ship(ship, input.buttons.combo(), dt, &state.tuning);

    spawn_enemy(
        state.phase,
        &mut state.enemies,
        &state.tuning,
        state.level,
        now,
        &mut state.timers.last_enemy_spawn,
        &mut state.rng,
    )?;

    advance_enemies(state, dt)?;
    advance_level(state, now);
    Ok(())
}

/// Velocity limits for enemies at `level`: straight down only
pub fn enemy_bounds(tuning: &Tuning, level: u32) -> VelocityBounds {
    let max_fall = tuning.enemy_max_speed_base + tuning.enemy_max_speed_per_level * level as f32;
    VelocityBounds::new(Vec2::ZERO, Vec2::new(0.0, max_fall))
}

/// Integrate every enemy, test it against the ship, cull the ones that fell out
pub(crate) fn advance_enemies(state: &mut GameState, dt: f32) -> SimResult<()> {
    let bounds = enemy_bounds(&state.tuning, state.level);
    let acceleration = Vec2::new(0.0, state.tuning.enemy_accel_per_level * state.level as f32);

    let mut cursor = state.enemies.first();
    while let Some(handle) = cursor {
        // Grab the successor before this node can be unlinked
        cursor = state.enemies.next_of(handle);

        let Some(enemy) = state.enemies.get_mut(handle) else {
            continue;
        };
        enemy.acceleration = acceleration;
        let (velocity, position) = integrate(enemy, dt, bounds);
        enemy.velocity = velocity;
        enemy.position = position;
        let enemy = *enemy;

        if let Some(ship) = &state.ship {
            if !state.crashed && overlaps(&enemy, ship) {
                state.crashed = true;
                state.events.push(GameEvent::Crashed);
            }
        }

        if below_arena(&enemy, ARENA_HEIGHT) {
            state.enemies.remove(handle)?;
            state.score += state.tuning.enemy_score;
            state.events.push(GameEvent::EnemyCulled { score: state.score });
        }
    }
    Ok(())
}

/// Bump the level once per elapsed interval, on a fixed schedule
pub(crate) fn advance_level(state: &mut GameState, now: u64) {
    let interval = state.tuning.level_interval_us.max(1);
    while now.saturating_sub(state.timers.last_level_change) >= interval {
        state.level += 1;
        state.timers.last_level_change += interval;
        state.events.push(GameEvent::LevelUp { level: state.level });
        log::info!("Level {}", state.level);
    }
}

/// Bubbles and sidewalls: move, cull, spawn
pub(crate) fn advance_decor(state: &mut GameState, now: u64, dt: f32) -> SimResult<()> {
    state
        .bubbles
        .retain_mut(|bubble| fall(bubble, dt));
    spawn_bubble(
        &mut state.bubbles,
        &state.tuning,
        now,
        &mut state.timers.last_bubble_spawn,
        &mut state.rng,
    )?;

    advance_sidewall(&mut state.left_wall, Side::Left, &state.tuning, dt, &mut state.rng)?;
    advance_sidewall(&mut state.right_wall, Side::Right, &state.tuning, dt, &mut state.rng)?;
    Ok(())
}

/// Constant-velocity step for decoration; false once it has left the arena
fn fall(piece: &mut Piece, dt: f32) -> bool {
    let (velocity, position) = integrate(piece, dt, VelocityBounds::UNBOUNDED);
    piece.velocity = velocity;
    piece.position = position;
    !below_arena(piece, ARENA_HEIGHT)
}

/// Move a sidewall down and keep it continuous
///
/// The first time a segment's top edge enters the arena it is flagged and
/// successors are stacked directly above it until one pokes out of the top.
/// Successors are linked after the walk so they don't move on the frame they
/// are created.
fn advance_sidewall<R: rand::Rng>(
    wall: &mut EntityPool<Piece>,
    side: Side,
    tuning: &Tuning,
    dt: f32,
    rng: &mut R,
) -> SimResult<()> {
    let mut successors: Vec<Piece> = Vec::new();

    wall.retain_mut(|segment| {
        let alive = fall(segment, dt);
        if !segment.flag && segment.position.y >= 0.0 {
            segment.flag = true;
            let mut bottom = segment.position.y;
            loop {
                let next = wall_segment(side, bottom, tuning, rng);
                successors.push(next);
                if !next.flag {
                    break;
                }
                bottom = next.position.y;
            }
        }
        alive
    });

    for successor in successors {
        wall.append(successor)?;
    }
    Ok(())
}
