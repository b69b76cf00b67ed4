//! Game state and core simulation types
//!
//! Round-scoped data (ship, enemies, score, level) is rebuilt every time a
//! round starts. The bubble and sidewall pools live as long as the process.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::error::SimError;
use super::input::EdgeDetector;
use super::pool::EntityPool;
use crate::Tuning;
use crate::consts::{ARENA_HEIGHT, MAX_FRAME_DT};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for a press
    Intro,
    /// Active round
    Playing,
    /// Crash screen, waiting for a press
    GameOver,
}

/// A simulated rectangle
///
/// `position` is the top-left corner of the bounding box. `flag` is free for
/// the owning pool to use (sidewalls mark whether a piece has already spawned
/// its successor).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Piece {
    pub dimensions: Vec2,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub flag: bool,
}

impl Piece {
    pub fn new(dimensions: Vec2, position: Vec2) -> Self {
        Self {
            dimensions,
            position,
            ..Default::default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.dimensions.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.dimensions.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.dimensions * 0.5
    }
}

/// Something worth telling the outside world about
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    /// An enemy left the arena; carries the new score
    EnemyCulled { score: u64 },
    LevelUp { level: u32 },
    Crashed,
    RoundEnded { score: u64, level: u32 },
    /// The round was torn down because the simulation failed
    RoundAborted(SimError),
    ReturnedToIntro,
}

/// Monotonic microsecond timestamps
#[derive(Debug, Clone, Copy, Default)]
pub struct Timers {
    pub last_frame: u64,
    pub last_enemy_spawn: u64,
    pub last_level_change: u64,
    pub last_bubble_spawn: u64,
    pub phase_entered: u64,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Only present while Playing
    pub ship: Option<Piece>,
    pub enemies: EntityPool<Piece>,
    pub bubbles: EntityPool<Piece>,
    pub left_wall: EntityPool<Piece>,
    pub right_wall: EntityPool<Piece>,
    pub level: u32,
    pub score: u64,
    pub crashed: bool,
    pub timers: Timers,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    pub(crate) edge: EdgeDetector,
}

impl GameState {
    /// Fresh state sitting in Intro at `now_us`
    pub fn new(seed: u64, tuning: Tuning, now_us: u64) -> Self {
        let enemies = EntityPool::with_limit(tuning.enemy_hard_cap);
        let bubbles = EntityPool::with_limit(tuning.max_bubbles);
        let left_wall = EntityPool::with_limit(tuning.max_wall_segments);
        let right_wall = EntityPool::with_limit(tuning.max_wall_segments);

        Self {
            seed,
            tuning,
            phase: GamePhase::Intro,
            ship: None,
            enemies,
            bubbles,
            left_wall,
            right_wall,
            level: 1,
            score: 0,
            crashed: false,
            timers: Timers {
                last_frame: now_us,
                last_enemy_spawn: now_us,
                last_level_change: now_us,
                last_bubble_spawn: now_us,
                phase_entered: now_us,
            },
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            edge: EdgeDetector::default(),
        }
    }

    /// A ship parked at the bottom center of the arena
    pub fn spawn_ship(&self) -> Piece {
        let t = &self.tuning;
        Piece::new(
            Vec2::new(t.ship_width, t.ship_height),
            Vec2::new(t.ship_start_x(), ARENA_HEIGHT - t.ship_height),
        )
    }

    /// Seconds since the previous frame, clamped so a stall can't tunnel pieces
    pub fn frame_dt(&mut self, now_us: u64) -> f32 {
        let elapsed = now_us.saturating_sub(self.timers.last_frame);
        self.timers.last_frame = now_us;
        crate::micros_to_secs(elapsed).min(MAX_FRAME_DT)
    }

    /// Switch phase, stamp the entry time and require a fresh press
    pub(crate) fn enter_phase(&mut self, phase: GamePhase, now_us: u64) {
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.timers.phase_entered = now_us;
        self.edge.disarm();
    }

    /// Microseconds spent in the current phase
    pub fn time_in_phase(&self, now_us: u64) -> u64 {
        now_us.saturating_sub(self.timers.phase_entered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_intro() {
        let state = GameState::new(7, Tuning::default(), 1_000);
        assert_eq!(state.phase, GamePhase::Intro);
        assert!(state.ship.is_none());
        assert_eq!(state.level, 1);
        assert_eq!(state.enemies.limit(), 20);
    }

    #[test]
    fn test_ship_spawns_bottom_center() {
        let state = GameState::new(7, Tuning::default(), 0);
        let ship = state.spawn_ship();
        assert_eq!(ship.position, Vec2::new(58.0, 200.0));
        assert_eq!(ship.bottom(), ARENA_HEIGHT);
    }

    #[test]
    fn test_frame_dt_clamps_and_handles_backwards_clock() {
        let mut state = GameState::new(7, Tuning::default(), 1_000_000);
        assert!((state.frame_dt(1_016_000) - 0.016).abs() < 1e-6);
        assert_eq!(state.frame_dt(5_000_000), MAX_FRAME_DT);
        assert_eq!(state.frame_dt(4_000_000), 0.0);
    }
}
