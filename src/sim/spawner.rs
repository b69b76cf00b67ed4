//! Time- and population-gated spawning
//!
//! Enemies get faster spawn rates and a larger population cap as the level
//! rises. Bubbles and sidewall segments are decoration: they follow their own
//! fixed cadence and never take part in collisions.

use glam::Vec2;
use rand::Rng;

use super::error::{SimError, SimResult};
use super::pool::{EntityPool, Handle};
use super::state::{GamePhase, Piece};
use crate::Tuning;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Which edge a sidewall hugs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Top-left x of a segment of the given width on this edge
    pub fn origin_x(self, width: f32) -> f32 {
        match self {
            Side::Left => 0.0,
            Side::Right => ARENA_WIDTH - width,
        }
    }
}

/// Microseconds between enemy spawns at `level`, never below the floor
pub fn spawn_interval_us(tuning: &Tuning, level: u32) -> u64 {
    tuning
        .spawn_interval_base_us
        .saturating_sub(tuning.spawn_interval_decay_us.saturating_mul(level as u64))
        .max(tuning.spawn_interval_floor_us)
}

/// Most enemies allowed alive at once at `level`
pub fn enemy_capacity(tuning: &Tuning, level: u32) -> usize {
    tuning
        .enemy_base_capacity
        .saturating_add(level as usize)
        .min(tuning.enemy_hard_cap)
}

/// Uniform pick in `[lo, hi]`, tolerating a collapsed range
fn random_between<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}

/// Try to add one enemy above the arena
///
/// Returns `Ok(None)` when the interval has not elapsed or the population is
/// at its cap; the spawn timer only restarts when an enemy is created.
pub fn spawn_enemy<R: Rng>(
    phase: GamePhase,
    enemies: &mut EntityPool<Piece>,
    tuning: &Tuning,
    level: u32,
    now_us: u64,
    last_spawn_us: &mut u64,
    rng: &mut R,
) -> SimResult<Option<Handle>> {
    if phase != GamePhase::Playing {
        return Err(SimError::InvalidState {
            phase,
            operation: "spawning enemies",
        });
    }

    if now_us.saturating_sub(*last_spawn_us) < spawn_interval_us(tuning, level) {
        return Ok(None);
    }
    if enemies.len() >= enemy_capacity(tuning, level) {
        return Ok(None);
    }

    let dimensions = Vec2::new(tuning.enemy_width, tuning.enemy_height);
    let x = random_between(rng, 0.0, ARENA_WIDTH - dimensions.x);
    let enemy = Piece::new(dimensions, Vec2::new(x, -dimensions.y))
        .with_velocity(Vec2::new(0.0, tuning.enemy_initial_speed));

    let handle = enemies.append(enemy)?;
    *last_spawn_us = now_us;
    log::debug!(
        "Spawned enemy at x={:.1} (level {}, {} alive)",
        x,
        level,
        enemies.len()
    );
    Ok(Some(handle))
}

/// Drop a bubble in from above on a fixed cadence
pub fn spawn_bubble<R: Rng>(
    bubbles: &mut EntityPool<Piece>,
    tuning: &Tuning,
    now_us: u64,
    last_spawn_us: &mut u64,
    rng: &mut R,
) -> SimResult<Option<Handle>> {
    if now_us.saturating_sub(*last_spawn_us) < tuning.bubble_period_us {
        return Ok(None);
    }
    *last_spawn_us = now_us;
    if bubbles.len() >= tuning.max_bubbles {
        return Ok(None);
    }

    let radius = random_between(rng, tuning.bubble_radius_min, tuning.bubble_radius_max);
    let diameter = radius * 2.0;
    let x = random_between(rng, 0.0, ARENA_WIDTH - diameter);
    let speed = random_between(rng, tuning.bubble_speed_min, tuning.bubble_speed_max);

    let bubble = Piece::new(Vec2::splat(diameter), Vec2::new(x, -diameter))
        .with_velocity(Vec2::new(0.0, speed));
    bubbles.append(bubble).map(Some)
}

/// A sidewall segment whose bottom edge sits at `bottom_y`
pub fn wall_segment<R: Rng>(
    side: Side,
    bottom_y: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Piece {
    let width = random_between(rng, tuning.wall_width_min, tuning.wall_width_max);
    let height = random_between(rng, tuning.wall_segment_min, tuning.wall_segment_max);
    let mut segment = Piece::new(
        Vec2::new(width, height),
        Vec2::new(side.origin_x(width), bottom_y - height),
    )
    .with_velocity(Vec2::new(0.0, tuning.wall_speed));
    // Already inside the arena: its successor is accounted for
    segment.flag = segment.position.y >= 0.0;
    segment
}

/// Stack segments from the arena floor up past the top edge, if the wall is empty
pub fn seed_sidewall<R: Rng>(
    wall: &mut EntityPool<Piece>,
    side: Side,
    tuning: &Tuning,
    rng: &mut R,
) -> SimResult<()> {
    if !wall.is_empty() {
        return Ok(());
    }

    let mut bottom = ARENA_HEIGHT;
    loop {
        let segment = wall_segment(side, bottom, tuning, rng);
        wall.append(segment)?;
        if !segment.flag {
            break;
        }
        bottom = segment.position.y;
    }
    log::debug!("Seeded {:?} sidewall with {} segments", side, wall.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_spawn_interval_shrinks_to_floor() {
        let tuning = Tuning::default();
        assert_eq!(spawn_interval_us(&tuning, 1), 3_750_000);
        assert_eq!(spawn_interval_us(&tuning, 4), 3_000_000);
        assert_eq!(spawn_interval_us(&tuning, 14), 500_000);
        assert_eq!(spawn_interval_us(&tuning, 1_000), 500_000);
        assert_eq!(spawn_interval_us(&tuning, u32::MAX), 500_000);
    }

    #[test]
    fn test_capacity_respects_hard_cap() {
        let tuning = Tuning::default();
        assert_eq!(enemy_capacity(&tuning, 1), 6);
        assert_eq!(enemy_capacity(&tuning, 15), 20);
        assert_eq!(enemy_capacity(&tuning, 400), 20);
    }

    #[test]
    fn test_spawn_enemy_waits_for_interval() {
        let tuning = Tuning::default();
        let mut enemies = EntityPool::with_limit(tuning.enemy_hard_cap);
        let mut last = 0;
        let mut rng = rng();

        let early = spawn_enemy(GamePhase::Playing, &mut enemies, &tuning, 1, 3_000_000, &mut last, &mut rng);
        assert_eq!(early, Ok(None));
        assert_eq!(last, 0);

        let handle = spawn_enemy(GamePhase::Playing, &mut enemies, &tuning, 1, 3_750_000, &mut last, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(last, 3_750_000);

        let enemy = enemies.get(handle).unwrap();
        assert_eq!(enemy.dimensions, Vec2::new(8.0, 16.0));
        assert_eq!(enemy.position.y, -16.0);
        assert_eq!(enemy.velocity, Vec2::new(0.0, 10.0));
        assert!(enemy.position.x >= 0.0 && enemy.position.x <= ARENA_WIDTH - 8.0);
    }

    #[test]
    fn test_spawn_enemy_blocked_at_capacity() {
        let tuning = Tuning::default();
        let mut enemies = EntityPool::with_limit(tuning.enemy_hard_cap);
        let mut rng = rng();
        for _ in 0..enemy_capacity(&tuning, 1) {
            enemies.append(Piece::default()).unwrap();
        }
        let mut last = 0;
        let result = spawn_enemy(GamePhase::Playing, &mut enemies, &tuning, 1, 60_000_000, &mut last, &mut rng);
        assert_eq!(result, Ok(None));
        assert_eq!(enemies.len(), 6);
        assert_eq!(last, 0);
    }

    #[test]
    fn test_spawn_enemy_outside_playing_is_invalid() {
        let tuning = Tuning::default();
        let mut enemies = EntityPool::new();
        let mut last = 0;
        let result = spawn_enemy(GamePhase::GameOver, &mut enemies, &tuning, 1, 60_000_000, &mut last, &mut rng());
        assert!(matches!(result, Err(SimError::InvalidState { phase: GamePhase::GameOver, .. })));
        assert!(enemies.is_empty());
    }

    #[test]
    fn test_spawn_enemy_reports_exhausted_pool() {
        let tuning = Tuning {
            enemy_hard_cap: 50,
            ..Tuning::default()
        };
        let mut enemies = EntityPool::with_limit(0);
        let mut last = 0;
        let result = spawn_enemy(GamePhase::Playing, &mut enemies, &tuning, 1, 60_000_000, &mut last, &mut rng());
        assert!(matches!(result, Err(SimError::OutOfMemory { .. })));
        assert_eq!(last, 0);
    }

    #[test]
    fn test_bubble_cadence_and_size() {
        let tuning = Tuning::default();
        let mut bubbles = EntityPool::new();
        let mut last = 0;
        let mut rng = rng();

        assert_eq!(spawn_bubble(&mut bubbles, &tuning, 100_000, &mut last, &mut rng), Ok(None));
        let handle = spawn_bubble(&mut bubbles, &tuning, 250_000, &mut last, &mut rng)
            .unwrap()
            .unwrap();
        let bubble = bubbles.get(handle).unwrap();
        let d = bubble.dimensions.x;
        assert_eq!(bubble.dimensions.y, d);
        assert!(d >= tuning.bubble_radius_min * 2.0 && d <= tuning.bubble_radius_max * 2.0);
        assert!(bubble.velocity.y >= tuning.bubble_speed_min);
        assert_eq!(bubble.position.y, -d);
    }

    #[test]
    fn test_seed_covers_arena_height() {
        let tuning = Tuning::default();
        let mut wall = EntityPool::with_limit(tuning.max_wall_segments);
        seed_sidewall(&mut wall, Side::Right, &tuning, &mut rng()).unwrap();

        let segments: Vec<Piece> = wall.iter().map(|(_, p)| *p).collect();
        assert!((segments[0].bottom() - ARENA_HEIGHT).abs() < 1e-3);
        for pair in segments.windows(2) {
            assert!((pair[1].bottom() - pair[0].top()).abs() < 1e-3);
        }
        // Only the topmost segment still owes a successor
        let last = segments.last().unwrap();
        assert!(last.top() < 0.0 && !last.flag);
        assert!(segments[..segments.len() - 1].iter().all(|s| s.flag));
        assert!(segments.iter().all(|s| (s.right() - ARENA_WIDTH).abs() < 1e-3));

        // Seeding a non-empty wall is a no-op
        let before = wall.len();
        seed_sidewall(&mut wall, Side::Right, &tuning, &mut rng()).unwrap();
        assert_eq!(wall.len(), before);
    }
}
