//! Explicit Euler integration and the ship controller
//!
//! Velocity is updated first and clamped, then position advances by the
//! clamped velocity. Only the ship is held inside the arena; everything else
//! is allowed to fall out so culling can see it.

use glam::Vec2;

use super::input::ButtonCombo;
use super::state::Piece;
use crate::Tuning;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Per-axis velocity limits (may be asymmetric)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl VelocityBounds {
    pub const UNBOUNDED: Self = Self {
        min: Vec2::NEG_INFINITY,
        max: Vec2::INFINITY,
    };

    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// `[-max, max]` on each axis
    pub fn symmetric(max: Vec2) -> Self {
        Self { min: -max, max }
    }

    #[inline]
    pub fn clamp(&self, v: Vec2) -> Vec2 {
        v.max(self.min).min(self.max)
    }
}

/// Advance one step: returns `(velocity, position)` without touching `piece`
#[inline]
pub fn integrate(piece: &Piece, dt: f32, bounds: VelocityBounds) -> (Vec2, Vec2) {
    let velocity = bounds.clamp(piece.velocity + piece.acceleration * dt);
    let position = piece.position + velocity * dt;
    (velocity, position)
}

/// Component-wise clamp of a top-left corner
#[inline]
pub fn clamp_position(position: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    position.max(min).min(max)
}

/// Map the held buttons to a ship acceleration
pub fn ship_acceleration(combo: ButtonCombo, ship: &Piece, thrust: f32, drag: f32) -> Vec2 {
    match combo {
        // Reserved for a future action; keep whatever was applied last
        ButtonCombo::Both => ship.acceleration,
        ButtonCombo::Left => Vec2::new(-thrust, 0.0),
        ButtonCombo::Right => Vec2::new(thrust, 0.0),
        ButtonCombo::None => {
            let ax = if ship.velocity.x < 0.0 {
                drag
            } else if ship.velocity.x > 0.0 {
                -drag
            } else {
                0.0
            };
            Vec2::new(ax, 0.0)
        }
    }
}

/// Ship velocity limits: horizontal only
pub fn ship_bounds(tuning: &Tuning) -> VelocityBounds {
    VelocityBounds::symmetric(Vec2::new(tuning.ship_max_speed, 0.0))
}

/// Steer, integrate and confine the ship for one frame
pub fn step_ship(ship: &mut Piece, combo: ButtonCombo, dt: f32, tuning: &Tuning) {
    ship.acceleration = ship_acceleration(combo, ship, tuning.ship_thrust, tuning.ship_drag);

    let (mut velocity, mut position) = integrate(ship, dt, ship_bounds(tuning));

    // Drag stops the ship, it never pushes it back the other way
    if combo == ButtonCombo::None && velocity.x * ship.velocity.x < 0.0 {
        velocity.x = 0.0;
        position = ship.position + velocity * dt;
    }

    let max = Vec2::new(
        ARENA_WIDTH - ship.dimensions.x,
        ARENA_HEIGHT - ship.dimensions.y,
    );
    ship.velocity = velocity;
    ship.position = clamp_position(position, Vec2::ZERO, max);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ship_at(x: f32) -> Piece {
        let tuning = Tuning::default();
        Piece::new(
            Vec2::new(tuning.ship_width, tuning.ship_height),
            Vec2::new(x, ARENA_HEIGHT - tuning.ship_height),
        )
    }

    #[test]
    fn test_integrate_basic() {
        let piece = Piece::new(Vec2::ONE, Vec2::new(10.0, 10.0))
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_acceleration(Vec2::new(10.0, 0.0));
        let (v, p) = integrate(&piece, 0.5, VelocityBounds::UNBOUNDED);
        assert_eq!(v, Vec2::new(6.0, 2.0));
        assert_eq!(p, Vec2::new(13.0, 11.0));
    }

    #[test]
    fn test_integrate_asymmetric_clamp() {
        let bounds = VelocityBounds::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 60.0));
        let piece = Piece::new(Vec2::ONE, Vec2::ZERO)
            .with_velocity(Vec2::new(0.0, 55.0))
            .with_acceleration(Vec2::new(-5.0, 100.0));
        let (v, p) = integrate(&piece, 1.0, bounds);
        assert_eq!(v, Vec2::new(0.0, 60.0));
        assert_eq!(p, Vec2::new(0.0, 60.0));
    }

    #[test]
    fn test_acceleration_table() {
        let mut ship = ship_at(58.0);
        ship.acceleration = Vec2::new(123.0, 0.0);
        assert_eq!(
            ship_acceleration(ButtonCombo::Both, &ship, 200.0, 100.0),
            Vec2::new(123.0, 0.0)
        );
        assert_eq!(
            ship_acceleration(ButtonCombo::Left, &ship, 200.0, 100.0),
            Vec2::new(-200.0, 0.0)
        );
        assert_eq!(
            ship_acceleration(ButtonCombo::Right, &ship, 200.0, 100.0),
            Vec2::new(200.0, 0.0)
        );
        assert_eq!(
            ship_acceleration(ButtonCombo::None, &ship, 200.0, 100.0),
            Vec2::ZERO
        );
        ship.velocity.x = -3.0;
        assert_eq!(
            ship_acceleration(ButtonCombo::None, &ship, 200.0, 100.0),
            Vec2::new(100.0, 0.0)
        );
        ship.velocity.x = 3.0;
        assert_eq!(
            ship_acceleration(ButtonCombo::None, &ship, 200.0, 100.0),
            Vec2::new(-100.0, 0.0)
        );
    }

    #[test]
    fn test_drag_stops_at_zero() {
        let tuning = Tuning::default();
        let mut ship = ship_at(58.0).with_velocity(Vec2::new(0.5, 0.0));
        // 100 units/s² for 0.1s would take 0.5 to -9.5
        step_ship(&mut ship, ButtonCombo::None, 0.1, &tuning);
        assert_eq!(ship.velocity.x, 0.0);
        assert_eq!(ship.position.x, 58.0);

        // Stays put on the next frame too
        step_ship(&mut ship, ButtonCombo::None, 0.1, &tuning);
        assert_eq!(ship.velocity.x, 0.0);
        assert_eq!(ship.acceleration, Vec2::ZERO);
    }

    #[test]
    fn test_hold_left_clamps_speed_and_position() {
        let tuning = Tuning::default();
        let mut ship = ship_at(tuning.ship_start_x());
        let dt = 0.01;

        for step in 1..=100 {
            let before = ship.position.x;
            step_ship(&mut ship, ButtonCombo::Left, dt, &tuning);
            assert!(ship.velocity.x >= -tuning.ship_max_speed);
            assert!(ship.position.x >= 0.0);
            assert!(before - ship.position.x <= tuning.ship_max_speed * dt + 1e-4);
            if step == 50 {
                assert!((ship.velocity.x + 100.0).abs() < 1e-3);
            }
        }

        assert_eq!(ship.velocity.x, -100.0);
        assert_eq!(ship.position.x, 0.0);
    }

    #[test]
    fn test_ship_confined_right() {
        let tuning = Tuning::default();
        let mut ship = ship_at(110.0).with_velocity(Vec2::new(100.0, 0.0));
        step_ship(&mut ship, ButtonCombo::Right, 0.1, &tuning);
        assert_eq!(ship.position.x, ARENA_WIDTH - tuning.ship_width);
        assert_eq!(ship.position.y, ARENA_HEIGHT - tuning.ship_height);
    }

    proptest! {
        #[test]
        fn prop_velocity_delta_is_linear(ax in -500.0f32..500.0, ay in -500.0f32..500.0, dt in 0.001f32..0.1) {
            let base = Piece::new(Vec2::ONE, Vec2::ZERO).with_velocity(Vec2::new(3.0, -2.0));
            let single = base.with_acceleration(Vec2::new(ax, ay));
            let double = base.with_acceleration(Vec2::new(ax, ay) * 2.0);

            let (v1, _) = integrate(&single, dt, VelocityBounds::UNBOUNDED);
            let (v2, _) = integrate(&double, dt, VelocityBounds::UNBOUNDED);
            let d1 = v1 - base.velocity;
            let d2 = v2 - base.velocity;
            prop_assert!((d2 - d1 * 2.0).abs().max_element() < 1e-3);
        }

        #[test]
        fn prop_velocity_never_exceeds_bounds(vx in -300.0f32..300.0, ax in -1000.0f32..1000.0, dt in 0.0f32..0.1) {
            let bounds = VelocityBounds::new(Vec2::new(-100.0, 0.0), Vec2::new(100.0, 0.0));
            let piece = Piece::new(Vec2::ONE, Vec2::ZERO)
                .with_velocity(Vec2::new(vx, 0.0))
                .with_acceleration(Vec2::new(ax, 50.0));
            let (v, _) = integrate(&piece, dt, bounds);
            prop_assert!(v.x >= -100.0 && v.x <= 100.0);
            prop_assert_eq!(v.y, 0.0);
        }
    }
}
