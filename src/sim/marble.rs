//! Marble physics
//!
//! Integration is split into propose and commit: `integrate` returns where
//! the marble wants to go, the caller runs collision against that proposal
//! and commits the corrected position with `set_position`.

use glam::DVec2;

use crate::consts::{EDGE_BOUNCE_DAMPING, VELOCITY_EPSILON};

/// The player-controlled marble
#[derive(Debug, Clone)]
pub struct Marble {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    /// Velocity retained per tick (1.0 = frictionless)
    pub friction: f64,
}

impl Marble {
    pub fn new(x: f64, y: f64, radius: f64, friction: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            vel: DVec2::ZERO,
            radius,
            friction,
        }
    }

    /// Advance one tick: returns the proposed new position, then decays
    /// velocity by friction and snaps near-zero components to exactly zero.
    ///
    /// The marble's own position is NOT updated here; collision resolution
    /// may override the proposal before the caller commits it.
    pub fn integrate(&mut self) -> DVec2 {
        let proposed = self.pos + self.vel;

        self.vel *= self.friction;

        if self.vel.x.abs() < VELOCITY_EPSILON {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < VELOCITY_EPSILON {
            self.vel.y = 0.0;
        }

        proposed
    }

    /// Apply a tilt impulse (adds directly to velocity)
    pub fn add_force(&mut self, fx: f64, fy: f64) {
        self.vel.x += fx;
        self.vel.y += fy;
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.pos = DVec2::new(x, y);
    }

    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.vel = DVec2::new(vx, vy);
    }

    pub fn position(&self) -> (f64, f64) {
        (self.pos.x, self.pos.y)
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vel.x, self.vel.y)
    }

    /// Put the marble back at a spawn point with no motion
    pub fn reset(&mut self, spawn: DVec2) {
        self.pos = spawn;
        self.vel = DVec2::ZERO;
    }

    /// Full-viewport mode: bounce off the viewport edges when no tile grid
    /// owns collision. Each edge reflects its axis independently with
    /// damping and clamps the marble fully inside.
    pub fn constrain_to_bounds(&mut self, width: f64, height: f64) {
        if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x * EDGE_BOUNCE_DAMPING;
        } else if self.pos.x + self.radius > width {
            self.pos.x = width - self.radius;
            self.vel.x = -self.vel.x * EDGE_BOUNCE_DAMPING;
        }

        if self.pos.y - self.radius < 0.0 {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y * EDGE_BOUNCE_DAMPING;
        } else if self.pos.y + self.radius > height {
            self.pos.y = height - self.radius;
            self.vel.y = -self.vel.y * EDGE_BOUNCE_DAMPING;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MARBLE_FRICTION, MARBLE_RADIUS};

    #[test]
    fn test_integrate_proposes_without_moving() {
        let mut marble = Marble::new(100.0, 100.0, MARBLE_RADIUS, MARBLE_FRICTION);
        marble.set_velocity(3.0, -2.0);

        let proposed = marble.integrate();
        assert_eq!(proposed, DVec2::new(103.0, 98.0));
        // Position is only committed by the caller
        assert_eq!(marble.pos, DVec2::new(100.0, 100.0));
    }

    #[test]
    fn test_friction_decays_to_exact_zero() {
        let mut marble = Marble::new(0.0, 0.0, MARBLE_RADIUS, MARBLE_FRICTION);
        marble.set_velocity(1.0, 0.0);

        let mut last_speed = marble.vel.x;
        let mut ticks = 0;
        while marble.vel.x != 0.0 {
            marble.integrate();
            assert!(
                marble.vel.x == 0.0 || marble.vel.x < last_speed,
                "speed must strictly decrease until the snap"
            );
            last_speed = marble.vel.x;
            ticks += 1;
            assert!(ticks < 1000, "velocity never snapped to zero");
        }

        assert_eq!(marble.vel, DVec2::ZERO);
        assert!(last_speed < VELOCITY_EPSILON || marble.vel.x == 0.0);
    }

    #[test]
    fn test_add_force_accumulates() {
        let mut marble = Marble::new(0.0, 0.0, MARBLE_RADIUS, MARBLE_FRICTION);
        marble.add_force(0.2, 0.0);
        marble.add_force(0.2, -0.1);
        assert!((marble.vel.x - 0.4).abs() < 1e-12);
        assert!((marble.vel.y + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_bounce_damps_and_clamps() {
        let mut marble = Marble::new(5.0, 360.0, MARBLE_RADIUS, MARBLE_FRICTION);
        marble.set_velocity(-4.0, 0.0);

        // Marble overlaps the left edge: clamp to radius, reflect with damping
        marble.constrain_to_bounds(1280.0, 720.0);
        assert_eq!(marble.pos.x, MARBLE_RADIUS);
        assert!((marble.vel.x - 4.0 * EDGE_BOUNCE_DAMPING).abs() < 1e-12);

        let mut marble = Marble::new(1278.0, 710.0, MARBLE_RADIUS, MARBLE_FRICTION);
        marble.set_velocity(2.0, 3.0);
        marble.constrain_to_bounds(1280.0, 720.0);
        assert_eq!(marble.pos.x, 1280.0 - MARBLE_RADIUS);
        assert_eq!(marble.pos.y, 720.0 - MARBLE_RADIUS);
        assert!(marble.vel.x < 0.0 && marble.vel.y < 0.0);
    }

    #[test]
    fn test_reset_clears_motion() {
        let mut marble = Marble::new(10.0, 10.0, MARBLE_RADIUS, MARBLE_FRICTION);
        marble.set_velocity(5.0, 5.0);
        marble.reset(DVec2::new(640.0, 360.0));
        assert_eq!(marble.pos, DVec2::new(640.0, 360.0));
        assert_eq!(marble.vel, DVec2::ZERO);
    }
}
