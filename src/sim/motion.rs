//! Ball kinematics: acceleration, coasting and rolling rotation
//!
//! Speed is a scalar carried between steps. Holding a direction accelerates
//! toward `max_speed`; releasing it lets the ball coast along the last
//! direction while the speed bleeds off.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::state::Ball;
use crate::flatten;
use crate::tuning::MotionTuning;

/// Result of a single motion step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    /// Horizontal distance actually travelled (after clamping)
    pub distance: f32,
    /// Rotation applied to the ball this step (world axis)
    pub rotation_delta: Quat,
}

impl MotionStep {
    fn still() -> Self {
        Self {
            distance: 0.0,
            rotation_delta: Quat::IDENTITY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionModel {
    pub tuning: MotionTuning,
    /// Scalar speed in world units per step
    pub speed: f32,
    /// Last non-zero intent, used while coasting
    pub last_direction: Vec3,
}

impl MotionModel {
    pub fn new(tuning: MotionTuning) -> Self {
        Self {
            tuning,
            speed: 0.0,
            last_direction: Vec3::ZERO,
        }
    }

    /// Update speed from this step's intent (zero intent = coast)
    pub fn update_speed(&mut self, intent: Vec3) {
        let intent = flatten(intent).normalize_or_zero();
        if intent != Vec3::ZERO {
            self.last_direction = intent;
            self.speed = (self.speed + self.tuning.acceleration).min(self.tuning.max_speed);
        } else if self.speed > 0.0 {
            self.speed = (self.speed - self.tuning.deceleration).max(0.0);
        }
    }

    /// Advance the ball one step
    ///
    /// `y` is re-pinned to `ground_height` every step and x/z are clamped to
    /// `arena_limit` when one is set (a negative or NaN limit is ignored). The rolling rotation is derived from
    /// the distance actually covered, so pushing into a wall does not spin.
    pub fn step(
        &mut self,
        ball: &mut Ball,
        intent: Vec3,
        ground_height: f32,
        arena_limit: Option<f32>,
    ) -> MotionStep {
        self.update_speed(intent);

        let old = ball.pos;
        let mut pos = old + self.last_direction * self.speed;
        pos.y = ground_height;
        if let Some(limit) = arena_limit.filter(|l| *l >= 0.0) {
            pos.x = pos.x.clamp(-limit, limit);
            pos.z = pos.z.clamp(-limit, limit);
        }
        ball.pos = pos;

        let moved = flatten(pos - old);
        let distance = moved.length();
        if distance <= f32::EPSILON {
            return MotionStep::still();
        }

        let rotation_delta = rolling_rotation(moved / distance, distance, ball.radius);
        ball.orientation = (rotation_delta * ball.orientation).normalize();
        MotionStep {
            distance,
            rotation_delta,
        }
    }
}

/// World-axis rotation of a ball of `radius` rolling `distance` along `dir`
///
/// Angle is `(distance / circumference) * 2π` about `Y × dir`, which carries
/// the top of the ball forward. The sign is deliberately positive: the
/// three.js scene this drives previously applied `-angle`, which spins the
/// ball against its direction of travel.
pub fn rolling_rotation(dir: Vec3, distance: f32, radius: f32) -> Quat {
    let axis = Vec3::Y.cross(dir).normalize_or_zero();
    if axis == Vec3::ZERO || radius <= 0.0 {
        return Quat::IDENTITY;
    }
    let circumference = std::f32::consts::TAU * radius;
    let angle = (distance / circumference) * std::f32::consts::TAU;
    Quat::from_axis_angle(axis, angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn tuning() -> MotionTuning {
        MotionTuning {
            acceleration: 0.25,
            deceleration: 0.125,
            max_speed: 0.5,
        }
    }

    fn ball() -> Ball {
        Ball::new(1.0, 0.5)
    }

    #[test]
    fn test_accelerates_to_cap() {
        let mut model = MotionModel::new(tuning());
        let mut ball = ball();
        let speeds: Vec<f32> = (0..5)
            .map(|_| {
                model.step(&mut ball, Vec3::X, 1.0, None);
                model.speed
            })
            .collect();
        assert_eq!(speeds, vec![0.25, 0.5, 0.5, 0.5, 0.5]);
        assert!((ball.pos.x - 2.25).abs() < EPS);
        assert_eq!(model.last_direction, Vec3::X);
    }

    #[test]
    fn test_coasts_then_stops() {
        let mut model = MotionModel::new(tuning());
        let mut ball = ball();
        for _ in 0..2 {
            model.step(&mut ball, Vec3::Z, 1.0, None);
        }
        let released_at = ball.pos;

        // 0.5 -> 0.375 -> 0.25 -> 0.125 -> 0
        let mut speeds = Vec::new();
        for _ in 0..4 {
            model.step(&mut ball, Vec3::ZERO, 1.0, None);
            speeds.push(model.speed);
        }
        assert_eq!(speeds, vec![0.375, 0.25, 0.125, 0.0]);
        assert!((ball.pos.z - released_at.z - 0.75).abs() < EPS);
        assert_eq!(ball.pos.x, 0.0);

        let stopped_at = ball.pos;
        for _ in 0..3 {
            let step = model.step(&mut ball, Vec3::ZERO, 1.0, None);
            assert_eq!(step.distance, 0.0);
        }
        assert_eq!(ball.pos, stopped_at);
    }

    #[test]
    fn test_vertical_drift_is_removed() {
        let mut model = MotionModel::new(tuning());
        let mut ball = ball();
        ball.pos.y = 7.0;
        model.step(&mut ball, Vec3::new(1.0, 5.0, 0.0), 1.0, None);
        assert_eq!(ball.pos.y, 1.0);
        assert!(model.last_direction.y.abs() < EPS);
    }

    #[test]
    fn test_clamps_to_arena() {
        let mut model = MotionModel::new(tuning());
        let mut ball = ball();
        ball.pos.x = 9.95;
        for _ in 0..4 {
            model.step(&mut ball, Vec3::X, 1.0, Some(10.0));
        }
        assert_eq!(ball.pos.x, 10.0);
        // Pressing into the wall moves nothing, so nothing rolls
        let step = model.step(&mut ball, Vec3::X, 1.0, Some(10.0));
        assert_eq!(step.distance, 0.0);
        assert_eq!(step.rotation_delta, Quat::IDENTITY);
    }

    #[test]
    fn test_invalid_arena_limit_is_ignored() {
        let mut model = MotionModel::new(tuning());
        let mut ball = ball();
        model.step(&mut ball, Vec3::X, 1.0, Some(-40.0));
        model.step(&mut ball, Vec3::X, 1.0, Some(f32::NAN));
        assert!((ball.pos.x - 0.75).abs() < EPS);
    }

    #[test]
    fn test_rolling_angle_matches_distance() {
        // A quarter circumference is a quarter turn about Y × dir
        let radius = 0.5;
        let distance = std::f32::consts::TAU * radius / 4.0;
        let (axis, angle) = rolling_rotation(Vec3::X, distance, radius).to_axis_angle();
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert!((axis - Vec3::Y.cross(Vec3::X)).length() < 1e-4);
    }

    #[test]
    fn test_top_rolls_forward() {
        let q = rolling_rotation(Vec3::X, 0.1, 0.5);
        let top = q * Vec3::Y;
        assert!(top.x > 0.0);
    }
}
