//! Directional key state and camera-relative movement intent
//!
//! Steering is relative to where the viewer looks, not to world axes: "up"
//! always rolls the ball away from the camera.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::flatten;

/// The four directional keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirKey {
    Forward,
    Back,
    Left,
    Right,
}

impl DirKey {
    pub const ALL: [DirKey; 4] = [DirKey::Forward, DirKey::Back, DirKey::Left, DirKey::Right];

    /// Map a browser `KeyboardEvent.key` value; anything else is ignored
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(DirKey::Forward),
            "ArrowDown" => Some(DirKey::Back),
            "ArrowLeft" => Some(DirKey::Left),
            "ArrowRight" => Some(DirKey::Right),
            _ => None,
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            DirKey::Forward => 1,
            DirKey::Back => 2,
            DirKey::Left => 4,
            DirKey::Right => 8,
        }
    }
}

/// Set of currently held directional keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: u8,
}

impl InputState {
    pub fn press(&mut self, key: DirKey) {
        self.held |= key.bit();
    }

    pub fn release(&mut self, key: DirKey) {
        self.held &= !key.bit();
    }

    pub fn is_held(&self, key: DirKey) -> bool {
        self.held & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.held == 0
    }

    pub fn clear(&mut self) {
        self.held = 0;
    }

    /// Apply a raw (key name, pressed) event; unknown keys are ignored
    ///
    /// Returns whether the key was one of ours.
    pub fn apply_key_event(&mut self, key: &str, pressed: bool) -> bool {
        let Some(key) = DirKey::from_key_name(key) else {
            return false;
        };
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
        true
    }

    pub fn with(mut self, key: DirKey) -> Self {
        self.press(key);
        self
    }

    /// Keys that roll the ball toward `delta` (world x/z offset) for a viewer
    /// looking along `view_dir`
    ///
    /// Each axis gets a key only when its share of the offset is significant,
    /// so a target straight ahead does not produce a diagonal wobble.
    pub fn toward(delta: Vec3, view_dir: Vec3) -> Self {
        let mut keys = InputState::default();
        let (forward, right) = match basis(view_dir) {
            Some(b) => b,
            None => return keys,
        };
        let delta = flatten(delta);
        let len = delta.length();
        if len < f32::EPSILON {
            return keys;
        }
        let along = delta.dot(forward) / len;
        let across = delta.dot(right) / len;
        const DEAD_ZONE: f32 = 0.38;
        if along > DEAD_ZONE {
            keys.press(DirKey::Forward);
        } else if along < -DEAD_ZONE {
            keys.press(DirKey::Back);
        }
        if across > DEAD_ZONE {
            keys.press(DirKey::Right);
        } else if across < -DEAD_ZONE {
            keys.press(DirKey::Left);
        }
        keys
    }
}

/// Viewing direction of a follow camera that sits at `offset` from the ball
/// and looks at it
///
/// Falls back to looking straight down -Z when the offset is zero.
pub fn follow_view_direction(offset: Vec3) -> Vec3 {
    let dir = (-offset).normalize_or_zero();
    if dir == Vec3::ZERO {
        Vec3::NEG_Z
    } else {
        dir
    }
}

/// Horizontal (forward, right) unit vectors for a viewing direction
///
/// `None` when the viewer looks straight up or down.
fn basis(view_dir: Vec3) -> Option<(Vec3, Vec3)> {
    let forward = flatten(view_dir).normalize_or_zero();
    if forward == Vec3::ZERO {
        return None;
    }
    let right = view_dir.cross(Vec3::Y).normalize_or_zero();
    Some((forward, right))
}

/// Normalized horizontal movement intent for the held keys
///
/// Forward/back follow the viewing direction projected onto the ground;
/// left is `Y × view`, right is `view × Y`. Held keys are summed before
/// normalizing, so diagonals are unit length too. Zero means "no input".
pub fn intent(keys: InputState, view_dir: Vec3) -> Vec3 {
    if keys.is_empty() {
        return Vec3::ZERO;
    }
    let Some((forward, right)) = basis(view_dir) else {
        return Vec3::ZERO;
    };
    let left = -right;

    let mut sum = Vec3::ZERO;
    for key in DirKey::ALL {
        if !keys.is_held(key) {
            continue;
        }
        sum += match key {
            DirKey::Forward => forward,
            DirKey::Back => -forward,
            DirKey::Left => left,
            DirKey::Right => right,
        };
    }
    flatten(sum).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn view() -> Vec3 {
        // Camera looking down -Z, tilted toward the floor
        Vec3::new(0.0, -1.0, -1.0).normalize()
    }

    #[test]
    fn test_no_keys_is_zero() {
        assert_eq!(intent(InputState::default(), view()), Vec3::ZERO);
    }

    #[test]
    fn test_forward_follows_camera() {
        let keys = InputState::default().with(DirKey::Forward);
        let dir = intent(keys, view());
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn test_left_and_right_are_camera_relative() {
        let left = intent(InputState::default().with(DirKey::Left), view());
        let right = intent(InputState::default().with(DirKey::Right), view());
        // Looking down -Z, left is -X
        assert!((left - Vec3::new(-1.0, 0.0, 0.0)).length() < EPS);
        assert!((right - Vec3::new(1.0, 0.0, 0.0)).length() < EPS);
        // Left matches Y × view
        let expected = Vec3::Y.cross(view()).normalize();
        assert!((left - expected).length() < EPS);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let keys = InputState::default()
            .with(DirKey::Forward)
            .with(DirKey::Right);
        let dir = intent(keys, view());
        assert!((dir.length() - 1.0).abs() < EPS);
        assert!(dir.x > 0.0 && dir.z < 0.0);
        assert_eq!(dir.y, 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let keys = InputState::default().with(DirKey::Left).with(DirKey::Right);
        assert_eq!(intent(keys, view()), Vec3::ZERO);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut keys = InputState::default();
        assert!(!keys.apply_key_event("q", true));
        assert!(keys.is_empty());
        assert!(keys.apply_key_event("ArrowUp", true));
        assert!(keys.is_held(DirKey::Forward));
        assert!(keys.apply_key_event("ArrowUp", false));
        assert!(keys.is_empty());
    }

    #[test]
    fn test_toward_picks_matching_keys() {
        // Target ahead and to the right of a camera looking down -Z
        let keys = InputState::toward(Vec3::new(5.0, 0.0, -5.0), view());
        assert!(keys.is_held(DirKey::Forward));
        assert!(keys.is_held(DirKey::Right));

        // Target almost directly behind
        let keys = InputState::toward(Vec3::new(0.1, 0.0, 8.0), view());
        assert!(keys.is_held(DirKey::Back));
        assert!(!keys.is_held(DirKey::Left) && !keys.is_held(DirKey::Right));
    }

    #[test]
    fn test_follow_direction_points_at_ball() {
        let dir = follow_view_direction(Vec3::new(4.0, 4.0, 4.0));
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.x < 0.0 && dir.y < 0.0 && dir.z < 0.0);
        assert_eq!(follow_view_direction(Vec3::ZERO), Vec3::NEG_Z);
    }

    #[test]
    fn test_forward_with_default_rig() {
        // Camera at (4, 4, 4): "up" rolls the ball toward -x/-z
        let view = follow_view_direction(Vec3::new(4.0, 4.0, 4.0));
        let dir = intent(InputState::default().with(DirKey::Forward), view);
        let expected = Vec3::new(-1.0, 0.0, -1.0).normalize();
        assert!((dir - expected).length() < EPS);
    }
}
