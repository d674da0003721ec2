//! Rolling Collector - roll a ball around a room and pick everything up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collection, clock, outcome)
//! - `tuning`: Data-driven game balance
//! - `runner`: Fixed-step scheduling of frames and clock ticks
//! - `platform`: Browser/native platform abstraction

pub mod platform;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use runner::Runner;
pub use tuning::{TierSpec, Tuning, TuningError};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Session length in clock units (seconds)
    pub const SESSION_SECONDS: u32 = 60;
    /// Real time between clock ticks (seconds)
    pub const CLOCK_INTERVAL: f32 = 1.0;

    /// Height the ball rests at above the floor plane
    pub const GROUND_HEIGHT: f32 = 1.0;
    /// Ball radius used for rolling (model radius 0.5 at 0.01 scale)
    pub const BALL_RADIUS: f32 = 0.5 * 0.01;
    /// Visual scale of the ball model before any growth
    pub const BALL_BASE_SCALE: f32 = 0.007;

    /// Items spawn uniformly in [-SPAWN_HALF_EXTENT, SPAWN_HALF_EXTENT] on x and z
    pub const SPAWN_HALF_EXTENT: f32 = 30.0;
    /// Ball x/z are clamped to [-ARENA_LIMIT, ARENA_LIMIT]
    pub const ARENA_LIMIT: f32 = 40.0;

    /// Speed gained per step while a direction is held
    pub const ACCELERATION: f32 = 0.05;
    /// Speed lost per step while coasting
    pub const DECELERATION: f32 = 0.025;
    /// Speed cap (world units per step)
    pub const MAX_SPEED: f32 = 0.5;

    /// Camera offset from the ball in the follow rig
    pub const CAMERA_OFFSET: [f32; 3] = [4.0, 4.0, 4.0];
}

/// Drop the vertical component of a world-space vector
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Ground-plane (x, z) coordinates of a world-space point
#[inline]
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}
