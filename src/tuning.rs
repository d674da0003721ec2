//! Data-driven game balance
//!
//! Everything that differed between iterations of the game (tier set, radii,
//! growth rates, motion feel) is data here rather than code. Load a JSON file
//! to try a different balance without rebuilding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// One tier of collectible items
///
/// Tier order is list order: index 0 must be cleared before index 1 becomes
/// collectible, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSpec {
    /// Display name used in HUD text
    pub name: String,
    /// Number of items spawned at session start
    pub count: u32,
    /// Planar distance below which the ball picks an item up
    pub collect_radius: f32,
    /// Ball growth multiplier applied per item collected
    pub growth: f32,
    /// Visual scale of the item model
    #[serde(default = "default_item_scale")]
    pub scale: f32,
}

fn default_item_scale() -> f32 {
    1.0
}

impl TierSpec {
    pub fn new(name: &str, count: u32, collect_radius: f32, growth: f32, scale: f32) -> Self {
        Self {
            name: name.to_string(),
            count,
            collect_radius,
            growth,
            scale,
        }
    }
}

/// Acceleration/coasting parameters, all in world units per step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionTuning {
    pub acceleration: f32,
    pub deceleration: f32,
    pub max_speed: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            deceleration: DECELERATION,
            max_speed: MAX_SPEED,
        }
    }
}

/// Complete balance sheet for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Countdown length in clock ticks
    pub session_seconds: u32,
    /// Real seconds per clock tick
    pub clock_interval: f32,
    /// Ball centre height (y is pinned here every step)
    pub ground_height: f32,
    /// Ball radius used for rolling rotation
    pub ball_radius: f32,
    /// Visual scale of the ball before growth
    pub ball_base_scale: f32,
    /// Optional square arena; `None` leaves the ball unclamped
    pub arena_limit: Option<f32>,
    /// Items spawn in [-spawn_half_extent, spawn_half_extent] on x and z
    pub spawn_half_extent: f32,
    pub motion: MotionTuning,
    /// Ordered tier chain, lowest first
    pub tiers: Vec<TierSpec>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            session_seconds: SESSION_SECONDS,
            clock_interval: CLOCK_INTERVAL,
            ground_height: GROUND_HEIGHT,
            ball_radius: BALL_RADIUS,
            ball_base_scale: BALL_BASE_SCALE,
            arena_limit: Some(ARENA_LIMIT),
            spawn_half_extent: SPAWN_HALF_EXTENT,
            motion: MotionTuning::default(),
            tiers: vec![
                TierSpec::new("Pen Stands", 5, 5.0, 1.06, 10.0),
                TierSpec::new("Lamps", 5, 5.0, 1.06, 5.0),
                TierSpec::new("Chairs", 5, 10.0, 1.09, 5.0),
            ],
        }
    }
}

/// Rejected tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("session length must be at least one tick")]
    EmptySession,
    #[error("clock interval must be positive, got {0}")]
    ClockInterval(f32),
    #[error("ball radius must be positive, got {0}")]
    BallRadius(f32),
    #[error("motion parameters must be non-negative and max speed positive")]
    Motion,
    #[error("arena limit must be positive and finite, got {0}")]
    ArenaLimit(f32),
    #[error("spawn half extent must be non-negative and finite, got {0}")]
    SpawnExtent(f32),
    #[error("arena limit {limit} does not cover the spawn area (half extent {spawn})")]
    ArenaTooSmall { limit: f32, spawn: f32 },
    #[error("tier {tier} ({name}): collect radius must be positive, got {radius}")]
    CollectRadius { tier: usize, name: String, radius: f32 },
    #[error("tier {tier} ({name}): growth must be greater than 1, got {growth}")]
    Growth { tier: usize, name: String, growth: f32 },
}

impl Tuning {
    /// Parse and validate a JSON balance sheet
    ///
    /// Missing fields fall back to the defaults, so a file may override only
    /// the tiers or only the motion feel.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing out a starting point)
    pub fn to_json(&self) -> String {
        // Plain data with string keys: serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.session_seconds == 0 {
            return Err(TuningError::EmptySession);
        }
        if !(self.clock_interval > 0.0) {
            return Err(TuningError::ClockInterval(self.clock_interval));
        }
        if !(self.ball_radius > 0.0) {
            return Err(TuningError::BallRadius(self.ball_radius));
        }
        let m = &self.motion;
        if m.acceleration < 0.0 || m.deceleration < 0.0 || !(m.max_speed > 0.0) {
            return Err(TuningError::Motion);
        }
        if !(self.spawn_half_extent.is_finite() && self.spawn_half_extent >= 0.0) {
            return Err(TuningError::SpawnExtent(self.spawn_half_extent));
        }
        if let Some(limit) = self.arena_limit {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(TuningError::ArenaLimit(limit));
            }
            if limit < self.spawn_half_extent {
                return Err(TuningError::ArenaTooSmall {
                    limit,
                    spawn: self.spawn_half_extent,
                });
            }
        }
        for (tier, spec) in self.tiers.iter().enumerate() {
            if !(spec.collect_radius > 0.0) {
                return Err(TuningError::CollectRadius {
                    tier,
                    name: spec.name.clone(),
                    radius: spec.collect_radius,
                });
            }
            if !(spec.growth > 1.0) {
                return Err(TuningError::Growth {
                    tier,
                    name: spec.name.clone(),
                    growth: spec.growth,
                });
            }
        }
        Ok(())
    }

    /// Total number of items across every tier
    pub fn total_items(&self) -> u32 {
        self.tiers.iter().map(|t| t.count).sum()
    }
}
