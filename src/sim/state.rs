//! Game state and core simulation types
//!
//! `GameSession` aggregates everything a running game owns. Components operate
//! on its fields through `&mut` borrows; nothing lives in globals.

use glam::{Quat, Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::lifecycle::{GameStateMachine, Outcome};
use super::motion::MotionModel;
use super::registry::CollectibleRegistry;
use super::scoreboard::TierScore;
use crate::tuning::Tuning;

/// Position of a tier in the precedence chain (0 is collected first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TierId(pub usize);

impl TierId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The player's ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// World position; y is always the ground height
    pub pos: Vec3,
    /// Rolling radius (fixed for the session)
    pub radius: f32,
    /// Accumulated rolling rotation, display only
    pub orientation: Quat,
    /// Cumulative size multiplier from collections
    pub growth: f32,
}

impl Ball {
    pub fn new(ground_height: f32, radius: f32) -> Self {
        Self {
            pos: Vec3::new(0.0, ground_height, 0.0),
            radius,
            orientation: Quat::IDENTITY,
            growth: 1.0,
        }
    }

    /// Distance on the ground plane to a point given as (x, z)
    #[inline]
    pub fn planar_distance(&self, point: Vec2) -> f32 {
        crate::planar(self.pos).distance(point)
    }
}

/// Collection state of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemState {
    Active,
    Collected,
}

/// A collectible object placed in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectibleItem {
    pub id: u32,
    pub tier: TierId,
    /// Ground-plane position (x, z)
    pub pos: Vec2,
    pub collect_radius: f32,
    /// Visual scale of the model (scene collaborator only)
    pub scale: f32,
    pub state: ItemState,
}

/// Scene/HUD notifications produced by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Session entered play
    Started,
    /// An item exists in the scene
    ObjectAttached {
        id: u32,
        tier: TierId,
        pos: Vec2,
        scale: f32,
    },
    /// Ball moved this step
    BallTransform {
        pos: Vec3,
        rotation_delta: Quat,
        scale: f32,
    },
    /// An item was collected and should leave the scene
    ObjectRemoved { id: u32 },
    /// A tier's counters changed
    ScoreChanged(TierScore),
    /// The countdown ticked
    TimerTick { remaining: u32 },
    /// Session ended (emitted exactly once)
    Terminal(Outcome),
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Seed used to place items
    pub rng_state: RngState,
    pub tuning: Tuning,
    pub ball: Ball,
    pub motion: MotionModel,
    pub registry: CollectibleRegistry,
    pub clock: Clock,
    pub machine: GameStateMachine,
    /// Simulation steps run since start
    pub steps: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameSession {
    /// Create an idle session with items scattered by `seed`
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut session = Self::empty(tuning, seed);
        session.spawn_items();
        session
    }

    /// Create an idle session with no items placed (for hand-built layouts)
    pub fn empty(tuning: Tuning, seed: u64) -> Self {
        let registry = CollectibleRegistry::new(tuning.tiers.len());
        Self {
            rng_state: RngState::new(seed),
            ball: Ball::new(tuning.ground_height, tuning.ball_radius),
            motion: MotionModel::new(tuning.motion),
            registry,
            clock: Clock::new(tuning.session_seconds),
            machine: GameStateMachine::default(),
            steps: 0,
            tuning,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place an item of `tier` at `pos`, using the tier's radius and scale
    ///
    /// Returns the item id, or `None` when the tuning has no such tier or
    /// the session has already started.
    pub fn place_item(&mut self, tier: TierId, pos: Vec2) -> Option<u32> {
        if self.machine.started() {
            return None;
        }
        let spec = self.tuning.tiers.get(tier.index())?;
        let (collect_radius, scale) = (spec.collect_radius, spec.scale);
        let id = self.next_entity_id();
        self.registry.insert(CollectibleItem {
            id,
            tier,
            pos,
            collect_radius,
            scale,
            state: ItemState::Active,
        });
        Some(id)
    }

    /// Scatter every tier's items uniformly over the spawn square
    fn spawn_items(&mut self) {
        let mut rng = self.rng_state.to_rng();
        let extent = self.tuning.spawn_half_extent;
        for tier in 0..self.tuning.tiers.len() {
            for _ in 0..self.tuning.tiers[tier].count {
                let pos = if extent > 0.0 {
                    Vec2::new(
                        rng.random_range(-extent..extent),
                        rng.random_range(-extent..extent),
                    )
                } else {
                    Vec2::ZERO
                };
                self.place_item(TierId(tier), pos);
            }
        }
        log::info!(
            "Spawned {} items in {} tiers (seed {})",
            self.registry.active_total(),
            self.tuning.tiers.len(),
            self.rng_state.seed
        );
    }

    /// Visual scale of the ball model
    pub fn ball_scale(&self) -> f32 {
        self.tuning.ball_base_scale * self.ball.growth
    }

    /// Current outcome
    pub fn outcome(&self) -> Outcome {
        self.machine.outcome()
    }

    /// True once Won or Lost
    pub fn is_over(&self) -> bool {
        self.machine.is_terminal()
    }
}
