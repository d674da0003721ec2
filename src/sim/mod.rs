//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (tier, then insertion)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod input;
pub mod lifecycle;
pub mod motion;
pub mod observer;
pub mod registry;
pub mod scoreboard;
pub mod state;
pub mod tick;

pub use clock::Clock;
pub use collision::{Collection, resolve};
pub use input::{DirKey, InputState, follow_view_direction, intent};
pub use lifecycle::{GameStateMachine, Outcome};
pub use motion::{MotionModel, MotionStep, rolling_rotation};
pub use observer::{LogHud, NullObserver, SessionObserver};
pub use registry::CollectibleRegistry;
pub use scoreboard::{ScoreBoard, TierScore};
pub use state::{Ball, CollectibleItem, GameEvent, GameSession, ItemState, TierId};
pub use tick::{TickInput, announce, clock_tick, start, tick};
