//! Notification interface for the scene and HUD collaborators
//!
//! The simulation never touches the DOM or a scene graph. It calls these
//! hooks and whoever renders subscribes by implementing the trait.

use glam::{Quat, Vec3};

use super::lifecycle::Outcome;
use super::scoreboard::TierScore;
use super::state::{CollectibleItem, GameEvent};

/// Receives simulation side effects. Every hook defaults to a no-op.
pub trait SessionObserver {
    /// Session left the idle state
    fn on_started(&mut self) {}

    /// An item exists and should be placed in the scene
    fn on_object_attached(&mut self, _item: &CollectibleItem) {}

    /// New ball transform for this step
    fn on_ball_transform(&mut self, _pos: Vec3, _rotation_delta: Quat, _scale: f32) {}

    /// An item was collected and should leave the scene
    fn on_object_removed(&mut self, _id: u32) {}

    /// HUD text for a tier needs refreshing
    fn on_score_changed(&mut self, _score: &TierScore) {}

    /// HUD timer needs refreshing
    fn on_timer_tick(&mut self, _remaining: u32) {}

    /// Session ended; called exactly once per session
    fn on_terminal(&mut self, _outcome: Outcome) {}
}

/// Discards everything
pub struct NullObserver;

impl SessionObserver for NullObserver {}

/// Queue events for a collaborator that polls (tests, the wasm bridge)
impl SessionObserver for Vec<GameEvent> {
    fn on_started(&mut self) {
        self.push(GameEvent::Started);
    }

    fn on_object_attached(&mut self, item: &CollectibleItem) {
        self.push(GameEvent::ObjectAttached {
            id: item.id,
            tier: item.tier,
            pos: item.pos,
            scale: item.scale,
        });
    }

    fn on_ball_transform(&mut self, pos: Vec3, rotation_delta: Quat, scale: f32) {
        self.push(GameEvent::BallTransform {
            pos,
            rotation_delta,
            scale,
        });
    }

    fn on_object_removed(&mut self, id: u32) {
        self.push(GameEvent::ObjectRemoved { id });
    }

    fn on_score_changed(&mut self, score: &TierScore) {
        self.push(GameEvent::ScoreChanged(score.clone()));
    }

    fn on_timer_tick(&mut self, remaining: u32) {
        self.push(GameEvent::TimerTick { remaining });
    }

    fn on_terminal(&mut self, outcome: Outcome) {
        self.push(GameEvent::Terminal(outcome));
    }
}

/// HUD that writes through the `log` facade (headless runs)
#[derive(Debug, Default)]
pub struct LogHud {
    pub collected: u32,
}

impl SessionObserver for LogHud {
    fn on_started(&mut self) {
        log::info!("Go!");
    }

    fn on_object_removed(&mut self, _id: u32) {
        self.collected += 1;
    }

    fn on_score_changed(&mut self, score: &TierScore) {
        log::info!("{score}");
    }

    fn on_timer_tick(&mut self, remaining: u32) {
        if remaining.is_multiple_of(10) || remaining <= 5 {
            log::info!("Time: {remaining}");
        }
    }

    fn on_terminal(&mut self, outcome: Outcome) {
        log::info!("{} ({} items collected)", outcome.banner(), self.collected);
    }
}
