//! Session lifecycle: idle → in progress → won/lost
//!
//! The state machine is the only writer of the outcome. Won and Lost are
//! terminal; every attempt to leave them is a silent no-op.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::registry::CollectibleRegistry;

/// How the session ended (or that it has not)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    /// Every tier collected
    Won,
    /// Time ran out first
    Lost,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// Banner text for the HUD
    pub fn banner(self) -> &'static str {
        match self {
            Outcome::InProgress => "",
            Outcome::Won => "You Win!",
            Outcome::Lost => "Time's Up!",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::InProgress => "in progress",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateMachine {
    started: bool,
    outcome: Outcome,
}

impl GameStateMachine {
    /// Leave the idle state. Returns true only on the first call.
    pub fn start(&mut self) -> bool {
        if self.started || self.outcome.is_terminal() {
            return false;
        }
        self.started = true;
        true
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Motion, collection and the clock only run in this state
    pub fn is_running(&self) -> bool {
        self.started && !self.outcome.is_terminal()
    }

    /// Check the termination conditions
    ///
    /// Returns the new outcome only when this call made the transition, so
    /// the caller emits the terminal notification exactly once. A cleared
    /// registry wins even if the clock has also hit zero.
    pub fn evaluate(&mut self, registry: &CollectibleRegistry, clock: &Clock) -> Option<Outcome> {
        if !self.is_running() {
            return None;
        }
        let next = if registry.is_cleared() {
            Outcome::Won
        } else if clock.expired() {
            Outcome::Lost
        } else {
            return None;
        };
        self.outcome = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{CollectibleItem, ItemState, TierId};
    use glam::Vec2;

    fn one_item() -> CollectibleRegistry {
        let mut registry = CollectibleRegistry::new(1);
        registry.insert(CollectibleItem {
            id: 1,
            tier: TierId(0),
            pos: Vec2::ZERO,
            collect_radius: 1.0,
            scale: 1.0,
            state: ItemState::Active,
        });
        registry
    }

    #[test]
    fn test_idle_never_transitions() {
        let mut machine = GameStateMachine::default();
        let clock = Clock::new(0);
        assert_eq!(machine.evaluate(&one_item(), &clock), None);
        assert_eq!(machine.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_start_once() {
        let mut machine = GameStateMachine::default();
        assert!(machine.start());
        assert!(!machine.start());
        assert!(machine.is_running());
    }

    #[test]
    fn test_lost_on_expiry() {
        let mut machine = GameStateMachine::default();
        machine.start();
        let mut clock = Clock::new(1);
        let registry = one_item();
        assert_eq!(machine.evaluate(&registry, &clock), None);
        clock.tick();
        assert_eq!(machine.evaluate(&registry, &clock), Some(Outcome::Lost));
        // Terminal: no second notification, no change
        assert_eq!(machine.evaluate(&CollectibleRegistry::new(1), &clock), None);
        assert_eq!(machine.outcome(), Outcome::Lost);
        assert!(!machine.is_running());
        assert!(!machine.start());
    }

    #[test]
    fn test_won_when_cleared() {
        let mut machine = GameStateMachine::default();
        machine.start();
        let mut registry = one_item();
        registry.take(TierId(0), 0);
        let clock = Clock::new(10);
        assert_eq!(machine.evaluate(&registry, &clock), Some(Outcome::Won));
        assert_eq!(machine.evaluate(&registry, &Clock::new(0)), None);
        assert_eq!(machine.outcome(), Outcome::Won);
    }

    #[test]
    fn test_banner_text() {
        assert_eq!(Outcome::Won.banner(), "You Win!");
        assert_eq!(Outcome::Lost.banner(), "Time's Up!");
        assert_eq!(Outcome::Lost.to_string(), "lost");
    }
}
