//! Simulation step and clock tick
//!
//! Two independent entry points drive a session: `tick` once per frame and
//! `clock_tick` once per clock interval. Both are no-ops before `start` and
//! after the session ends.

use glam::Vec3;

use super::collision;
use super::input::{InputState, follow_view_direction, intent};
use super::lifecycle::Outcome;
use super::observer::SessionObserver;
use super::scoreboard::ScoreBoard;
use super::state::GameSession;

/// Input for a single step
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Directional keys held this step
    pub keys: InputState,
    /// Where the viewer is looking (world space)
    pub view_dir: Vec3,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            keys: InputState::default(),
            view_dir: follow_view_direction(Vec3::from_array(crate::consts::CAMERA_OFFSET)),
        }
    }
}

/// Tell the scene about every item and the HUD about the initial counters
///
/// Call once after creating a session, before the first frame.
pub fn announce(session: &GameSession, observer: &mut dyn SessionObserver) {
    for item in session.registry.iter_active() {
        observer.on_object_attached(item);
    }
    for score in ScoreBoard::scores(&session.registry, &session.tuning.tiers) {
        observer.on_score_changed(&score);
    }
    observer.on_timer_tick(session.clock.remaining);
    observer.on_ball_transform(
        session.ball.pos,
        glam::Quat::IDENTITY,
        session.ball_scale(),
    );
}

/// Begin play. Only the first call has any effect.
pub fn start(session: &mut GameSession, observer: &mut dyn SessionObserver) -> bool {
    if !session.machine.start() {
        return false;
    }
    log::info!(
        "Session started: {} items, {} seconds",
        session.registry.active_total(),
        session.clock.remaining
    );
    observer.on_started();

    // A layout with nothing to collect is won on the spot
    check_outcome(session, observer);
    true
}

/// Advance the game state by one frame
///
/// Reads the held keys, moves the ball, collects at most one item and
/// checks for a win. Returns whether the frame changed anything the scene
/// should render.
pub fn tick(
    session: &mut GameSession,
    input: &TickInput,
    observer: &mut dyn SessionObserver,
) -> bool {
    if !session.machine.is_running() {
        return false;
    }
    session.steps += 1;

    let intent = intent(input.keys, input.view_dir);
    let arena_limit = session.tuning.arena_limit;
    let ground = session.tuning.ground_height;
    let motion = session
        .motion
        .step(&mut session.ball, intent, ground, arena_limit);

    let collection =
        collision::resolve(&mut session.ball, &mut session.registry, &session.tuning.tiers);

    observer.on_ball_transform(session.ball.pos, motion.rotation_delta, session.ball_scale());

    if let Some(collection) = collection {
        let tier = collection.item.tier;
        observer.on_object_removed(collection.item.id);
        let score = ScoreBoard::score(&session.registry, &session.tuning.tiers, tier);
        if collection.tier_completed {
            log::info!("{} completed", score.name);
        }
        observer.on_score_changed(&score);

        // Win is detected on the collection itself, not on the next tick
        check_outcome(session, observer);
    }
    true
}

/// Count the clock down by one unit
pub fn clock_tick(session: &mut GameSession, observer: &mut dyn SessionObserver) {
    if !session.machine.is_running() {
        return;
    }
    if session.clock.tick() {
        observer.on_timer_tick(session.clock.remaining);
    }
    check_outcome(session, observer);
}

fn check_outcome(session: &mut GameSession, observer: &mut dyn SessionObserver) -> Option<Outcome> {
    let outcome = session.machine.evaluate(&session.registry, &session.clock)?;
    log::info!(
        "Session {} after {}s with {} items left (growth {:.3})",
        outcome,
        session.clock.elapsed,
        session.registry.active_total(),
        session.ball.growth
    );
    observer.on_terminal(outcome);
    Some(outcome)
}
