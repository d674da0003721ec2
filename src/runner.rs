//! Fixed-step scheduling of frames and clock ticks
//!
//! The frame loop and the countdown are separate triggers: frames run at
//! `SIM_DT`, the clock at the tuning's `clock_interval`. Either can also be
//! driven directly ("tick now") when the host owns the timers, as the
//! browser does with `requestAnimationFrame` and `setInterval`.

use glam::Vec3;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{self, GameSession, InputState, SessionObserver, TickInput};
use crate::tuning::Tuning;

/// Accumulates real time and reports how many fixed periods became due
#[derive(Debug, Clone)]
pub struct FixedScheduler {
    period: f32,
    accumulator: f32,
    max_catch_up: u32,
}

impl FixedScheduler {
    pub fn new(period: f32, max_catch_up: u32) -> Self {
        Self {
            period,
            accumulator: 0.0,
            max_catch_up: max_catch_up.max(1),
        }
    }

    /// Add `dt` seconds and return the number of periods now due
    ///
    /// At most `max_catch_up` periods run per call; whole periods beyond that
    /// are dropped so a long stall cannot snowball.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !(dt > 0.0) || !(self.period > 0.0) {
            return 0;
        }
        self.accumulator += dt;
        let mut due = 0;
        while self.accumulator >= self.period && due < self.max_catch_up {
            self.accumulator -= self.period;
            due += 1;
        }
        if self.accumulator >= self.period {
            self.accumulator %= self.period;
        }
        due
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}

/// A session plus the input and timers that drive it
pub struct Runner {
    pub session: GameSession,
    keys: InputState,
    frames: FixedScheduler,
    clock: FixedScheduler,
}

impl Runner {
    /// Create a session and announce its items to `observer`
    pub fn new(tuning: Tuning, seed: u64, observer: &mut dyn SessionObserver) -> Self {
        let clock = FixedScheduler::new(tuning.clock_interval, tuning.session_seconds);
        let session = GameSession::new(tuning, seed);
        sim::announce(&session, observer);
        Self {
            session,
            keys: InputState::default(),
            frames: FixedScheduler::new(SIM_DT, MAX_SUBSTEPS),
            clock,
        }
    }

    /// Wrap an already built session (hand-placed layouts, tests)
    pub fn with_session(session: GameSession) -> Self {
        let clock = FixedScheduler::new(
            session.tuning.clock_interval,
            session.tuning.session_seconds,
        );
        Self {
            session,
            keys: InputState::default(),
            frames: FixedScheduler::new(SIM_DT, MAX_SUBSTEPS),
            clock,
        }
    }

    /// Browser-style key down; unknown keys and post-game input are ignored
    pub fn key_down(&mut self, key: &str) -> bool {
        !self.session.is_over() && self.keys.apply_key_event(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        !self.session.is_over() && self.keys.apply_key_event(key, false)
    }

    pub fn keys(&self) -> InputState {
        self.keys
    }

    pub fn set_keys(&mut self, keys: InputState) {
        self.keys = keys;
    }

    pub fn start(&mut self, observer: &mut dyn SessionObserver) -> bool {
        let started = sim::start(&mut self.session, observer);
        if started {
            self.clock.reset();
        }
        started
    }

    /// Run one simulation step right now
    pub fn step_now(&mut self, view_dir: Vec3, observer: &mut dyn SessionObserver) -> bool {
        let input = TickInput {
            keys: self.keys,
            view_dir,
        };
        sim::tick(&mut self.session, &input, observer)
    }

    /// Run one clock tick right now
    pub fn clock_tick_now(&mut self, observer: &mut dyn SessionObserver) {
        sim::clock_tick(&mut self.session, observer);
    }

    /// Run the simulation steps that became due during `dt` seconds
    pub fn advance_frames(
        &mut self,
        dt: f32,
        view_dir: Vec3,
        observer: &mut dyn SessionObserver,
    ) -> u32 {
        let due = self.frames.advance(dt);
        for _ in 0..due {
            self.step_now(view_dir, observer);
        }
        due
    }

    /// Run the clock ticks that became due during `dt` seconds
    ///
    /// Time spent idle or after the end never accumulates.
    pub fn advance_clock(&mut self, dt: f32, observer: &mut dyn SessionObserver) -> u32 {
        if !self.session.machine.is_running() {
            return 0;
        }
        let due = self.clock.advance(dt);
        for _ in 0..due {
            self.clock_tick_now(observer);
        }
        due
    }

    /// Advance both triggers by `dt` seconds of real time
    ///
    /// Returns whether the scene should be rendered this frame.
    pub fn update(&mut self, dt: f32, view_dir: Vec3, observer: &mut dyn SessionObserver) -> bool {
        self.advance_frames(dt, view_dir, observer);
        self.advance_clock(dt, observer);
        self.should_render()
    }

    /// Rendering is suppressed once the session has ended
    pub fn should_render(&self) -> bool {
        !self.session.is_over()
    }
}
