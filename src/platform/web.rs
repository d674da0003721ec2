//! wasm-bindgen bridge for the browser build
//!
//! JavaScript owns the scene (three.js), the HUD elements and the timers.
//! It forwards key events, calls `frame` from `requestAnimationFrame` and
//! `clock_tick` from `setInterval`, then drains the queued events as JSON.

use glam::Vec3;
use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::runner::Runner;
use crate::sim::GameEvent;
use crate::tuning::Tuning;

#[wasm_bindgen]
pub struct WebGame {
    runner: Runner,
    events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a session; `tuning_json` overrides the default balance
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<WebGame, JsValue> {
        super::init_logging();
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("New session with seed {seed}");

        let mut events: Vec<GameEvent> = Vec::new();
        let runner = Runner::new(tuning, seed, &mut events);
        Ok(Self { runner, events })
    }

    /// The single session-control entry point
    pub fn start(&mut self) -> bool {
        self.runner.start(&mut self.events)
    }

    pub fn key_down(&mut self, event: &KeyboardEvent) {
        if self.runner.key_down(&event.key()) {
            // Keep arrow keys from scrolling the page
            event.prevent_default();
        }
    }

    pub fn key_up(&mut self, event: &KeyboardEvent) {
        if self.runner.key_up(&event.key()) {
            event.prevent_default();
        }
    }

    /// Per-frame update with the camera's world direction
    ///
    /// Returns false once the scene should no longer be rendered.
    pub fn frame(&mut self, dt: f32, view_x: f32, view_y: f32, view_z: f32) -> bool {
        let view_dir = Vec3::new(view_x, view_y, view_z);
        self.runner.advance_frames(dt, view_dir, &mut self.events);
        self.runner.should_render()
    }

    /// Countdown trigger, called every `clock_interval_ms`
    pub fn clock_tick(&mut self) {
        self.runner.clock_tick_now(&mut self.events);
    }

    pub fn clock_interval_ms(&self) -> u32 {
        (self.runner.session.tuning.clock_interval * 1000.0).round() as u32
    }

    pub fn is_over(&self) -> bool {
        self.runner.session.is_over()
    }

    pub fn banner(&self) -> String {
        self.runner.session.outcome().banner().to_string()
    }

    /// Ball position as [x, y, z]
    pub fn ball_position(&self) -> Vec<f32> {
        self.runner.session.ball.pos.to_array().to_vec()
    }

    /// Accumulated ball orientation as [x, y, z, w]
    pub fn ball_orientation(&self) -> Vec<f32> {
        self.runner.session.ball.orientation.to_array().to_vec()
    }

    pub fn ball_scale(&self) -> f32 {
        self.runner.session.ball_scale()
    }

    /// Events queued since the last call, as a JSON array
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        let json = serde_json::to_string(&self.events)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.events.clear();
        Ok(json)
    }
}
