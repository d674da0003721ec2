//! Rolling Collector entry point
//!
//! The browser build is driven from JavaScript through `platform::web`. The
//! native binary runs a headless session with a simple autopilot, which is
//! handy for checking a tuning file end to end.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use glam::Vec3;

    use rolling_collector::consts::{CAMERA_OFFSET, SIM_DT};
    use rolling_collector::platform::init_logging;
    use rolling_collector::sim::{GameSession, InputState, LogHud, follow_view_direction};
    use rolling_collector::{Runner, Tuning};

    /// Headless rolling-collector session with an autopilot at the keys
    #[derive(Debug, Parser)]
    #[command(version, about)]
    struct Args {
        /// Seed for item placement
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// JSON tuning file (defaults are used when omitted)
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Stop after this much simulated time even if the session is running
        #[arg(long, default_value_t = 120.0)]
        max_seconds: f32,
        /// Print the default tuning as JSON and exit
        #[arg(long)]
        dump_tuning: bool,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("loading tuning from {}", path.display()))
    }

    /// Steer toward the nearest item of the tier that can be collected
    fn autopilot(session: &GameSession, view_dir: Vec3) -> InputState {
        let Some(tier) = session.registry.eligible_tier() else {
            return InputState::default();
        };
        let ball = session.ball.pos;
        let nearest = session.registry.active(tier).iter().min_by(|a, b| {
            session
                .ball
                .planar_distance(a.pos)
                .partial_cmp(&session.ball.planar_distance(b.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        match nearest {
            Some(item) => {
                let delta = Vec3::new(item.pos.x - ball.x, 0.0, item.pos.y - ball.z);
                InputState::toward(delta, view_dir)
            }
            None => InputState::default(),
        }
    }

    pub fn run() -> Result<()> {
        init_logging();
        let args = Args::parse();

        if args.dump_tuning {
            println!("{}", Tuning::default().to_json());
            return Ok(());
        }

        let tuning = load_tuning(args.tuning.as_ref())?;
        log::info!("Rolling Collector (native) starting, seed {}", args.seed);

        let view_dir = follow_view_direction(Vec3::from_array(CAMERA_OFFSET));
        let mut hud = LogHud::default();
        let mut runner = Runner::new(tuning, args.seed, &mut hud);
        runner.start(&mut hud);

        let mut simulated = 0.0;
        while !runner.session.is_over() && simulated < args.max_seconds {
            let keys = autopilot(&runner.session, view_dir);
            runner.set_keys(keys);
            runner.update(SIM_DT, view_dir, &mut hud);
            simulated += SIM_DT;
        }

        let session = &runner.session;
        log::info!(
            "Finished: {} after {} steps, ball growth {:.3}",
            session.outcome(),
            session.steps,
            session.ball.growth
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `platform::web::WebGame`, this is just to satisfy the compiler
}
