//! Pixel Runner headless host
//!
//! Drives the simulation at 60 Hz with a simple autopilot, persisting the best
//! score to disk between runs. Browser hosts embed the library instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pixel_runner::persistence::FileStore;
    use pixel_runner::sim::{GameEvent, SimulationState, TickInput, format_score};
    use pixel_runner::{RunnerConfig, Session};

    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Give up on a run after this many frames (ten minutes of play)
    const MAX_FRAMES: u32 = 60 * 600;
    /// Jump when the next ground obstacle is this close ahead
    const JUMP_LEAD: f32 = 70.0;

    pub fn run() {
        pixel_runner::init_logging();

        let config = match std::env::args().nth(1) {
            Some(path) => RunnerConfig::load(path),
            None => RunnerConfig::default(),
        };
        let runs: u32 = std::env::var("PIXEL_RUNNER_RUNS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);
        let best_path = std::env::var("PIXEL_RUNNER_BEST")
            .unwrap_or_else(|_| "pixel_runner_best.txt".to_string());

        log::info!("Pixel Runner (headless) starting...");
        let store = FileStore::new(best_path);
        log::info!("Best score file: {}", store.path().display());
        let mut session = Session::new(config, rand::random(), store);

        for run in 1..=runs {
            let mut frames = 0;
            while !session.is_over() && frames < MAX_FRAMES {
                let input = TickInput {
                    jump: autopilot(session.state()),
                    pause: false,
                };
                for event in session.tick(input, FRAME_MS) {
                    match event {
                        GameEvent::MilestoneReached(m) => log::info!("Run {}: milestone {}", run, m),
                        GameEvent::PowerUpActivated(kind) => log::debug!("Run {}: {:?}", run, kind),
                        _ => {}
                    }
                }
                frames += 1;
            }

            let snapshot = session.snapshot();
            println!(
                "run {} score {} coins {} best {}",
                run,
                format_score(snapshot.score.score),
                snapshot.score.coins,
                format_score(session.state().score.display_best()),
            );
            match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => log::debug!("Final snapshot:\n{}", json),
                Err(e) => log::warn!("Failed to serialize snapshot: {}", e),
            }

            if run < runs {
                session.restart(rand::random());
            }
        }
    }

    /// Jump at the nearest obstacle that sits in the player's lane
    fn autopilot(state: &SimulationState) -> bool {
        if !state.player.is_grounded() {
            return false;
        }
        let player_x = state.player.pos.x;
        state
            .obstacles
            .obstacles
            .iter()
            .filter(|o| o.alive && !o.kind.is_airborne())
            .map(|o| o.bounds().min.x - player_x)
            .any(|ahead| ahead > 0.0 && ahead < JUMP_LEAD)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `pixel_runner::Session` directly
}
