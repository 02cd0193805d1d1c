//! Geo Survivor entry point
//!
//! The browser build is driven from JavaScript through `startGame`. The native
//! binary runs a headless session with a simple autopilot, which is handy for
//! checking balance changes:
//!
//! ```text
//! geo-survivor [tuning.json] [seed] [low|medium|high]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::rc::Rc;

    use geo_survivor::renderer::MeshSurface;
    use geo_survivor::settings::QualityPreset;
    use geo_survivor::sim::{Arena, Control, GameState};
    use geo_survivor::{Session, Settings, Tuning};
    use glam::Vec2;

    const ARENA_WIDTH: f32 = 800.0;
    const ARENA_HEIGHT: f32 = 600.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after five simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 5;
    /// Frames between autopilot shots
    const FIRE_EVERY: u64 = 8;
    /// Enemies closer than this make the autopilot back away
    const DANGER_RADIUS: f32 = 160.0;

    fn load_tuning(path: Option<&str>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        let loaded = std::fs::read_to_string(path)
            .map_err(|err| err.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|err| err.to_string()));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(err) => {
                log::error!("Failed to load tuning from {}: {}; using defaults", path, err);
                Tuning::default()
            }
        }
    }

    /// Nearest enemy to the player, if any
    fn nearest_enemy(state: &GameState) -> Option<Vec2> {
        let player = state.player.as_ref()?;
        state
            .enemies
            .iter()
            .map(|e| e.pos)
            .min_by(|a, b| {
                a.distance_squared(player.pos)
                    .total_cmp(&b.distance_squared(player.pos))
            })
    }

    /// Shoot at the nearest enemy and back away when it gets close
    fn autopilot(session: &mut Session) {
        let frame = session.state().frame;
        let player_pos = session.state().player.as_ref().map(|p| p.pos);
        let target = nearest_enemy(session.state());

        let input = session.input_mut();
        input.release_all();

        let (Some(player_pos), Some(target)) = (player_pos, target) else {
            return;
        };

        if frame % FIRE_EVERY == 0 {
            input.push_fire(target);
        }

        let away = player_pos - target;
        if away.length() < DANGER_RADIUS {
            input.set_pressed(Control::Right, away.x > 0.0);
            input.set_pressed(Control::Left, away.x < 0.0);
            input.set_pressed(Control::Down, away.y > 0.0);
            input.set_pressed(Control::Up, away.y < 0.0);
        }
    }

    pub fn run() {
        let args: Vec<String> = std::env::args().collect();
        let tuning = load_tuning(args.get(1).map(String::as_str));
        let seed = args
            .get(2)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0x5EED);

        let final_score = Rc::new(Cell::new(None));
        let sink = final_score.clone();
        let quality = match args.get(3) {
            Some(name) => QualityPreset::parse(name).unwrap_or_else(|| {
                log::warn!("Unknown quality preset {:?}; using Medium", name);
                QualityPreset::Medium
            }),
            None => QualityPreset::default(),
        };
        log::info!("Quality preset: {}", quality.as_str());
        let settings = Settings::from_preset(quality);
        let mut surface = MeshSurface::new(
            ARENA_WIDTH,
            ARENA_HEIGHT,
            settings.quality.circle_segments(),
        );
        let mut session = Session::start(
            Arena::new(ARENA_WIDTH, ARENA_HEIGHT),
            tuning,
            settings,
            seed,
            Box::new(move |score| sink.set(Some(score))),
        );

        let mut now_ms = 0.0;
        let mut frames = 0;
        while session.is_running() && frames < MAX_FRAMES {
            session.advance_clock(now_ms);
            autopilot(&mut session);
            surface.clear();
            session.frame(Some(&mut surface));
            now_ms += FRAME_MS;
            frames += 1;
        }

        match final_score.get() {
            Some(score) => log::info!(
                "Autopilot died after {} frames ({:.1}s) with score {}",
                frames,
                now_ms / 1000.0,
                score
            ),
            None => {
                session.teardown();
                log::info!(
                    "Autopilot survived {} frames with score {}",
                    frames,
                    session.score()
                );
            }
        }
        println!("{}", session.score());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Geo Survivor (native, headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is startGame, this is just to satisfy the compiler
}
