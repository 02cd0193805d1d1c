//! One play-through, from start signal to game over
//!
//! A `Session` owns the world, the spawn scheduler and the input state. The
//! host drives it from a single thread:
//! - `advance_clock` with wall-clock milliseconds (spawning)
//! - `frame` once per display refresh (simulation + drawing)
//! - `teardown` when the presentation layer takes over
//!
//! The game-over handler runs exactly once, from inside the frame that ended
//! the session. After that, nothing in the world changes.

use crate::renderer::{Surface, render_frame};
use crate::settings::Settings;
use crate::sim::{
    Arena, FrameSkip, GameEvent, GameState, InputState, Spawner, TickOutcome, spawn_enemy, tick,
};
use crate::tuning::Tuning;

/// Callback handing the final score back to the presentation layer
pub type GameOverHandler = Box<dyn FnMut(u64)>;

/// What a call to `Session::frame` did
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub outcome: TickOutcome,
    /// The frame was drawn
    pub drawn: bool,
}

/// A running (or finished) session
pub struct Session {
    state: GameState,
    spawner: Spawner,
    input: InputState,
    settings: Settings,
    on_game_over: Option<GameOverHandler>,
    running: bool,
    last_skip: Option<FrameSkip>,
}

impl Session {
    /// Start a session on an arena of the given size
    pub fn start(
        arena: Arena,
        tuning: Tuning,
        settings: Settings,
        seed: u64,
        on_game_over: GameOverHandler,
    ) -> Self {
        log::info!(
            "Session started: arena {}x{}, seed {}",
            arena.width,
            arena.height,
            seed
        );
        Self {
            spawner: Spawner::new(&tuning),
            state: GameState::new(arena, tuning, seed),
            input: InputState::new(),
            settings,
            on_game_over: Some(on_game_over),
            running: true,
            last_skip: None,
        }
    }

    /// Start a session sized to a drawing surface (dimensions read once)
    pub fn start_on(
        surface: &dyn Surface,
        tuning: Tuning,
        settings: Settings,
        seed: u64,
        on_game_over: GameOverHandler,
    ) -> Self {
        let arena = Arena::new(surface.width(), surface.height());
        Self::start(arena, tuning, settings, seed, on_game_over)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct world access for hosts and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// True until game over or teardown
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance the spawn clock to `now_ms`, spawning whatever is due
    pub fn advance_clock(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if !self.running {
            return Vec::new();
        }

        let mut events = Vec::new();
        for kind in self.spawner.advance_to(now_ms) {
            match spawn_enemy(&mut self.state, kind) {
                Some(id) => events.push(GameEvent::EnemySpawned { id, kind }),
                None => self.note_skip(Some(FrameSkip::PlayerMissing)),
            }
        }
        events
    }

    /// Run one frame: simulate, hand off on game over, then draw
    ///
    /// With no surface the frame is skipped entirely.
    pub fn frame(&mut self, surface: Option<&mut dyn Surface>) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.running {
            return report;
        }

        let Some(surface) = surface else {
            report.outcome.skipped = Some(FrameSkip::SurfaceUnavailable);
            self.note_skip(report.outcome.skipped);
            return report;
        };

        let input = self.input.snapshot();
        report.outcome = tick(&mut self.state, &input);
        self.note_skip(report.outcome.skipped);

        if let Some(score) = report.outcome.game_over_score() {
            self.finish(score);
        }

        render_frame(&self.state, &self.settings, surface);
        report.drawn = true;
        report
    }

    /// Stop the session without reporting a score
    ///
    /// Cancels both spawn timers and releases held input. Safe to call more
    /// than once.
    pub fn teardown(&mut self) {
        self.spawner.cancel();
        self.input.release_all();
        if self.running {
            log::info!("Session torn down at score {}", self.state.score);
        }
        self.running = false;
        self.on_game_over = None;
    }

    fn finish(&mut self, score: u64) {
        self.running = false;
        self.spawner.cancel();
        self.input.release_all();
        log::info!("Game over, final score {}", score);
        if let Some(mut handler) = self.on_game_over.take() {
            handler(score);
        }
    }

    /// Log skip conditions when they start and stop, not every frame
    fn note_skip(&mut self, skip: Option<FrameSkip>) {
        if skip == self.last_skip {
            return;
        }
        match (skip, self.last_skip) {
            (Some(now), _) => log::warn!("Frame skipped: {}", now.as_str()),
            (None, Some(before)) => log::info!("Recovered from: {}", before.as_str()),
            (None, None) => {}
        }
        self.last_skip = skip;
    }
}
