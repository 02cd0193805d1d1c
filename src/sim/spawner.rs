//! Wall-clock enemy spawning
//!
//! Two independent interval timers (one per enemy kind) run on elapsed
//! milliseconds, never on frame count, so spawn cadence does not depend on
//! the display refresh rate.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, EnemyKind, GameState};
use crate::heading;
use crate::tuning::Tuning;

/// Maximum spawns a single timer may catch up in one advance
///
/// Long stalls (hidden tab, debugger) drop the excess instead of flooding
/// the arena.
pub const MAX_CATCH_UP: u32 = 4;

/// One repeating timer
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pub kind: EnemyKind,
    interval_ms: f64,
    accumulator_ms: f64,
}

impl SpawnTimer {
    pub fn new(kind: EnemyKind, interval_ms: f64) -> Self {
        Self {
            kind,
            interval_ms,
            accumulator_ms: 0.0,
        }
    }

    /// Add elapsed time; returns the offsets (from the start of the step)
    /// at which the timer fired
    fn advance(&mut self, dt_ms: f64) -> Vec<f64> {
        let mut fired = Vec::new();
        if self.interval_ms <= 0.0 || dt_ms <= 0.0 {
            return fired;
        }

        let start = self.accumulator_ms;
        self.accumulator_ms += dt_ms;
        while self.accumulator_ms >= self.interval_ms {
            self.accumulator_ms -= self.interval_ms;
            if fired.len() as u32 == MAX_CATCH_UP {
                continue;
            }
            let due = self.interval_ms * (fired.len() + 1) as f64 - start;
            fired.push(due);
        }
        fired
    }
}

/// Scheduler holding both spawn timers for one session
#[derive(Debug, Clone)]
pub struct Spawner {
    timers: Vec<SpawnTimer>,
    last_ms: Option<f64>,
    cancelled: bool,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            timers: vec![
                SpawnTimer::new(EnemyKind::Triangle, tuning.triangle.spawn_interval_ms),
                SpawnTimer::new(EnemyKind::Square, tuning.square.spawn_interval_ms),
            ],
            last_ms: None,
            cancelled: false,
        }
    }

    /// Advance to an absolute wall-clock time
    ///
    /// The first call only records the origin.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<EnemyKind> {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return Vec::new();
        };
        self.advance_by(now_ms - last)
    }

    /// Advance by a relative step; returns due spawns in time order
    pub fn advance_by(&mut self, dt_ms: f64) -> Vec<EnemyKind> {
        if self.cancelled {
            return Vec::new();
        }

        let mut due: Vec<(f64, EnemyKind)> = Vec::new();
        for timer in &mut self.timers {
            let kind = timer.kind;
            due.extend(timer.advance(dt_ms).into_iter().map(|at| (at, kind)));
        }
        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter().map(|(_, kind)| kind).collect()
    }

    /// Stop both timers; later advances never fire
    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::debug!("Spawn timers cancelled");
        }
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// A random point just outside the arena, offset outward by `radius`
pub fn spawn_point<R: Rng + ?Sized>(rng: &mut R, arena: &Arena, radius: f32) -> Vec2 {
    if rng.random_bool(0.5) {
        // Left or right edge
        let x = if rng.random_bool(0.5) {
            -radius
        } else {
            arena.width + radius
        };
        Vec2::new(x, rng.random::<f32>() * arena.height)
    } else {
        // Top or bottom edge
        let y = if rng.random_bool(0.5) {
            -radius
        } else {
            arena.height + radius
        };
        Vec2::new(rng.random::<f32>() * arena.width, y)
    }
}

/// Create an enemy of `kind` off-screen, aimed at the player
///
/// Returns `None` when there is no player to aim at.
pub fn spawn_enemy(state: &mut GameState, kind: EnemyKind) -> Option<u32> {
    let target = state.player.as_ref()?.pos;
    let (min, max) = {
        let t = state.enemy_tuning(kind);
        (t.min_radius, t.max_radius)
    };

    let radius = min + state.rng.random::<f32>() * (max - min);
    let pos = spawn_point(&mut state.rng, &state.arena, radius);
    let vel = heading(pos, target) * state.tuning.enemy_speed;
    let id = state.add_enemy(kind, pos, vel, radius);

    log::trace!(
        "Spawned {} {} at ({:.0}, {:.0}) r={:.1}",
        kind.as_str(),
        id,
        pos.x,
        pos.y,
        radius
    );
    Some(id)
}
