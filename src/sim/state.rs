//! Game state and core simulation types
//!
//! A single `GameState` owns every live entity collection. Passes in
//! `tick` mutate it in place, one at a time.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::palette;
use crate::tuning::{EnemyTuning, Tuning};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// An enemy reached the player; the world is frozen
    GameOver,
}

/// Gameplay events emitted by a frame or a spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { id: u32 },
    EnemySpawned { id: u32, kind: EnemyKind },
    EnemyKilled { id: u32, kind: EnemyKind, points: u64 },
    /// Terminal: the session ends with this score
    GameOver { score: u64 },
}

/// The visible play area, fixed at session start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if the whole circle lies inside the arena
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= 0.0
            && pos.x + radius <= self.width
            && pos.y - radius >= 0.0
            && pos.y + radius <= self.height
    }

    /// True if the whole circle lies outside the arena rectangle
    pub fn circle_is_outside(&self, pos: Vec2, radius: f32) -> bool {
        pos.x + radius < 0.0
            || pos.x - radius > self.width
            || pos.y + radius < 0.0
            || pos.y - radius > self.height
    }

    /// Clamp a circle center so its full extent stays inside
    ///
    /// An arena narrower than the circle pins it to the middle of that axis.
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        let clamp_axis = |v: f32, size: f32| {
            if size < radius * 2.0 {
                size / 2.0
            } else {
                v.clamp(radius, size - radius)
            }
        };
        Vec2::new(clamp_axis(pos.x, self.width), clamp_axis(pos.y, self.height))
    }
}

/// The player avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

impl Player {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            color: palette::PLAYER,
        }
    }
}

/// A shot fired by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Small, one hit, spawns often
    Triangle,
    /// Larger, three hits, spawns half as often
    Square,
}

impl EnemyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Triangle => "triangle",
            EnemyKind::Square => "square",
        }
    }
}

/// A pursuing enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
    /// Remaining hits; always >= 1 while in the live collection
    pub health: i32,
}

/// A cosmetic particle (no gameplay interaction)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
    /// Opacity for drawing, 1.0 at birth
    pub alpha: f32,
    /// Opacity lost per frame
    pub decay: f32,
    /// Decay passes left before removal, `ceil(1 / decay)` at birth
    pub frames_left: u32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: [f32; 4], decay: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
            alpha: 1.0,
            decay,
            frames_left: lifetime_frames(decay),
        }
    }
}

/// Frames until a full-opacity particle fades out
///
/// Counted up front so float drift in `alpha` never adds or drops a frame.
pub fn lifetime_frames(decay: f32) -> u32 {
    ((1.0 / decay).ceil() as u32).max(1)
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Arena bounds, read once at session start
    pub arena: Arena,
    /// Balance values for this session
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Score (monotonic within a session)
    pub score: u64,
    /// Frames simulated so far
    pub frame: u64,
    /// Player avatar; `None` only if a host removed it
    pub player: Option<Player>,
    /// Live projectiles (unordered)
    pub projectiles: Vec<Projectile>,
    /// Live enemies (unordered)
    pub enemies: Vec<Enemy>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Cosmetic randomness
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh world with the player centered in the arena
    pub fn new(arena: Arena, tuning: Tuning, seed: u64) -> Self {
        let player = Player::new(arena.center(), tuning.player_radius);
        Self {
            arena,
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            frame: 0,
            player: Some(player),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Balance values for an enemy kind
    pub fn enemy_tuning(&self, kind: EnemyKind) -> &EnemyTuning {
        match kind {
            EnemyKind::Triangle => &self.tuning.triangle,
            EnemyKind::Square => &self.tuning.square,
        }
    }

    /// Place an enemy into the world, returning its ID
    pub fn add_enemy(&mut self, kind: EnemyKind, pos: Vec2, vel: Vec2, radius: f32) -> u32 {
        let id = self.next_entity_id();
        let health = self.enemy_tuning(kind).health;
        self.enemies.push(Enemy {
            id,
            kind,
            pos,
            vel,
            radius,
            color: palette::ENEMY,
            health,
        });
        id
    }

    /// Place a projectile into the world, returning its ID
    pub fn add_projectile(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos,
            vel,
            radius: self.tuning.projectile_radius,
            color: palette::PROJECTILE,
        });
        id
    }
}
