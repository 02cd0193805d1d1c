//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - One owned `GameState` per session
//! - Fixed pass order per frame
//! - Spawning on a separate wall-clock scheduler

pub mod collision;
pub mod input;
pub mod movement;
pub mod particles;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, Kill, RemovalMarks, circles_touch, resolve_collisions};
pub use input::{Control, InputState};
pub use spawner::{Spawner, spawn_enemy};
pub use state::{
    Arena, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Particle, Player, Projectile,
};
pub use tick::{FrameSkip, TickInput, TickOutcome, tick};
