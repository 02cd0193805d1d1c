//! Geo Survivor - A 2D arena survival shooter
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, collisions, spawning, particles)
//! - `session`: One play-through from start signal to game over
//! - `renderer`: Drawing surface contract and frame draw sequence
//! - `platform`: Browser host (canvas, input listeners, frame loop)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{FrameReport, GameOverHandler, Session};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Default gameplay constants (all speeds are pixels per frame)
pub mod consts {
    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_SPEED: f32 = 4.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 8.0;

    /// Triangle enemies (fast spawn, fragile)
    pub const TRIANGLE_MIN_RADIUS: f32 = 10.0;
    pub const TRIANGLE_MAX_RADIUS: f32 = 30.0;
    pub const TRIANGLE_HEALTH: i32 = 1;
    pub const TRIANGLE_SCORE: u64 = 10;
    pub const TRIANGLE_SPAWN_INTERVAL_MS: f64 = 2000.0;

    /// Square enemies (slow spawn, tough)
    pub const SQUARE_MIN_SIZE: f32 = 15.0;
    pub const SQUARE_MAX_SIZE: f32 = 35.0;
    pub const SQUARE_HEALTH: i32 = 3;
    pub const SQUARE_SCORE: u64 = 50;
    pub const SQUARE_SPAWN_INTERVAL_MS: f64 = 4000.0;

    /// Pursuit speed shared by every enemy kind
    pub const ENEMY_SPEED: f32 = 0.5;

    /// Circles closer than this (edge to edge) are touching
    pub const CONTACT_THRESHOLD: f32 = 1.0;

    /// Particle bursts
    pub const PARTICLE_COUNT: u32 = 15;
    pub const SQUARE_BURST_MULTIPLIER: f32 = 2.5;
    pub const PARTICLE_DECAY: f32 = 0.01;
    pub const PARTICLE_DECAY_JITTER: f32 = 0.01;
    pub const PARTICLE_MIN_RADIUS: f32 = 1.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 4.0;
    /// Per-axis particle speed is (u - 0.5) * (v * 6), so within [-3, 3]
    pub const PARTICLE_SPREAD: f32 = 6.0;
}

/// Colors for game elements (linear RGBA)
pub mod palette {
    pub const PLAYER: [f32; 4] = [0.0, 1.0, 1.0, 1.0]; // cyan
    pub const PROJECTILE: [f32; 4] = [1.0, 1.0, 0.0, 1.0]; // yellow
    pub const ENEMY: [f32; 4] = [1.0, 0.39, 0.28, 1.0]; // tomato
    /// Motion trail overlay, rgba(17, 24, 39, 0.15)
    pub const TRAIL: [f32; 4] = [0.067, 0.094, 0.153, 0.15];
}

/// Unit vector pointing from `from` toward `to`
///
/// Coincident points face +x, the same heading `atan2(0, 0)` gives.
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::X)
}

/// Angle (radians) of a direction vector
#[inline]
pub fn angle_of(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_is_unit_length() {
        let h = heading(Vec2::new(10.0, 10.0), Vec2::new(13.0, 14.0));
        assert!((h.length() - 1.0).abs() < 1e-6);
        assert!((h.x - 0.6).abs() < 1e-6);
        assert!((h.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_heading_coincident_points() {
        let p = Vec2::new(5.0, 5.0);
        assert_eq!(heading(p, p), Vec2::X);
    }

    #[test]
    fn test_angle_of() {
        assert!(angle_of(Vec2::X).abs() < 1e-6);
        assert!((angle_of(Vec2::Y) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
