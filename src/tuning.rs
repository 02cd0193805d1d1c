//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from JSON. Missing fields fall
//! back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Size range and rewards for one enemy kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    /// Smallest spawn radius
    pub min_radius: f32,
    /// Largest spawn radius
    pub max_radius: f32,
    /// Hits needed to destroy
    pub health: i32,
    /// Points awarded on kill
    pub score: u64,
    /// Wall-clock spawn cadence
    pub spawn_interval_ms: f64,
    /// Particle burst multiplier on death
    pub burst_multiplier: f32,
}

impl EnemyTuning {
    pub fn triangle() -> Self {
        Self {
            min_radius: TRIANGLE_MIN_RADIUS,
            max_radius: TRIANGLE_MAX_RADIUS,
            health: TRIANGLE_HEALTH,
            score: TRIANGLE_SCORE,
            spawn_interval_ms: TRIANGLE_SPAWN_INTERVAL_MS,
            burst_multiplier: 1.0,
        }
    }

    pub fn square() -> Self {
        Self {
            min_radius: SQUARE_MIN_SIZE,
            max_radius: SQUARE_MAX_SIZE,
            health: SQUARE_HEALTH,
            score: SQUARE_SCORE,
            spawn_interval_ms: SQUARE_SPAWN_INTERVAL_MS,
            burst_multiplier: SQUARE_BURST_MULTIPLIER,
        }
    }

    fn validate(&self, field: &'static str) -> Result<(), TuningError> {
        if !(self.min_radius > 0.0) || self.max_radius < self.min_radius {
            return Err(TuningError::Invalid {
                field,
                reason: "radius range must be positive and ordered",
            });
        }
        if self.health < 1 {
            return Err(TuningError::Invalid {
                field,
                reason: "health must be at least 1",
            });
        }
        if !(self.spawn_interval_ms > 0.0) {
            return Err(TuningError::Invalid {
                field,
                reason: "spawn interval must be positive",
            });
        }
        if self.burst_multiplier < 0.0 {
            return Err(TuningError::Invalid {
                field,
                reason: "burst multiplier must not be negative",
            });
        }
        Ok(())
    }
}

/// Gameplay tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_radius: f32,
    /// Pixels per frame along each held axis
    pub player_speed: f32,
    /// Scale combined diagonal input back to `player_speed`
    pub normalize_diagonal: bool,

    pub projectile_radius: f32,
    pub projectile_speed: f32,

    pub enemy_speed: f32,
    pub triangle: EnemyTuning,
    pub square: EnemyTuning,

    /// Edge-to-edge distance below which two circles touch
    pub contact_threshold: f32,

    /// Particles per burst before the kind multiplier
    pub particle_count: u32,
    pub particle_decay: f32,
    pub particle_decay_jitter: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            normalize_diagonal: false,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed: PROJECTILE_SPEED,
            enemy_speed: ENEMY_SPEED,
            triangle: EnemyTuning::triangle(),
            square: EnemyTuning::square(),
            contact_threshold: CONTACT_THRESHOLD,
            particle_count: PARTICLE_COUNT,
            particle_decay: PARTICLE_DECAY,
            particle_decay_jitter: PARTICLE_DECAY_JITTER,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.player_radius > 0.0) {
            return Err(TuningError::Invalid {
                field: "player_radius",
                reason: "must be positive",
            });
        }
        if self.player_speed < 0.0 || self.enemy_speed < 0.0 {
            return Err(TuningError::Invalid {
                field: "player_speed",
                reason: "speeds must not be negative",
            });
        }
        if !(self.projectile_radius > 0.0) || !(self.projectile_speed > 0.0) {
            return Err(TuningError::Invalid {
                field: "projectile",
                reason: "radius and speed must be positive",
            });
        }
        if !(self.particle_decay > 0.0) || self.particle_decay_jitter < 0.0 {
            return Err(TuningError::Invalid {
                field: "particle_decay",
                reason: "decay must be positive",
            });
        }
        self.triangle.validate("triangle")?;
        self.square.validate("square")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let t = Tuning::default();
        assert_eq!(t.player_radius, 15.0);
        assert_eq!(t.triangle.score, 10);
        assert_eq!(t.square.score, 50);
        assert_eq!(t.square.health, 3);
        assert_eq!(t.triangle.spawn_interval_ms, 2000.0);
        assert_eq!(t.square.spawn_interval_ms, 4000.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "player_speed": 6.0, "normalize_diagonal": true }"#)
            .unwrap();
        assert_eq!(t.player_speed, 6.0);
        assert!(t.normalize_diagonal);
        assert_eq!(t.projectile_speed, PROJECTILE_SPEED);
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_inverted_size_range() {
        let mut t = Tuning::default();
        t.square.min_radius = 40.0;
        let err = t.validate().unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "square",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_decay() {
        let json = r#"{ "particle_decay": 0.0 }"#;
        assert!(matches!(
            Tuning::from_json(json),
            Err(TuningError::Invalid { .. })
        ));
    }
}
