//! Per-frame simulation pass
//!
//! Runs the sub-passes in a fixed order: particle decay, player, projectiles,
//! enemies, collisions. Spawning runs on its own clock (see `spawner`).

use glam::Vec2;

use super::collision::{CollisionReport, resolve_collisions};
use super::movement::{advance_projectiles, fire_projectile, move_player, steer_enemies};
use super::particles::update_particles;
use super::state::{GameEvent, GameState};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire actions since the last frame, each aimed at a pointer position
    pub fire_at: Vec<Vec2>,
}

/// A frame (or part of one) skipped for a non-gameplay reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSkip {
    /// No drawing surface; the whole frame was skipped
    SurfaceUnavailable,
    /// No player; player-specific logic was skipped
    PlayerMissing,
}

impl FrameSkip {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameSkip::SurfaceUnavailable => "drawing surface unavailable",
            FrameSkip::PlayerMissing => "player missing",
        }
    }
}

/// Result of one frame
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    pub collisions: CollisionReport,
    pub skipped: Option<FrameSkip>,
}

impl TickOutcome {
    /// Final score, if this frame ended the session
    pub fn game_over_score(&self) -> Option<u64> {
        self.events.iter().find_map(|e| match e {
            GameEvent::GameOver { score } => Some(*score),
            _ => None,
        })
    }
}

/// Advance the game state by one frame
///
/// A finished session is frozen: further calls do nothing.
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.is_over() {
        return outcome;
    }

    state.frame += 1;

    // Decay pass
    update_particles(&mut state.particles);

    // Player pass
    if state.player.is_some() {
        for &target in &input.fire_at {
            if let Some(id) = fire_projectile(state, target) {
                outcome.events.push(GameEvent::ProjectileFired { id });
            }
        }

        let speed = state.tuning.player_speed;
        let normalize = state.tuning.normalize_diagonal;
        if let Some(player) = state.player.as_mut() {
            move_player(player, input, &state.arena, speed, normalize);
        }
    } else {
        outcome.skipped = Some(FrameSkip::PlayerMissing);
    }

    // Projectile pass
    advance_projectiles(state);

    // Enemy pass
    steer_enemies(state);

    // Collision pass
    let report = resolve_collisions(state);
    outcome.events.extend(report.kills.iter().map(|kill| GameEvent::EnemyKilled {
        id: kill.enemy_id,
        kind: kill.kind,
        points: kill.points,
    }));
    if report.player_contact.is_some() {
        outcome.events.push(GameEvent::GameOver { score: state.score });
    }
    outcome.collisions = report;

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, EnemyKind, GamePhase};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Arena::new(800.0, 600.0), Tuning::default(), 12345)
    }

    #[test]
    fn test_fire_then_advance_same_frame() {
        let mut state = state();
        let input = TickInput {
            fire_at: vec![Vec2::new(800.0, 300.0)],
            ..Default::default()
        };
        let outcome = tick(&mut state, &input);
        assert!(matches!(outcome.events[0], GameEvent::ProjectileFired { .. }));
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(408.0, 300.0));
    }

    #[test]
    fn test_projectile_fired_before_player_moves() {
        let mut state = state();
        let input = TickInput {
            right: true,
            fire_at: vec![Vec2::new(400.0, 0.0)],
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.as_ref().unwrap().pos, Vec2::new(404.0, 300.0));
        assert_eq!(state.projectiles[0].pos, Vec2::new(400.0, 292.0));
    }

    #[test]
    fn test_missing_player_is_reported_not_fatal() {
        let mut state = state();
        state.player = None;
        state.add_projectile(Vec2::new(100.0, 100.0), Vec2::X);
        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(outcome.skipped, Some(FrameSkip::PlayerMissing));
        assert_eq!(state.projectiles[0].pos, Vec2::new(101.0, 100.0));
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut state = state();
        state.add_enemy(EnemyKind::Triangle, Vec2::new(424.0, 300.0), Vec2::ZERO, 10.0);
        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(outcome.game_over_score(), Some(0));
        assert_eq!(state.phase, GamePhase::GameOver);

        let frame = state.frame;
        let enemy_pos = state.enemies[0].pos;
        let outcome = tick(
            &mut state,
            &TickInput {
                fire_at: vec![Vec2::ZERO],
                ..Default::default()
            },
        );
        assert!(outcome.events.is_empty());
        assert_eq!(state.frame, frame);
        assert_eq!(state.enemies[0].pos, enemy_pos);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_kill_event_reports_points() {
        let mut state = state();
        state.add_enemy(EnemyKind::Square, Vec2::new(100.0, 100.0), Vec2::ZERO, 20.0);
        state.enemies[0].health = 1;
        state.add_projectile(Vec2::new(99.0, 100.0), Vec2::ZERO);
        let outcome = tick(&mut state, &TickInput::default());
        assert!(outcome.events.contains(&GameEvent::EnemyKilled {
            id: 1,
            kind: EnemyKind::Square,
            points: 50,
        }));
        assert_eq!(state.score, 50);
    }
}
