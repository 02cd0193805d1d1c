//! Movement integration and pursuit steering
//!
//! All speeds are in pixels per frame.

use glam::Vec2;

use super::state::{Arena, GameState, Player};
use super::tick::TickInput;
use crate::heading;

/// Offset the player along every held axis, then clamp to the arena
///
/// Without `normalize_diagonal`, two held axes each move at full speed, so
/// diagonal travel is faster than axial travel.
pub fn move_player(
    player: &mut Player,
    input: &TickInput,
    arena: &Arena,
    speed: f32,
    normalize_diagonal: bool,
) {
    let mut dir = Vec2::ZERO;
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }

    if dir == Vec2::ZERO {
        return;
    }
    if normalize_diagonal {
        dir = dir.normalize();
    }

    player.pos = arena.clamp_circle(player.pos + dir * speed, player.radius);
}

/// Fire a projectile from the player toward `target`
///
/// Returns the projectile ID, or `None` when there is no player to fire from.
pub fn fire_projectile(state: &mut GameState, target: Vec2) -> Option<u32> {
    let origin = state.player.as_ref()?.pos;
    let vel = heading(origin, target) * state.tuning.projectile_speed;
    let id = state.add_projectile(origin, vel);
    log::trace!("Projectile {} fired toward ({:.0}, {:.0})", id, target.x, target.y);
    Some(id)
}

/// Straight-line projectile motion
pub fn advance_projectiles(state: &mut GameState) {
    for proj in &mut state.projectiles {
        proj.pos += proj.vel;
    }
}

/// Re-aim every enemy at the current player position, then integrate
///
/// With no player, enemies keep their previous velocity.
pub fn steer_enemies(state: &mut GameState) {
    let target = state.player.as_ref().map(|p| p.pos);
    let speed = state.tuning.enemy_speed;

    for enemy in &mut state.enemies {
        if let Some(target) = target {
            enemy.vel = heading(enemy.pos, target) * speed;
        }
        enemy.pos += enemy.vel;
    }
}
