//! Rendering boundary
//!
//! The simulation never draws. Each frame, `render_frame` turns the current
//! `GameState` into a fixed sequence of drawing commands on any `Surface`.

pub mod shapes;
pub mod vertex;

pub use vertex::{MeshSurface, Vertex};

use glam::Vec2;

use crate::angle_of;
use crate::palette;
use crate::settings::Settings;
use crate::sim::GameState;

/// Glow radius for the player and projectiles
pub const ENTITY_GLOW: f32 = 10.0;
/// Glow radius for enemies
pub const ENEMY_GLOW: f32 = 15.0;

/// A 2D drawing target
pub trait Surface {
    /// Surface width in pixels
    fn width(&self) -> f32;
    /// Surface height in pixels
    fn height(&self) -> f32;
    /// Fill the whole surface with a (possibly translucent) color
    fn fill_overlay(&mut self, color: [f32; 4]);
    /// Filled circle; `glow` is a blur radius (0 for none)
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4], glow: f32);
    /// Filled polygon in local coordinates, rotated then translated
    fn fill_polygon(
        &mut self,
        points: &[Vec2],
        translation: Vec2,
        rotation: f32,
        color: [f32; 4],
        glow: f32,
    );
}

/// Multiply a color's alpha
#[inline]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Draw one frame: trail overlay, particles, player, projectiles, enemies
pub fn render_frame(state: &GameState, settings: &Settings, surface: &mut dyn Surface) {
    let overlay = if settings.effective_trails() {
        palette::TRAIL
    } else {
        let [r, g, b, _] = palette::TRAIL;
        [r, g, b, 1.0]
    };
    surface.fill_overlay(overlay);

    let (entity_glow, enemy_glow) = if settings.glow {
        (ENTITY_GLOW, ENEMY_GLOW)
    } else {
        (0.0, 0.0)
    };

    if settings.particles {
        for particle in &state.particles {
            surface.fill_circle(
                particle.pos,
                particle.radius,
                with_alpha(particle.color, particle.alpha),
                0.0,
            );
        }
    }

    if let Some(player) = &state.player {
        surface.fill_circle(player.pos, player.radius, player.color, entity_glow);
    }

    for proj in &state.projectiles {
        surface.fill_circle(proj.pos, proj.radius, proj.color, entity_glow);
    }

    for enemy in &state.enemies {
        let outline = shapes::enemy_outline(enemy.kind, enemy.radius);
        surface.fill_polygon(
            &outline,
            enemy.pos,
            angle_of(enemy.vel),
            enemy.color,
            enemy_glow,
        );
    }
}
