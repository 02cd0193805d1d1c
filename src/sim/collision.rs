//! Collision detection and resolution
//!
//! Everything in the arena is a circle. Removals are marked by index during
//! the scan and applied once per collection after it, so no index shifts
//! while the pass is still reading.

use glam::Vec2;

use super::particles::{burst_size, spawn_burst};
use super::state::{EnemyKind, GamePhase, GameState};

/// True if two circles overlap (edge gap below `threshold`)
#[inline]
pub fn circles_touch(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32, threshold: f32) -> bool {
    a_pos.distance(b_pos) - a_radius - b_radius < threshold
}

/// Index marks for deferred removal from one collection
#[derive(Debug, Clone, Default)]
pub struct RemovalMarks {
    marked: Vec<bool>,
    count: usize,
}

impl RemovalMarks {
    pub fn new(len: usize) -> Self {
        Self {
            marked: vec![false; len],
            count: 0,
        }
    }

    /// Mark an index; returns false if it was already marked
    pub fn mark(&mut self, index: usize) -> bool {
        if self.marked[index] {
            return false;
        }
        self.marked[index] = true;
        self.count += 1;
        true
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Drop every marked element in a single pass
    pub fn compact<T>(&self, items: &mut Vec<T>) {
        if self.count == 0 {
            return;
        }
        let mut index = 0;
        items.retain(|_| {
            let keep = !self.is_marked(index);
            index += 1;
            keep
        });
    }
}

/// An enemy destroyed this frame
#[derive(Debug, Clone, PartialEq)]
pub struct Kill {
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub color: [f32; 4],
    pub points: u64,
}

/// What the collision pass did this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Projectile hits landed (including killing blows)
    pub hits: u32,
    /// Enemies destroyed, in scan order
    pub kills: Vec<Kill>,
    /// Projectiles removed for leaving the arena
    pub culled: usize,
    /// Enemy that reached the player, ending the session
    pub player_contact: Option<u32>,
}

/// Resolve enemy/player and projectile/enemy contacts, then cull
///
/// Per enemy, player contact is checked first. The first contact ends the
/// session: the scan stops, but kills and removals already found this frame
/// are still applied so the frozen world holds no dead enemies.
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let threshold = state.tuning.contact_threshold;
    let player = state.player.as_ref().map(|p| (p.pos, p.radius));

    let mut enemy_marks = RemovalMarks::new(state.enemies.len());
    let mut projectile_marks = RemovalMarks::new(state.projectiles.len());

    let projectiles = &state.projectiles;
    for (ei, enemy) in state.enemies.iter_mut().enumerate() {
        if let Some((player_pos, player_radius)) = player {
            if circles_touch(enemy.pos, enemy.radius, player_pos, player_radius, threshold) {
                report.player_contact = Some(enemy.id);
                break;
            }
        }

        for (pi, proj) in projectiles.iter().enumerate() {
            if projectile_marks.is_marked(pi) || enemy_marks.is_marked(ei) {
                continue;
            }
            if !circles_touch(proj.pos, proj.radius, enemy.pos, enemy.radius, threshold) {
                continue;
            }

            projectile_marks.mark(pi);
            enemy.health -= 1;
            report.hits += 1;

            if enemy.health <= 0 {
                enemy_marks.mark(ei);
                let points = match enemy.kind {
                    EnemyKind::Triangle => state.tuning.triangle.score,
                    EnemyKind::Square => state.tuning.square.score,
                };
                report.kills.push(Kill {
                    enemy_id: enemy.id,
                    kind: enemy.kind,
                    pos: enemy.pos,
                    color: enemy.color,
                    points,
                });
            }
        }
    }

    if report.player_contact.is_none() {
        let arena = state.arena;
        for (pi, proj) in state.projectiles.iter().enumerate() {
            if arena.circle_is_outside(proj.pos, proj.radius) && projectile_marks.mark(pi) {
                report.culled += 1;
            }
        }
    }

    for kill in &report.kills {
        let multiplier = state.enemy_tuning(kill.kind).burst_multiplier;
        let count = burst_size(state.tuning.particle_count, multiplier);
        spawn_burst(state, kill.pos, kill.color, count);
        state.score += kill.points;
        log::debug!(
            "Enemy {} ({}) destroyed, +{} -> {}",
            kill.enemy_id,
            kill.kind.as_str(),
            kill.points,
            state.score
        );
    }

    enemy_marks.compact(&mut state.enemies);
    projectile_marks.compact(&mut state.projectiles);

    if let Some(enemy_id) = report.player_contact {
        state.phase = GamePhase::GameOver;
        log::info!("Enemy {} reached the player, final score {}", enemy_id, state.score);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Arena;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Arena::new(800.0, 600.0), Tuning::default(), 3)
    }

    #[test]
    fn test_circles_touch_threshold() {
        // Gap of exactly 1.0 is not touching; 0.9 is
        assert!(!circles_touch(Vec2::ZERO, 5.0, Vec2::new(11.0, 0.0), 5.0, 1.0));
        assert!(circles_touch(Vec2::ZERO, 5.0, Vec2::new(10.9, 0.0), 5.0, 1.0));
    }

    #[test]
    fn test_removal_marks_compact() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        let mut marks = RemovalMarks::new(items.len());
        assert!(marks.mark(1));
        assert!(!marks.mark(1));
        assert!(marks.mark(3));
        assert_eq!(marks.len(), 2);
        marks.compact(&mut items);
        assert_eq!(items, vec!['a', 'c']);
    }

    #[test]
    fn test_single_hit_kills_triangle() {
        let mut state = state();
        state.add_enemy(EnemyKind::Triangle, Vec2::new(100.0, 100.0), Vec2::ZERO, 10.0);
        state.add_projectile(Vec2::new(108.0, 100.0), Vec2::X);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.hits, 1);
        assert_eq!(report.kills.len(), 1);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.particles.len(), 15);
    }

    #[test]
    fn test_projectile_hits_only_once() {
        let mut state = state();
        // Two overlapping triangles, one projectile between them
        state.add_enemy(EnemyKind::Triangle, Vec2::new(100.0, 100.0), Vec2::ZERO, 10.0);
        state.add_enemy(EnemyKind::Triangle, Vec2::new(104.0, 100.0), Vec2::ZERO, 10.0);
        state.add_projectile(Vec2::new(102.0, 100.0), Vec2::X);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.hits, 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_simultaneous_hits_kill_square_once() {
        let mut state = state();
        state.add_enemy(EnemyKind::Square, Vec2::new(100.0, 100.0), Vec2::ZERO, 20.0);
        for _ in 0..4 {
            state.add_projectile(Vec2::new(100.0, 100.0), Vec2::X);
        }

        let report = resolve_collisions(&mut state);
        assert_eq!(report.hits, 3);
        assert_eq!(report.kills.len(), 1);
        assert_eq!(state.score, 50);
        assert!(state.enemies.is_empty());
        // The dead square does not absorb the fourth shot
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.particles.len(), 38);
    }

    #[test]
    fn test_wounded_enemy_stays() {
        let mut state = state();
        state.add_enemy(EnemyKind::Square, Vec2::new(100.0, 100.0), Vec2::ZERO, 20.0);
        state.add_projectile(Vec2::new(100.0, 100.0), Vec2::X);

        resolve_collisions(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 2);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_cull_offscreen_projectiles() {
        let mut state = state();
        state.add_projectile(Vec2::new(-6.0, 100.0), Vec2::X);
        state.add_projectile(Vec2::new(-4.0, 100.0), Vec2::X);
        state.add_projectile(Vec2::new(400.0, 700.0), Vec2::Y);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.culled, 2);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(-4.0, 100.0));
    }

    #[test]
    fn test_player_contact_ends_session() {
        let mut state = state();
        let id = state.add_enemy(EnemyKind::Triangle, Vec2::new(420.0, 300.0), Vec2::ZERO, 10.0);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.player_contact, Some(id));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_kills_before_contact_still_count() {
        let mut state = state();
        state.add_enemy(EnemyKind::Triangle, Vec2::new(100.0, 100.0), Vec2::ZERO, 10.0);
        state.add_enemy(EnemyKind::Triangle, Vec2::new(420.0, 300.0), Vec2::ZERO, 10.0);
        state.add_projectile(Vec2::new(100.0, 100.0), Vec2::X);

        let report = resolve_collisions(&mut state);
        assert!(report.player_contact.is_some());
        assert_eq!(state.score, 10);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_no_player_skips_contact_check() {
        let mut state = state();
        state.add_enemy(EnemyKind::Triangle, Vec2::new(400.0, 300.0), Vec2::ZERO, 10.0);
        state.player = None;

        let report = resolve_collisions(&mut state);
        assert!(report.player_contact.is_none());
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
