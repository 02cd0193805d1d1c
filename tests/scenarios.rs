//! End-to-end gameplay scenarios through the public API

use std::cell::RefCell;
use std::rc::Rc;

use geo_survivor::renderer::MeshSurface;
use geo_survivor::sim::{Arena, EnemyKind, GameEvent, GameState, TickInput, tick};
use geo_survivor::{Session, Settings, Tuning};
use glam::Vec2;
use proptest::prelude::*;

fn world() -> GameState {
    GameState::new(Arena::new(800.0, 600.0), Tuning::default(), 2024)
}

fn idle() -> TickInput {
    TickInput::default()
}

#[test]
fn enemy_pursuit_ends_session_once() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    let mut session = Session::start(
        Arena::new(800.0, 600.0),
        Tuning::default(),
        Settings::default(),
        9,
        Box::new(move |score| sink.borrow_mut().push(score)),
    );
    let mut surface = MeshSurface::new(800.0, 600.0, 12);

    // First enemy spawns 2s in; at 0.5 px/frame it needs well under 20k frames
    let mut now = 0.0;
    let mut frames = 0;
    while session.is_running() && frames < 20_000 {
        session.advance_clock(now);
        session.frame(Some(&mut surface));
        now += 1000.0 / 60.0;
        frames += 1;
    }

    assert!(!session.is_running());
    assert_eq!(*calls.borrow(), vec![0]);

    let frozen_frame = session.state().frame;
    let frozen_enemies: Vec<Vec2> = session.state().enemies.iter().map(|e| e.pos).collect();
    for _ in 0..10 {
        session.advance_clock(now);
        session.frame(Some(&mut surface));
        now += 1000.0;
    }
    assert_eq!(session.state().frame, frozen_frame);
    let after: Vec<Vec2> = session.state().enemies.iter().map(|e| e.pos).collect();
    assert_eq!(after, frozen_enemies);
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn square_takes_three_hits() {
    let mut state = world();
    let id = state.add_enemy(EnemyKind::Square, Vec2::new(650.0, 300.0), Vec2::ZERO, 20.0);

    for hit in 1..=3 {
        let at = state.enemies[0].pos;
        state.add_projectile(at, Vec2::ZERO);
        let outcome = tick(&mut state, &idle());
        assert_eq!(outcome.collisions.hits, 1);
        if hit < 3 {
            assert_eq!(state.score, 0);
            assert_eq!(state.enemies[0].health, 3 - hit);
        } else {
            assert!(state.enemies.is_empty());
            assert_eq!(state.score, 50);
            assert!(outcome.events.iter().any(|e| matches!(
                e,
                GameEvent::EnemyKilled { id: killed, points: 50, .. } if *killed == id
            )));
            // ceil(15 * 2.5)
            assert_eq!(state.particles.len(), 38);
        }
        assert!(state.projectiles.is_empty());
    }
}

#[test]
fn one_projectile_per_dead_triangle() {
    let mut state = world();
    state.add_enemy(EnemyKind::Triangle, Vec2::new(650.0, 300.0), Vec2::ZERO, 20.0);
    let at = Vec2::new(649.5, 300.0);
    state.add_projectile(at, Vec2::ZERO);
    state.add_projectile(at, Vec2::ZERO);

    let outcome = tick(&mut state, &idle());
    assert_eq!(outcome.collisions.hits, 1);
    assert_eq!(state.score, 10);
    assert!(state.enemies.is_empty());
    assert_eq!(state.projectiles.len(), 1);
    assert_eq!(state.particles.len(), 15);
}

#[test]
fn contact_and_kill_in_same_frame_keeps_earlier_kill() {
    let mut state = world();
    let center = state.arena.center();
    // Killed first (scanned first), then the second enemy touches the player
    state.add_enemy(EnemyKind::Triangle, Vec2::new(100.0, 100.0), Vec2::ZERO, 10.0);
    state.add_enemy(EnemyKind::Triangle, center + Vec2::new(20.0, 0.0), Vec2::ZERO, 10.0);
    state.add_projectile(Vec2::new(100.3, 100.3), Vec2::ZERO);

    let outcome = tick(&mut state, &idle());
    assert_eq!(outcome.game_over_score(), Some(10));
    assert!(state.is_over());
    assert_eq!(state.enemies.len(), 1);

    let frame = state.frame;
    assert!(tick(&mut state, &idle()).events.is_empty());
    assert_eq!(state.frame, frame);
}

proptest! {
    #[test]
    fn player_stays_in_bounds(
        moves in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..400)
    ) {
        let mut state = world();
        let r = state.tuning.player_radius;
        for (up, down, left, right) in moves {
            let input = TickInput { up, down, left, right, fire_at: Vec::new() };
            tick(&mut state, &input);
            let pos = state.player.as_ref().unwrap().pos;
            prop_assert!(pos.x >= r && pos.x <= 800.0 - r);
            prop_assert!(pos.y >= r && pos.y <= 600.0 - r);
        }
    }

    #[test]
    fn score_is_sum_of_kills(kinds in prop::collection::vec(any::<bool>(), 0..9)) {
        let mut state = world();
        let mut expected = 0;
        for (i, &square) in kinds.iter().enumerate() {
            let pos = Vec2::new(40.0 + 90.0 * i as f32, 60.0);
            let (kind, shots, points) = if square {
                (EnemyKind::Square, 3, 50)
            } else {
                (EnemyKind::Triangle, 1, 10)
            };
            state.add_enemy(kind, pos, Vec2::ZERO, 10.0);
            for _ in 0..shots {
                state.add_projectile(pos, Vec2::ZERO);
            }
            expected += points;
        }

        tick(&mut state, &idle());
        prop_assert_eq!(state.score, expected);
        prop_assert!(state.enemies.is_empty());
        prop_assert!(state.projectiles.is_empty());
    }

    #[test]
    fn stray_projectiles_are_culled(angles in prop::collection::vec(0.0f32..std::f32::consts::TAU, 1..20)) {
        let mut state = world();
        let origin = state.arena.center();
        let input = TickInput {
            fire_at: angles.iter().map(|a| origin + Vec2::from_angle(*a) * 100.0).collect(),
            ..Default::default()
        };
        tick(&mut state, &input);
        prop_assert_eq!(state.projectiles.len(), angles.len());

        for _ in 0..200 {
            tick(&mut state, &idle());
            let arena = state.arena;
            prop_assert!(state.projectiles.iter().all(|p| !arena.circle_is_outside(p.pos, p.radius)));
        }
        prop_assert!(state.projectiles.is_empty());
    }
}
