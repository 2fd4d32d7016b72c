//! Circle collision and per-tick collision resolution
//!
//! The resolver drives the gameplay consequences: scoring, asteroid
//! splitting, explosion spawning, life loss, and the game-over transition.

use glam::Vec2;

use super::entity::{Body, Entity};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Two bodies collide iff the distance between centers is strictly less
/// than the sum of their radii. Touching does not count.
pub fn circle_collide(a: &Body, b: &Body) -> bool {
    a.position().distance(b.position()) < a.radius() + b.radius()
}

/// Resolve all collisions for one tick.
///
/// For each asteroid, all shot collisions are processed before the ship
/// check on that same asteroid, so an asteroid destroyed by a shot this tick
/// can no longer hit the ship. Children spawned by a split are appended to
/// the collection and get their own checks later in the same pass.
pub fn resolve_collisions(state: &mut GameState) {
    let GameState {
        ship,
        shots,
        asteroids,
        explosions,
        events,
        score,
        lives,
        respawn_ticks,
        phase,
        rng,
        ..
    } = state;

    let mut i = 0;
    while i < asteroids.len() {
        // Shot collisions. At most one shot can connect: the asteroid is
        // marked dead on the first hit and later shots skip it.
        let mut destroyed: Option<(Vec2, f32)> = None;
        if let Some(asteroid) = asteroids.get_mut(i) {
            for shot in shots.iter_mut() {
                if asteroid.body().dead || shot.body().dead {
                    continue;
                }
                if circle_collide(shot.body(), asteroid.body()) {
                    shot.body_mut().dead = true;
                    asteroid.body_mut().dead = true;
                    destroyed = Some((asteroid.body().position(), asteroid.scale()));
                }
            }
        }

        if let Some((position, scale)) = destroyed {
            explosions.add_explosion(position, events);
            *score += SCORE_PER_ASTEROID;
            // Large splits into two mediums, medium into two smalls,
            // small vanishes
            if scale > ASTEROID_SCALE_SMALL {
                let child_scale = if scale == ASTEROID_SCALE_LARGE {
                    ASTEROID_SCALE_MEDIUM
                } else {
                    ASTEROID_SCALE_SMALL
                };
                asteroids.add_asteroid(child_scale, Some(position), rng);
                asteroids.add_asteroid(child_scale, Some(position), rng);
            }
        }

        // Ship check on the same asteroid, after its shot collisions
        if let Some(asteroid) = asteroids.get_mut(i) {
            if !asteroid.body().dead
                && !ship.body().dead
                && circle_collide(ship.body(), asteroid.body())
            {
                *lives = lives.saturating_sub(1);
                ship.body_mut().dead = true;
                ship.thrust = false;
                explosions.add_explosion(ship.body().position(), events);
                if *lives == 0 {
                    *phase = GamePhase::Menu;
                    events.push(GameEvent::GameOver);
                    log::info!("game over, final score {score}");
                } else {
                    *respawn_ticks = RESPAWN_DELAY_TICKS;
                }
            }
        }

        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteKind;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(1);
        state.start_game();
        state.asteroids.clear();
        state
    }

    fn spawn_asteroid(state: &mut GameState, position: Vec2, scale: f32) {
        let rng = &mut state.rng;
        state.asteroids.add_asteroid(scale, Some(position), rng);
    }

    fn spawn_shot_at(state: &mut GameState, position: Vec2) {
        let mut events = Vec::new();
        state.shots.add_shot(position, Vec2::ZERO, &mut events);
    }

    #[test]
    fn test_circle_collide_strict_inequality() {
        // Two shots (radius 5 each) exactly 10 apart: touching, no collision
        let a = Body::new(SpriteKind::Shot, Vec2::new(0.0, 0.0));
        let b = Body::new(SpriteKind::Shot, Vec2::new(10.0, 0.0));
        assert!(!circle_collide(&a, &b));

        let c = Body::new(SpriteKind::Shot, Vec2::new(9.9, 0.0));
        assert!(circle_collide(&a, &c));
    }

    #[test]
    fn test_shot_destroys_large_asteroid_and_splits() {
        let mut state = playing_state();
        // Away from the ship so the split children cannot clip it
        let pos = Vec2::new(650.0, 120.0);
        spawn_asteroid(&mut state, pos, ASTEROID_SCALE_LARGE);
        spawn_shot_at(&mut state, pos);

        resolve_collisions(&mut state);

        assert_eq!(state.score, SCORE_PER_ASTEROID);
        assert_eq!(state.explosions.len(), 1);
        // Parent is dead but not yet reaped; two medium children spawned
        let children: Vec<_> = state
            .asteroids
            .iter()
            .filter(|a| !a.body().dead)
            .collect();
        assert_eq!(children.len(), 2);
        for child in children {
            assert_eq!(child.scale(), ASTEROID_SCALE_MEDIUM);
            assert_eq!(child.body().position(), pos);
        }
        // The shot died with the asteroid
        assert!(state.shots.iter().all(|s| s.body().dead));
    }

    #[test]
    fn test_medium_splits_into_smalls() {
        let mut state = playing_state();
        let pos = Vec2::new(200.0, 200.0);
        spawn_asteroid(&mut state, pos, ASTEROID_SCALE_MEDIUM);
        spawn_shot_at(&mut state, pos);

        resolve_collisions(&mut state);

        let children: Vec<_> = state
            .asteroids
            .iter()
            .filter(|a| !a.body().dead)
            .collect();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.scale() == ASTEROID_SCALE_SMALL));
    }

    #[test]
    fn test_small_asteroid_yields_no_children() {
        let mut state = playing_state();
        let pos = Vec2::new(200.0, 200.0);
        spawn_asteroid(&mut state, pos, ASTEROID_SCALE_SMALL);
        spawn_shot_at(&mut state, pos);

        resolve_collisions(&mut state);

        assert_eq!(state.score, SCORE_PER_ASTEROID);
        assert!(state.asteroids.iter().all(|a| a.body().dead));
    }

    #[test]
    fn test_score_per_hit_regardless_of_splits() {
        let mut state = playing_state();
        spawn_asteroid(&mut state, Vec2::new(100.0, 100.0), ASTEROID_SCALE_LARGE);
        spawn_shot_at(&mut state, Vec2::new(100.0, 100.0));
        resolve_collisions(&mut state);
        assert_eq!(state.score, SCORE_PER_ASTEROID);
    }

    #[test]
    fn test_ship_collision_costs_a_life_and_arms_respawn() {
        let mut state = playing_state();
        let ship_pos = state.ship.body().position();
        spawn_asteroid(&mut state, ship_pos, ASTEROID_SCALE_LARGE);
        state.ship.thrust = true;

        resolve_collisions(&mut state);

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert!(state.ship.body().dead);
        assert!(!state.ship.thrust);
        assert_eq!(state.respawn_ticks, RESPAWN_DELAY_TICKS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_last_life_transitions_to_menu() {
        let mut state = playing_state();
        state.lives = 1;
        let ship_pos = state.ship.body().position();
        spawn_asteroid(&mut state, ship_pos, ASTEROID_SCALE_LARGE);

        resolve_collisions(&mut state);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.respawn_ticks, 0);
        assert!(state.events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_dead_ship_cannot_lose_another_life() {
        let mut state = playing_state();
        let ship_pos = state.ship.body().position();
        // Two overlapping asteroids on the ship; only the first connects
        spawn_asteroid(&mut state, ship_pos, ASTEROID_SCALE_LARGE);
        spawn_asteroid(&mut state, ship_pos, ASTEROID_SCALE_LARGE);

        resolve_collisions(&mut state);

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_shot_kill_preempts_ship_collision_same_tick() {
        let mut state = playing_state();
        let ship_pos = state.ship.body().position();
        spawn_asteroid(&mut state, ship_pos, ASTEROID_SCALE_SMALL);
        spawn_shot_at(&mut state, ship_pos);

        resolve_collisions(&mut state);

        // The shot killed the asteroid first, so the ship is untouched
        assert!(!state.ship.body().dead);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.score, SCORE_PER_ASTEROID);
    }

    #[test]
    fn test_one_shot_kills_at_most_one_asteroid() {
        let mut state = playing_state();
        let pos = Vec2::new(300.0, 300.0);
        spawn_asteroid(&mut state, pos, ASTEROID_SCALE_SMALL);
        spawn_asteroid(&mut state, pos, ASTEROID_SCALE_SMALL);
        spawn_shot_at(&mut state, pos);

        resolve_collisions(&mut state);

        assert_eq!(state.score, SCORE_PER_ASTEROID);
        let survivors = state.asteroids.iter().filter(|a| !a.body().dead).count();
        assert_eq!(survivors, 1);
    }

    proptest! {
        #[test]
        fn prop_circle_collide_symmetric(
            ax in 0.0f32..800.0, ay in 0.0f32..600.0,
            bx in 0.0f32..800.0, by in 0.0f32..600.0,
        ) {
            let a = Body::new(SpriteKind::Asteroid, Vec2::new(ax, ay));
            let b = Body::new(SpriteKind::Shot, Vec2::new(bx, by));
            prop_assert_eq!(circle_collide(&a, &b), circle_collide(&b, &a));
        }
    }
}
