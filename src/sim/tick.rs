//! Fixed timestep simulation tick
//!
//! Advances the whole game by exactly one frame: input handling, ship
//! physics, collision resolution, manager update-and-reap passes, and
//! level-clear detection, in that order.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single tick, polled by the host
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Start/confirm (leaves the menu)
    pub start: bool,
}

/// Advance the game state by one tick.
///
/// The update pass completes before the host draws; nothing here suspends
/// mid-tick. Events for this tick accumulate in `state.events`.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.start_game();
            }
            // Cosmetic "press start" blink, toggles every 30 ticks
            if state.text_blink > 0 {
                state.text_blink -= 1;
            } else {
                state.text_blink = TEXT_BLINK_TICKS;
                state.text_visible = !state.text_visible;
            }
        }
        GamePhase::Playing => {
            let ship_body = state.ship.body_mut();
            if input.rotate_left {
                ship_body.set_rotation(ship_body.rotation() + SHIP_TURN_RATE);
            }
            if input.rotate_right {
                ship_body.set_rotation(ship_body.rotation() - SHIP_TURN_RATE);
            }
            state.ship.thrust = input.thrust;

            if input.fire {
                let heading = state.ship.heading();
                let muzzle = state.ship.body().position() + heading * state.ship.body().radius();
                state
                    .shots
                    .add_shot(muzzle, heading * SHOT_SPEED, &mut state.events);
            }

            // Respawn countdown; reaching exactly 0 revives the ship at
            // canvas center
            if state.respawn_ticks > 0 {
                state.respawn_ticks -= 1;
                if state.respawn_ticks == 0 {
                    state.ship.body_mut().dead = false;
                    state
                        .ship
                        .body_mut()
                        .set_position(Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0));
                    log::debug!("ship respawned");
                }
            }
        }
    }

    // Ship physics runs every tick in every phase, dead or not
    state.ship.update(&mut state.events);

    resolve_collisions(state);

    state.shots.update();
    state.asteroids.update();
    state.explosions.update();

    // Level-clear check. Runs in every phase: it seeds the drifting
    // menu-background wave and each new level alike.
    if state.asteroids.is_empty() {
        state.level += 1;
        let count = 3 + state.level * 2;
        state.asteroids.add_asteroids(count, &mut state.rng);
        state
            .events
            .push(GameEvent::WaveSpawned { level: state.level, count });
        log::debug!("wave spawned: level {}, {count} asteroids", state.level);
    }
}
