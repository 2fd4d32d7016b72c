//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = one frame)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use collision::{circle_collide, resolve_collisions};
pub use entity::{Body, Entity, EntityManager};
pub use state::{
    Asteroid, AsteroidManager, Explosion, ExplosionManager, GameEvent, GamePhase, GameState, Ship,
    Shot, ShotManager,
};
pub use tick::{TickInput, tick};
