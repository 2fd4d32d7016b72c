//! Astroblast - a classic rock-blasting arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `assets`: Sprite sheet metadata (frame counts, sub-rect lookup)
//! - `draw`: Per-frame draw command list for the host renderer
//! - `audio`: Sound event routing to a host audio sink

pub mod assets;
pub mod audio;
pub mod draw;
pub mod sim;

pub use assets::SpriteKind;
pub use audio::{AudioRouter, AudioSink, NullAudio};
pub use draw::{DrawCommand, build_draw_list};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size - wrap-around math and spawn bounds share these
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Host frame pacing target (the core itself is tick-counted, not timed)
    pub const TICK_RATE_HZ: u32 = 60;

    /// Ship handling
    pub const SHIP_TURN_RATE: f32 = 5.0;
    pub const SHIP_THRUST_ACCEL: f32 = 0.1;
    /// Per-tick velocity decay, gives an asymptotic top speed under thrust
    pub const SHIP_DRAG: f32 = 0.99;

    /// Shot tuning
    pub const SHOT_SPEED: f32 = 3.0;
    pub const SHOT_TTL_TICKS: u32 = 80;
    pub const SHOT_COOLDOWN_TICKS: u32 = 15;

    /// Asteroid tuning
    pub const ASTEROID_SPEED: f32 = 1.0;
    pub const ASTEROID_MAX_SPIN: i32 = 10;
    pub const ASTEROID_SCALE_LARGE: f32 = 1.0;
    pub const ASTEROID_SCALE_MEDIUM: f32 = 0.75;
    pub const ASTEROID_SCALE_SMALL: f32 = 0.5;

    /// Score awarded per asteroid destroyed by a shot
    pub const SCORE_PER_ASTEROID: u64 = 1000;

    /// Game flow timers (ticks)
    pub const RESPAWN_DELAY_TICKS: u32 = 250;
    pub const TEXT_BLINK_TICKS: u32 = 30;

    pub const STARTING_LIVES: u32 = 3;
    pub const FIRST_WAVE_ASTEROIDS: u32 = 5;
}

/// Normalize a rotation in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(deg: f32) -> f32 {
    deg.rem_euclid(360.0)
}

/// Unit heading vector for a rotation in degrees.
///
/// Screen space has the y axis pointing down, so the angle is negated: a
/// rotation of 90 points the nose toward the top of the canvas.
#[inline]
pub fn heading_vector(rotation_deg: f32) -> Vec2 {
    let rad = (-rotation_deg).to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Wrap a point onto the toroidal canvas: each axis lands in [0, extent)
#[inline]
pub fn wrap_position(pos: Vec2) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, consts::CANVAS_WIDTH),
        wrap_axis(pos.y, consts::CANVAS_HEIGHT),
    )
}

#[inline]
fn wrap_axis(v: f32, extent: f32) -> f32 {
    let wrapped = v.rem_euclid(extent);
    // rem_euclid of a tiny negative rounds up to the extent itself
    if wrapped >= extent { wrapped - extent } else { wrapped }
}
