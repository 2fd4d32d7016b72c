//! Sprite sheet metadata
//!
//! The core never touches pixels. The host asset provider loads the actual
//! images; this module describes their layout (frame counts and dimensions)
//! so the simulation can derive collision radii and the draw list can name
//! sub-regions by frame index.

use serde::{Deserialize, Serialize};

/// Opaque handle naming one of the game's sprite sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    /// Two frames: idle, thrusting
    Ship,
    Shot,
    Asteroid,
    /// 24-frame animation
    Explosion,
}

/// Layout of a horizontal strip sprite sheet
#[derive(Debug, Clone, Copy)]
pub struct SpriteSheet {
    pub frame_width: f32,
    pub frame_height: f32,
    pub frame_count: usize,
}

/// A sub-region of a sheet, in sheet-local pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SpriteSheet {
    /// Collision radius of an unscaled frame (half the frame width)
    pub const fn base_radius(&self) -> f32 {
        self.frame_width / 2.0
    }

    /// Source rect for a frame index. Indexes past the end clamp to the
    /// last frame rather than reading off the strip.
    pub fn frame_rect(&self, frame: usize) -> FrameRect {
        let frame = frame.min(self.frame_count - 1);
        FrameRect {
            x: frame as f32 * self.frame_width,
            y: 0.0,
            width: self.frame_width,
            height: self.frame_height,
        }
    }
}

const SHIP_SHEET: SpriteSheet = SpriteSheet {
    frame_width: 90.0,
    frame_height: 90.0,
    frame_count: 2,
};

const SHOT_SHEET: SpriteSheet = SpriteSheet {
    frame_width: 10.0,
    frame_height: 10.0,
    frame_count: 1,
};

const ASTEROID_SHEET: SpriteSheet = SpriteSheet {
    frame_width: 90.0,
    frame_height: 90.0,
    frame_count: 1,
};

const EXPLOSION_SHEET: SpriteSheet = SpriteSheet {
    frame_width: 128.0,
    frame_height: 128.0,
    frame_count: 24,
};

/// Sheet layout for a sprite handle
pub const fn sheet(kind: SpriteKind) -> &'static SpriteSheet {
    match kind {
        SpriteKind::Ship => &SHIP_SHEET,
        SpriteKind::Shot => &SHOT_SHEET,
        SpriteKind::Asteroid => &ASTEROID_SHEET,
        SpriteKind::Explosion => &EXPLOSION_SHEET,
    }
}
