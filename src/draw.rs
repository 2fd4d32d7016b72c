//! Draw command list for the host renderer
//!
//! The core produces one `DrawCommand` per live entity per frame; the host
//! owns the actual images and performs the blits. HUD values (lives, level,
//! score, menu text blink) are read straight off [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::{self, FrameRect, SpriteKind};
use crate::sim::entity::Body;
use crate::sim::state::{GamePhase, GameState};

/// One sprite blit request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    /// Which sheet to sample
    pub sprite: SpriteKind,
    /// Frame index into the sheet
    pub frame: usize,
    /// Source sub-rect for that frame
    pub src: FrameRect,
    /// World-space center of the sprite
    pub center: Vec2,
    /// Top-left blit offset (center minus the scaled radius)
    pub top_left: Vec2,
    /// Rotation in degrees, applied around the center by the host
    pub rotation: f32,
    pub scale: f32,
}

impl DrawCommand {
    /// Command for a body, or `None` when the body is dead
    pub fn for_body(sprite: SpriteKind, body: &Body) -> Option<Self> {
        if body.dead {
            return None;
        }
        let center = body.position();
        Some(Self {
            sprite,
            frame: body.frame(),
            src: assets::sheet(sprite).frame_rect(body.frame()),
            center,
            top_left: center - Vec2::splat(body.radius()),
            rotation: body.rotation(),
            scale: body.scale(),
        })
    }
}

/// Build the draw list for one frame: ship first, then shots, asteroids,
/// and explosions in collection order, back to front.
pub fn build_draw_list(state: &GameState) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    if let Some(cmd) = DrawCommand::for_body(SpriteKind::Ship, state.ship.body()) {
        out.push(cmd);
    }
    state.shots.draw(&mut out);
    state.asteroids.draw(&mut out);
    state.explosions.draw(&mut out);
    out
}

/// Whether the host should show the "press start" prompt this frame
pub fn menu_text_visible(state: &GameState) -> bool {
    state.phase == GamePhase::Menu && state.text_visible
}
