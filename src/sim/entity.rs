//! Shared entity kinematics and the generic entity collection
//!
//! Every simulated object (ship, shot, asteroid, explosion) carries a [`Body`]
//! with the common state: position, velocity, rotation, spin, scale, the
//! derived collision radius, an animation frame index, and a dead flag.
//! Variant-specific behavior lives on the variant structs in `state`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::{self, SpriteKind};
use crate::draw::DrawCommand;
use crate::{normalize_degrees, wrap_position};

/// Common kinematic state for one simulated object.
///
/// Mutators with derived state go through methods: `set_position` applies the
/// toroidal wrap when enabled, `set_rotation` normalizes to [0, 360),
/// `set_frame` clamps into the sheet, and `set_scale` recomputes the
/// collision radius from the base sprite half-width.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    position: Vec2,
    pub velocity: Vec2,
    /// Degrees, normalized to [0, 360)
    rotation: f32,
    /// Degrees per tick
    pub spin: f32,
    scale: f32,
    base_radius: f32,
    radius: f32,
    frame: usize,
    frame_count: usize,
    /// Whether `set_position` wraps at the canvas edges
    pub wrap: bool,
    /// Marks the entity for reaping; a dead entity draws nothing
    pub dead: bool,
}

impl Body {
    /// New body at `position` with the sprite's unscaled radius, frame 0,
    /// no motion, wrap disabled.
    pub fn new(kind: SpriteKind, position: Vec2) -> Self {
        let sheet = assets::sheet(kind);
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            spin: 0.0,
            scale: 1.0,
            base_radius: sheet.base_radius(),
            radius: sheet.base_radius(),
            frame: 0,
            frame_count: sheet.frame_count,
            wrap: false,
            dead: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Set the position, wrapping onto the canvas when wrap is enabled
    pub fn set_position(&mut self, value: Vec2) {
        self.position = if self.wrap { wrap_position(value) } else { value };
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_degrees(degrees);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the visual scale and recompute the collision radius
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.radius = self.base_radius * scale;
    }

    /// Collision radius (base sprite half-width times scale)
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Set the animation frame, clamped into [0, frame_count)
    pub fn set_frame(&mut self, frame: usize) {
        self.frame = frame.min(self.frame_count - 1);
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Advance one tick: apply velocity (with wrap) and spin
    pub fn step(&mut self) {
        self.set_position(self.position + self.velocity);
        self.set_rotation(self.rotation + self.spin);
    }
}

/// Capability set shared by every managed entity kind
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Advance this entity by one tick
    fn update(&mut self);

    fn is_dead(&self) -> bool {
        self.body().dead
    }
}

/// Homogeneous collection owner for one entity kind.
///
/// Owns the update-and-reap pass and bulk draw dispatch. Entities are kept in
/// spawn order; reaping compacts after the update pass so survivors are never
/// skipped or double-processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityManager<T> {
    entities: Vec<T>,
}

impl<T> Default for EntityManager<T> {
    fn default() -> Self {
        Self { entities: Vec::new() }
    }
}

impl<T: Entity> EntityManager<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update every entity, then remove the dead ones
    pub fn update(&mut self) {
        for entity in &mut self.entities {
            entity.update();
        }
        self.entities.retain(|e| !e.is_dead());
    }

    /// Emit a draw command per live entity, in collection order
    pub fn draw(&self, kind: SpriteKind, out: &mut Vec<DrawCommand>) {
        for entity in &self.entities {
            if let Some(cmd) = DrawCommand::for_body(kind, entity.body()) {
                out.push(cmd);
            }
        }
    }

    pub fn push(&mut self, entity: T) {
        self.entities.push(entity);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entities.iter_mut()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entities.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
