//! Boundaries between the simulation and the outside world.
//!
//! The game core never draws, plays sound or touches UI directly. It pushes
//! plain values through these traits once per tick and never waits on them.

use std::path::Path;

use hecs::Entity;

use crate::{ChunkCoord, Transform};

/// Stable identity of one visual in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKey {
    /// Ground patch of a loaded chunk.
    Terrain(ChunkCoord),
    /// Decoration `index` of a loaded chunk.
    Tree(ChunkCoord, u16),
    Creature(Entity),
    PowerUp(Entity),
    /// Pulsing marker hovering above a power-up.
    Beacon(Entity),
    Character,
}

/// A visual handed to the scene graph when its entity comes into existence.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub key: VisualKey,
    /// Model name the renderer resolves to meshes/materials (e.g. `"tree/pine"`).
    pub model: &'static str,
    pub transform: Transform,
    /// Optional per-instance color multiplier.
    pub tint: Option<[f32; 3]>,
}

/// How the player character should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterStyle {
    pub scale: f32,
    /// Glowing material while superhuman.
    pub empowered: bool,
}

impl Default for CharacterStyle {
    fn default() -> Self {
        Self {
            scale: 1.0,
            empowered: false,
        }
    }
}

/// Limb angles of the character rig, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CharacterPose {
    /// Rotation about X.
    pub left_leg: f32,
    pub right_leg: f32,
    /// Rotation about Z.
    pub left_arm: f32,
    pub right_arm: f32,
}

/// Scene graph collaborator (renderer side).
pub trait SceneGraph {
    fn add(&mut self, visual: Visual);
    /// Removing an unknown key is a no-op.
    fn remove(&mut self, key: VisualKey);
    fn set_transform(&mut self, key: VisualKey, transform: Transform);
    fn set_character_style(&mut self, style: CharacterStyle);
    fn set_character_pose(&mut self, _pose: CharacterPose) {}
}

/// Fire-and-forget music collaborator.
pub trait Soundtrack {
    fn play_background_music(&mut self, track: &Path, volume: f64);
    fn toggle_mute(&mut self);
}

/// A missing audio device just means silence.
impl<T: Soundtrack> Soundtrack for Option<T> {
    fn play_background_music(&mut self, track: &Path, volume: f64) {
        if let Some(inner) = self {
            inner.play_background_music(track, volume);
        }
    }

    fn toggle_mute(&mut self) {
        if let Some(inner) = self {
            inner.toggle_mute();
        }
    }
}

/// Values shown by the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudSnapshot {
    pub score: u32,
    /// Whole seconds of superhuman time left, `None` outside superhuman mode.
    pub countdown: Option<u32>,
    pub game_over: bool,
}

/// HUD collaborator. Only receives values; nothing in the core reads it back.
pub trait Hud {
    fn present(&mut self, snapshot: &HudSnapshot);
}
