//! Headless scene graph.
//!
//! Keeps the set of live visuals and the latest transform of each, exactly as
//! a renderer would receive them. The binary uses it as its scene (drawing
//! is someone else's job) and tests use it to check what the core announced.

use std::collections::HashMap;

use engine_core::{CharacterPose, CharacterStyle, SceneGraph, Transform, Visual, VisualKey};

#[derive(Debug, Default)]
pub struct SceneLedger {
    visuals: HashMap<VisualKey, Visual>,
    character_style: CharacterStyle,
    character_pose: CharacterPose,
    /// Total `add` calls, including re-adds.
    pub adds: usize,
    /// Total `remove` calls that hit a live visual.
    pub removes: usize,
}

impl SceneLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    pub fn contains(&self, key: VisualKey) -> bool {
        self.visuals.contains_key(&key)
    }

    pub fn get(&self, key: VisualKey) -> Option<&Visual> {
        self.visuals.get(&key)
    }

    /// Count live visuals matching a predicate on their key.
    pub fn count(&self, predicate: impl Fn(&VisualKey) -> bool) -> usize {
        self.visuals.keys().filter(|k| predicate(k)).count()
    }

    pub fn character_style(&self) -> CharacterStyle {
        self.character_style
    }

    pub fn character_pose(&self) -> CharacterPose {
        self.character_pose
    }
}

impl SceneGraph for SceneLedger {
    fn add(&mut self, visual: Visual) {
        self.adds += 1;
        if let Some(previous) = self.visuals.insert(visual.key, visual) {
            log::warn!("Visual {:?} added twice", previous.key);
        }
    }

    fn remove(&mut self, key: VisualKey) {
        if self.visuals.remove(&key).is_some() {
            self.removes += 1;
        }
    }

    fn set_transform(&mut self, key: VisualKey, transform: Transform) {
        if let Some(visual) = self.visuals.get_mut(&key) {
            visual.transform = transform;
        }
    }

    fn set_character_style(&mut self, style: CharacterStyle) {
        self.character_style = style;
    }

    fn set_character_pose(&mut self, pose: CharacterPose) {
        self.character_pose = pose;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{ChunkCoord, Vec3};

    fn terrain(x: i32) -> Visual {
        Visual {
            key: VisualKey::Terrain(ChunkCoord::new(x, 0)),
            model: "terrain/grass",
            transform: Transform::default(),
            tint: None,
        }
    }

    #[test]
    fn add_move_remove() {
        let mut scene = SceneLedger::new();
        scene.add(terrain(0));
        scene.add(terrain(1));
        let key = VisualKey::Terrain(ChunkCoord::new(1, 0));
        scene.set_transform(key, Transform::from_position(Vec3::X));
        assert_eq!(scene.get(key).map(|v| v.transform.position), Some(Vec3::X));

        scene.remove(key);
        scene.remove(key);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.removes, 1);
    }

    #[test]
    fn transform_of_unknown_visual_is_ignored() {
        let mut scene = SceneLedger::new();
        scene.set_transform(VisualKey::Character, Transform::default());
        assert!(scene.is_empty());
    }
}
