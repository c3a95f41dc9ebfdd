//! Central animation pass.
//!
//! Runs once per tick from the session. Everything that moves on its own
//! (tree sway, floating pickups, beacon pulse, the walk cycle) is a pure
//! function of the tick clock and per-entity oscillator parameters.

use std::f32::consts::FRAC_PI_4;

use engine_core::{CharacterPose, Quat, SceneGraph, Transform, Vec3, VisualKey};

use crate::power_up::{PowerUp, BEACON_HEIGHT};
use crate::registry::EntityRegistry;
use crate::streamer::WorldStreamer;

/// Walk cycle angular frequency, radians per second.
const STRIDE_FREQUENCY: f32 = 10.0;
const LEG_SWING: f32 = 0.5;
const ARM_SWING: f32 = 0.2;

/// Limb pose at `seconds`; the rest pose when not walking.
pub fn character_pose(seconds: f32, walking: bool) -> CharacterPose {
    let swing = if walking {
        (seconds * STRIDE_FREQUENCY).sin()
    } else {
        0.0
    };
    CharacterPose {
        left_leg: swing * LEG_SWING,
        right_leg: -swing * LEG_SWING,
        left_arm: FRAC_PI_4 + swing * ARM_SWING,
        right_arm: -FRAC_PI_4 - swing * ARM_SWING,
    }
}

/// Sway every loaded tree about its base.
pub fn sway_trees(seconds: f32, streamer: &WorldStreamer, scene: &mut dyn SceneGraph) {
    for chunk in streamer.chunks() {
        for (index, tree) in chunk.trees.iter().enumerate() {
            let lean = tree.sway.sample(seconds);
            let transform = Transform {
                position: tree.position,
                rotation: Quat::from_rotation_y(tree.yaw) * Quat::from_rotation_z(lean),
                scale: Vec3::splat(tree.scale),
            };
            scene.set_transform(VisualKey::Tree(chunk.coord, index as u16), transform);
        }
    }
}

/// Bob each power-up around its rest height and pulse its beacon.
///
/// The bobbed position is written back to the registry so pickups are
/// tested against where the power-up is drawn.
pub fn float_power_ups(seconds: f32, registry: &mut EntityRegistry, scene: &mut dyn SceneGraph) {
    for (entity, (transform, power_up)) in registry
        .world_mut()
        .query_mut::<(&mut Transform, &PowerUp)>()
    {
        transform.position = power_up.rest_position + Vec3::Y * power_up.bob.sample(seconds);
        scene.set_transform(VisualKey::PowerUp(entity), *transform);

        let beacon = Transform::from_position(power_up.rest_position + Vec3::Y * BEACON_HEIGHT)
            .with_uniform_scale(1.0 + power_up.pulse.sample(seconds));
        scene.set_transform(VisualKey::Beacon(entity), beacon);
    }
}
