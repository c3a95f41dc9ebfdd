//! Creatures and their steering.
//!
//! A creature either pursues or flees the player; the game mode decides
//! which, creatures never switch on their own. Steering is planar: creatures
//! stay on the ground even while the player is mid-jump.

use std::f32::consts::{PI, TAU};

use engine_core::{Transform, Vec3, Velocity};
use hecs::World;

use crate::config::GameConfig;

/// Below this squared speed the heading is left alone (no direction to face).
const MIN_TURN_SPEED_SQ: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Pursuing,
    Fleeing,
}

/// Creature component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Creature {
    pub behavior: Behavior,
    /// Base speed in units per tick.
    pub speed: f32,
    /// Yaw in radians; 0 faces +Z.
    pub heading: f32,
}

impl Creature {
    pub const MODEL: &'static str = "creature/lizard";

    pub fn new(speed: f32, heading: f32, behavior: Behavior) -> Self {
        Self {
            behavior,
            speed,
            heading,
        }
    }

    /// Switch behavior. A real switch drops the current velocity so the
    /// creature turns around from rest instead of drifting.
    pub fn set_behavior(&mut self, behavior: Behavior, velocity: &mut Velocity) {
        if self.behavior != behavior {
            self.behavior = behavior;
            velocity.reset();
        }
    }
}

/// Steering tuning shared by all creatures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub flee_multiplier: f32,
    /// Velocity smoothing factor per tick.
    pub smoothing: f32,
    /// Fraction of remaining heading error turned per tick.
    pub turn_rate: f32,
}

impl Default for Steering {
    fn default() -> Self {
        Self {
            flee_multiplier: 1.5,
            smoothing: 0.1,
            turn_rate: 0.1,
        }
    }
}

impl From<&GameConfig> for Steering {
    fn from(config: &GameConfig) -> Self {
        Self {
            flee_multiplier: config.flee_speed_multiplier,
            smoothing: config.steering_smoothing,
            turn_rate: config.turn_rate,
        }
    }
}

/// Wrap an angle into [-π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

impl Steering {
    /// Advance one creature by one tick relative to `target`.
    pub fn step(
        &self,
        creature: &mut Creature,
        transform: &mut Transform,
        velocity: &mut Velocity,
        target: Vec3,
    ) {
        let offset = target - transform.position;
        let toward = Vec3::new(offset.x, 0.0, offset.z).normalize_or_zero();

        let desired = match creature.behavior {
            Behavior::Pursuing => toward * creature.speed,
            Behavior::Fleeing => -toward * creature.speed * self.flee_multiplier,
        };
        velocity.smooth_toward(desired, self.smoothing);
        transform.translate(velocity.linear);

        let v = velocity.linear;
        if v.length_squared() > MIN_TURN_SPEED_SQ {
            let target_heading = v.x.atan2(v.z);
            let diff = wrap_angle(target_heading - creature.heading);
            creature.heading = wrap_angle(creature.heading + diff * self.turn_rate);
            transform.set_yaw(creature.heading);
        }
    }

    /// Advance every creature in `world` by one tick.
    pub fn update_all(&self, world: &mut World, target: Vec3) {
        for (_, (transform, velocity, creature)) in
            world.query_mut::<(&mut Transform, &mut Velocity, &mut Creature)>()
        {
            self.step(creature, transform, velocity, target);
        }
    }
}

/// Put every creature in `world` into `behavior`.
pub fn set_all_behavior(world: &mut World, behavior: Behavior) -> usize {
    let mut changed = 0;
    for (_, (velocity, creature)) in world.query_mut::<(&mut Velocity, &mut Creature)>() {
        if creature.behavior != behavior {
            creature.set_behavior(behavior, velocity);
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creature_at(x: f32, z: f32, behavior: Behavior) -> (Creature, Transform, Velocity) {
        (
            Creature::new(0.05, 0.0, behavior),
            Transform::from_position(Vec3::new(x, 0.0, z)),
            Velocity::default(),
        )
    }

    #[test]
    fn pursuing_closes_distance() {
        let steering = Steering::default();
        let (mut c, mut t, mut v) = creature_at(10.0, 0.0, Behavior::Pursuing);
        for _ in 0..50 {
            steering.step(&mut c, &mut t, &mut v, Vec3::ZERO);
        }
        assert!(t.position.x < 10.0);
        assert!(t.position.x > 0.0);
    }

    #[test]
    fn fleeing_opens_distance() {
        let steering = Steering::default();
        let (mut c, mut t, mut v) = creature_at(10.0, 0.0, Behavior::Fleeing);
        for _ in 0..50 {
            steering.step(&mut c, &mut t, &mut v, Vec3::ZERO);
        }
        assert!(t.position.x > 10.0);
    }

    #[test]
    fn velocity_is_smoothed_not_snapped() {
        let steering = Steering::default();
        let (mut c, mut t, mut v) = creature_at(10.0, 0.0, Behavior::Pursuing);
        steering.step(&mut c, &mut t, &mut v, Vec3::ZERO);
        // One tick from rest reaches 10% of full speed.
        assert!((v.linear.length() - 0.005).abs() < 1e-6);
        assert!((t.position.x - 9.995).abs() < 1e-5);
    }

    /// At equal distance, fleeing moves farther per tick than pursuing.
    #[test]
    fn fleeing_displacement_exceeds_pursuit() {
        let steering = Steering::default();
        for distance in [0.5_f32, 3.0, 20.0] {
            let (mut pc, mut pt, mut pv) = creature_at(distance, 0.0, Behavior::Pursuing);
            let (mut fc, mut ft, mut fv) = creature_at(distance, 0.0, Behavior::Fleeing);
            let p0 = pt.position;
            let f0 = ft.position;
            steering.step(&mut pc, &mut pt, &mut pv, Vec3::ZERO);
            steering.step(&mut fc, &mut ft, &mut fv, Vec3::ZERO);
            let pursue = (pt.position - p0).length();
            let flee = (ft.position - f0).length();
            assert!(pursue > 0.0);
            assert!(flee > pursue, "flee {} <= pursue {} at {}", flee, pursue, distance);
        }
    }

    #[test]
    fn creature_on_top_of_target_stays_finite() {
        let steering = Steering::default();
        let (mut c, mut t, mut v) = creature_at(0.0, 0.0, Behavior::Pursuing);
        for _ in 0..10 {
            steering.step(&mut c, &mut t, &mut v, Vec3::ZERO);
        }
        assert!(t.position.is_finite());
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(c.heading, 0.0);
    }

    #[test]
    fn steering_ignores_target_height() {
        let steering = Steering::default();
        let (mut c, mut t, mut v) = creature_at(5.0, 0.0, Behavior::Pursuing);
        steering.step(&mut c, &mut t, &mut v, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(t.position.y, 0.0);
    }

    #[test]
    fn heading_turns_the_short_way() {
        let steering = Steering::default();
        // Facing just shy of +π, wanting to face just past -π: the short way is
        // a small positive turn through π, not a full reverse sweep.
        let mut c = Creature::new(0.05, PI - 0.1, Behavior::Pursuing);
        let mut t = Transform::from_position(Vec3::ZERO);
        let target_heading = -PI + 0.1;
        let mut v = Velocity::new(Vec3::new(target_heading.sin(), 0.0, target_heading.cos()) * 0.05);
        // Target far along the velocity so the desired direction agrees.
        let target = Vec3::new(target_heading.sin(), 0.0, target_heading.cos()) * 100.0;
        steering.step(&mut c, &mut t, &mut v, target);
        let turned = wrap_angle(c.heading - (PI - 0.1));
        assert!(turned > 0.0 && turned < 0.05, "turned {}", turned);
    }

    #[test]
    fn wrap_angle_range() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5 || (wrap_angle(3.0 * PI) + PI).abs() < 1e-5);
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(-TAU - 0.5) + 0.5).abs() < 1e-5);
    }

    #[test]
    fn behavior_switch_resets_velocity_once() {
        let mut c = Creature::new(0.05, 0.0, Behavior::Pursuing);
        let mut v = Velocity::new(Vec3::X);
        c.set_behavior(Behavior::Pursuing, &mut v);
        assert_eq!(v.linear, Vec3::X);
        c.set_behavior(Behavior::Fleeing, &mut v);
        assert_eq!(v.linear, Vec3::ZERO);
        assert_eq!(c.behavior, Behavior::Fleeing);
    }

    #[test]
    fn set_all_behavior_flips_world() {
        let mut world = World::new();
        for i in 0..4 {
            let (c, t, v) = creature_at(i as f32, 0.0, Behavior::Pursuing);
            world.spawn((c, t, v));
        }
        assert_eq!(set_all_behavior(&mut world, Behavior::Fleeing), 4);
        assert_eq!(set_all_behavior(&mut world, Behavior::Fleeing), 0);
        assert!(world
            .query_mut::<&Creature>()
            .into_iter()
            .all(|(_, c)| c.behavior == Behavior::Fleeing));
    }
}
