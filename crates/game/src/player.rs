//! Player character: movement and jump physics.

use engine_core::{Transform, Vec3};
use input::InputState;

use crate::config::GameConfig;

/// The player-controlled character.
#[derive(Debug, Clone)]
pub struct Character {
    pub transform: Transform,
    /// Vertical speed in units per tick.
    pub vertical_velocity: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub is_grounded: bool,
}

impl Character {
    pub const MODEL: &'static str = "character/flaneur";

    pub fn new(config: &GameConfig) -> Self {
        Self {
            transform: Transform::default(),
            vertical_velocity: 0.0,
            jump_force: config.jump_force,
            gravity: config.gravity,
            is_grounded: true,
        }
    }

    /// Advance one tick. `speed` is the mode-dependent move speed.
    pub fn update(&mut self, input: &InputState, speed: f32) {
        let axis = input.movement_axis();
        self.transform.translate(Vec3::new(axis.x * speed, 0.0, axis.y * speed));

        if self.is_grounded && input.is_jump_held() {
            self.vertical_velocity = self.jump_force;
            self.is_grounded = false;
        }

        if !self.is_grounded {
            self.transform.position.y += self.vertical_velocity;
            self.vertical_velocity -= self.gravity;

            if self.transform.position.y <= 0.0 {
                self.transform.position.y = 0.0;
                self.vertical_velocity = 0.0;
                self.is_grounded = true;
            }
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}
