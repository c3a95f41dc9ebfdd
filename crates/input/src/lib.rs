//! Keyboard state sampled once per game tick.
//!
//! The simulation only asks "is this key held right now"; the per-tick
//! pressed set exists for one-shot actions (mute, restart) so holding a key
//! does not retrigger them every tick.

use glam::Vec2;
use std::collections::HashSet;

/// Manages keyboard state between ticks.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed since the last tick consumed input.
    keys_pressed: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear one-shot state. Call after each tick has read the input.
    pub fn end_tick(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.keys_held.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Forget every held key (e.g. when the window loses focus and the
    /// matching release events will never arrive).
    pub fn release_all(&mut self) {
        if !self.keys_held.is_empty() {
            log::debug!("Releasing {} held keys", self.keys_held.len());
        }
        self.keys_held.clear();
        self.keys_pressed.clear();
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed since the last tick.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Planar movement from the arrow keys (or WASD).
    ///
    /// `x` is -1 for left, +1 for right; `y` is -1 for up (away from the
    /// camera, world -Z) and +1 for down. Axes are not normalized, so a
    /// diagonal moves a full step on both axes.
    pub fn movement_axis(&self) -> Vec2 {
        let mut movement = Vec2::ZERO;

        if self.is_key_held(KeyCode::ArrowLeft) || self.is_key_held(KeyCode::KeyA) {
            movement.x -= 1.0;
        }
        if self.is_key_held(KeyCode::ArrowRight) || self.is_key_held(KeyCode::KeyD) {
            movement.x += 1.0;
        }
        if self.is_key_held(KeyCode::ArrowUp) || self.is_key_held(KeyCode::KeyW) {
            movement.y -= 1.0;
        }
        if self.is_key_held(KeyCode::ArrowDown) || self.is_key_held(KeyCode::KeyS) {
            movement.y += 1.0;
        }

        movement
    }

    /// Whether any movement key is held (drives the walk cycle).
    pub fn is_moving(&self) -> bool {
        self.movement_axis() != Vec2::ZERO
    }

    /// Check if jump is held (Space).
    pub fn is_jump_held(&self) -> bool {
        self.is_key_held(KeyCode::Space)
    }

    /// Check if mute was pressed (M).
    pub fn is_mute_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyM)
    }

    /// Check if restart was pressed (R or Enter).
    pub fn is_restart_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyR)
            || self.is_key_pressed(KeyCode::Enter)
            || self.is_key_pressed(KeyCode::NumpadEnter)
    }

    /// Check if quit was pressed (Escape).
    pub fn is_quit_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Escape)
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
