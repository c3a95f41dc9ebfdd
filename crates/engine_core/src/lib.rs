//! Core engine types and utilities for Flaneur.
//!
//! This crate provides the foundational types used across all game systems:
//! - Transform and motion components
//! - Fixed-step time management
//! - Chunk grid addressing
//! - Collaborator boundaries (scene graph, soundtrack, HUD)

pub mod components;
pub mod grid;
pub mod ports;
pub mod time;
pub mod transform;

pub use components::*;
pub use grid::*;
pub use ports::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec2, Vec3};
pub use hecs::{Entity, World};
