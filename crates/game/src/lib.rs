//! Flaneur game core.
//!
//! A character roams an endless, chunk-streamed landscape while creatures
//! chase it; power-ups turn the tables for a few seconds. Everything here is
//! headless: drawing, sound and HUD are reached through the collaborator
//! traits in `engine_core::ports`.

pub mod animation;
pub mod chunk;
pub mod collision;
pub mod config;
pub mod creature;
pub mod hud;
pub mod player;
pub mod power_up;
pub mod registry;
pub mod scene;
pub mod session;
pub mod spatial_hash;
pub mod state;
pub mod streamer;

pub use config::{ConfigError, GameConfig};
pub use session::{Io, TickReport, WorldState};
pub use state::GameMode;
