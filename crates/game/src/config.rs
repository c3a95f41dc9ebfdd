//! Game configuration (window, world streaming, tuning). Loaded from config.ron at startup.
//!
//! Every gameplay constant lives here so the whole feel of the game can be
//! retuned without a rebuild. Distances are world units, speeds are units per
//! tick, and the tick rate defaults to 60 Hz.

use procgen::ChunkGenConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a config file is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config syntax: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("superhuman_secs {secs} at tick_rate {tick_rate} overflows the tick counter")]
    DurationOverflow { secs: u32, tick_rate: u32 },
    #[error("chunk_radius must not be negative, got {0}")]
    NegativeRadius(i32),
    #[error("power_up_chance must be within [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),
}

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Window ──────────────────────────────────────────────────────────
    /// Window width in logical pixels.
    pub window_width: u32,
    /// Window height in logical pixels.
    pub window_height: u32,

    // ── World streaming ─────────────────────────────────────────────────
    /// Seed for ground shade and tree groves. `None` picks one at random.
    pub world_seed: Option<u64>,
    /// Edge length of a chunk.
    pub chunk_size: f32,
    /// Chunks kept loaded on each side of the player's chunk.
    pub chunk_radius: i32,
    pub creatures_per_chunk: usize,
    pub trees_per_chunk: usize,
    /// Chance that a chunk holds a power-up.
    pub power_up_chance: f64,
    /// Creatures generated closer than this to the player are pushed out to it.
    pub spawn_clearance: f32,

    // ── Character ───────────────────────────────────────────────────────
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub character_radius: f32,

    // ── Creatures ───────────────────────────────────────────────────────
    pub creature_speed: f32,
    /// Speed multiplier while fleeing.
    pub flee_speed_multiplier: f32,
    /// Fraction of the way velocity moves toward its target each tick.
    pub steering_smoothing: f32,
    /// Fraction of the remaining heading error turned each tick.
    pub turn_rate: f32,
    /// Creatures farther than this are skipped by collision checks.
    pub creature_cutoff: f32,

    // ── Modes & scoring ─────────────────────────────────────────────────
    /// Superhuman duration in seconds.
    pub superhuman_secs: u32,
    pub superhuman_speed_multiplier: f32,
    pub superhuman_scale: f32,
    /// Bubble radius = character_radius × multiplier.
    pub normal_bubble_multiplier: f32,
    pub superhuman_bubble_multiplier: f32,
    pub power_up_radius: f32,
    pub consume_score: u32,
    pub escape_score: u32,

    // ── Timing & audio ──────────────────────────────────────────────────
    /// Fixed gameplay ticks per second.
    pub tick_rate: u32,
    /// Looping background track; missing file means silence.
    pub music_path: Option<PathBuf>,
    pub music_volume: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            world_seed: None,
            chunk_size: 50.0,
            chunk_radius: 2,
            creatures_per_chunk: 3,
            trees_per_chunk: 8,
            power_up_chance: 0.2,
            spawn_clearance: 5.0,
            move_speed: 0.1,
            gravity: 0.015,
            jump_force: 0.3,
            character_radius: 0.5,
            creature_speed: 0.05,
            flee_speed_multiplier: 1.5,
            steering_smoothing: 0.1,
            turn_rate: 0.1,
            creature_cutoff: 5.0,
            superhuman_secs: 10,
            superhuman_speed_multiplier: 2.0,
            superhuman_scale: 2.0,
            normal_bubble_multiplier: 2.0,
            superhuman_bubble_multiplier: 4.0,
            power_up_radius: 1.5,
            consume_score: 100,
            escape_score: 50,
            tick_rate: 60,
            music_path: Some(PathBuf::from("assets/background_music.ogg")),
            music_volume: 0.5,
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        let Ok(data) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match Self::from_ron_str(&data) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Parse and validate a RON document.
    pub fn from_ron_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("chunk_size", self.chunk_size as f64),
            ("move_speed", self.move_speed as f64),
            ("creature_speed", self.creature_speed as f64),
            ("character_radius", self.character_radius as f64),
            ("power_up_radius", self.power_up_radius as f64),
            ("tick_rate", self.tick_rate as f64),
            ("superhuman_secs", self.superhuman_secs as f64),
        ];
        for (field, value) in positive {
            if value <= 0.0 || value.is_nan() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.superhuman_secs.checked_mul(self.tick_rate).is_none() {
            return Err(ConfigError::DurationOverflow {
                secs: self.superhuman_secs,
                tick_rate: self.tick_rate,
            });
        }
        if self.chunk_radius < 0 {
            return Err(ConfigError::NegativeRadius(self.chunk_radius));
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return Err(ConfigError::ProbabilityOutOfRange(self.power_up_chance));
        }
        Ok(())
    }

    /// Chunk generator settings derived from this config.
    pub fn chunk_gen(&self, world_seed: u64) -> ChunkGenConfig {
        ChunkGenConfig {
            chunk_size: self.chunk_size,
            trees_per_chunk: self.trees_per_chunk,
            creatures_per_chunk: self.creatures_per_chunk,
            power_up_chance: self.power_up_chance,
            world_seed,
        }
    }

    /// Superhuman duration in ticks.
    pub fn superhuman_ticks(&self) -> u32 {
        self.superhuman_secs.saturating_mul(self.tick_rate)
    }

    /// Chunks in a full streaming window.
    pub fn window_chunk_count(&self) -> usize {
        let side = (2 * self.chunk_radius + 1) as usize;
        side * side
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
