//! Background music using Kira.
//!
//! Playback is fire-and-forget: the game loop calls in, nothing here ever
//! blocks a tick, and every backend failure is logged and dropped.

use std::path::Path;

use anyhow::{Context, Result};
use engine_core::Soundtrack;
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
};

/// Volume actually sent to the backend.
fn output_volume(volume: f64, muted: bool) -> f64 {
    if muted {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Main audio system: owns the device and the looping music track.
pub struct AudioSystem {
    manager: AudioManager,
    music: Option<StaticSoundHandle>,
    /// Volume requested by the game (restored when unmuting).
    volume: f64,
    muted: bool,
}

impl AudioSystem {
    /// Open the default audio device.
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .context("failed to open audio device")?;

        Ok(Self {
            manager,
            music: None,
            volume: 0.5,
            muted: false,
        })
    }

    /// Load `path` and loop it as background music, replacing any current track.
    pub fn play_music(&mut self, path: &Path, volume: f64) -> Result<()> {
        let sound_data = StaticSoundData::from_file(path)
            .with_context(|| format!("failed to load music {:?}", path))?;

        self.stop_background_music();
        self.set_volume(volume);

        let settings = StaticSoundSettings::new()
            .volume(output_volume(self.volume, self.muted))
            .loop_region(..);
        let handle = self.manager.play(sound_data.with_settings(settings))?;
        self.music = Some(handle);
        log::info!("Playing background music {:?}", path);
        Ok(())
    }

    /// Stop and rewind the music track.
    pub fn stop_background_music(&mut self) {
        if let Some(mut handle) = self.music.take() {
            let _ = handle.stop(Tween::default());
        }
    }

    /// Set the music volume (0.0 to 1.0). Takes effect immediately unless muted.
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
        self.apply_volume();
    }

    /// Pause the music, e.g. while the window is in the background.
    pub fn pause(&mut self) {
        if let Some(handle) = &mut self.music {
            let _ = handle.pause(Tween::default());
        }
    }

    pub fn resume(&mut self) {
        if let Some(handle) = &mut self.music {
            let _ = handle.resume(Tween::default());
        }
    }

    fn apply_volume(&mut self) {
        let volume = output_volume(self.volume, self.muted);
        if let Some(handle) = &mut self.music {
            let _ = handle.set_volume(volume, Tween::default());
        }
    }
}

impl Soundtrack for AudioSystem {
    fn play_background_music(&mut self, track: &Path, volume: f64) {
        if let Err(e) = self.play_music(track, volume) {
            log::warn!("Background music unavailable: {:#}", e);
        }
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.apply_volume();
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
    }
}
