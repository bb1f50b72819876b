//! Audio playback surface
//!
//! The session fires cues and never observes a result; whatever backend
//! sits behind the trait (engine mixer, web audio, nothing at all) is
//! free to drop them.

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Music {
    MainMenu,
    /// Backends typically rotate through a gameplay playlist here
    Gameplay,
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sfx {
    ObstacleDestroyed,
    Win,
    GameOver,
    ButtonClick,
}

/// Fire-and-forget audio playback consumed by the session and the menu glue
pub trait AudioSurface {
    fn play_music(&mut self, track: Music);
    fn stop_music(&mut self);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    fn play_sfx(&mut self, cue: Sfx);
    /// Master volume, clamped to 0..=1
    fn set_volume(&mut self, volume: f32);
}

/// Silent backend for headless sessions and tests
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSurface for NullAudio {
    fn play_music(&mut self, _track: Music) {}
    fn stop_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
    fn play_sfx(&mut self, _cue: Sfx) {}
    fn set_volume(&mut self, _volume: f32) {}
}

/// Logs every cue; the demo bin's stand-in for a real mixer
#[derive(Debug)]
pub struct LogAudio {
    volume: f32,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self { volume: 1.0 }
    }
}

impl AudioSurface for LogAudio {
    fn play_music(&mut self, track: Music) {
        log::info!("audio: play music {:?} (volume {:.2})", track, self.volume);
    }

    fn stop_music(&mut self) {
        log::info!("audio: stop music");
    }

    fn pause_music(&mut self) {
        log::info!("audio: pause music");
    }

    fn resume_music(&mut self) {
        log::info!("audio: resume music");
    }

    fn play_sfx(&mut self, cue: Sfx) {
        log::info!("audio: sfx {:?}", cue);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        log::info!("audio: volume -> {:.2}", self.volume);
    }
}
