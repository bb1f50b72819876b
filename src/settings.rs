//! Player settings
//!
//! Persisted through the scalar pref store, loaded once at menu entry and
//! written back on every change.

use serde::{Deserialize, Serialize};

use crate::audio::AudioSurface;
use crate::prefs::{PrefsStore, VIBRATION_KEY, VOLUME_KEY};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    /// Haptic feedback on elimination
    pub vibration: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            vibration: true,
        }
    }
}

impl Settings {
    /// Load from the pref store, falling back to defaults per key
    pub fn load(prefs: &dyn PrefsStore) -> Self {
        Self {
            volume: prefs.get_float(VOLUME_KEY, 1.0).clamp(0.0, 1.0),
            vibration: prefs.get_int(VIBRATION_KEY, 1) == 1,
        }
    }

    pub fn save(&self, prefs: &mut dyn PrefsStore) {
        prefs.set_float(VOLUME_KEY, self.volume);
        prefs.set_int(VIBRATION_KEY, if self.vibration { 1 } else { 0 });
    }

    /// Change the volume, persist it and push it to the audio surface
    pub fn set_volume(
        &mut self,
        volume: f32,
        prefs: &mut dyn PrefsStore,
        audio: &mut dyn AudioSurface,
    ) {
        self.volume = volume.clamp(0.0, 1.0);
        audio.set_volume(self.volume);
        self.save(prefs);
    }

    pub fn set_vibration(&mut self, enabled: bool, prefs: &mut dyn PrefsStore) {
        self.vibration = enabled;
        self.save(prefs);
    }

    /// Apply the stored volume to a freshly constructed audio surface
    pub fn apply(&self, audio: &mut dyn AudioSurface) {
        audio.set_volume(self.volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::prefs::MemoryPrefs;

    #[test]
    fn test_defaults_without_stored_keys() {
        let prefs = MemoryPrefs::new();
        let settings = Settings::load(&prefs);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut prefs = MemoryPrefs::new();
        let settings = Settings {
            volume: 0.25,
            vibration: false,
        };
        settings.save(&mut prefs);
        assert_eq!(Settings::load(&prefs), settings);
    }

    #[test]
    fn test_set_volume_clamps_and_persists() {
        let mut prefs = MemoryPrefs::new();
        let mut audio = NullAudio;
        let mut settings = Settings::default();

        settings.set_volume(1.7, &mut prefs, &mut audio);
        assert_eq!(settings.volume, 1.0);

        settings.set_volume(-0.5, &mut prefs, &mut audio);
        assert_eq!(settings.volume, 0.0);
        assert_eq!(Settings::load(&prefs).volume, 0.0);
    }
}
