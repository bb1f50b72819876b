//! Menu and stage-progression glue
//!
//! Collaborator-owned bookkeeping around the session: which stage loads
//! next, the banner lifecycle, the interstitial gate and the end-screen
//! reset. None of this runs in the per-tick hot path; prefs are touched
//! only at stage boundaries.

use crate::ads::AdSurface;
use crate::audio::{AudioSurface, Music, Sfx};
use crate::consts;
use crate::prefs::{LAST_LEVEL_KEY, PrefsStore};
use crate::scene::{SceneId, SceneSurface};
use crate::settings::Settings;
use crate::sim::{Scheduler, TaskHandle};

/// Run `proceed` behind an interstitial when one is ready, immediately
/// otherwise. The ad surface owns the callback until the ad closes.
pub fn gate_on_interstitial<'a>(ads: &mut dyn AdSurface, proceed: Box<dyn FnOnce() + 'a>) {
    if ads.is_interstitial_ready() {
        ads.show_interstitial(proceed);
    } else {
        proceed();
    }
}

/// Menu entry: restore settings, apply them to the mixer, start the
/// menu music. Returns the loaded settings for the menu widgets.
pub fn enter_menu(prefs: &dyn PrefsStore, audio: &mut dyn AudioSurface) -> Settings {
    let settings = Settings::load(prefs);
    settings.apply(audio);
    audio.play_music(Music::MainMenu);
    settings
}

/// Play button: load the last played stage, or the first one.
pub fn play_pressed(
    prefs: &dyn PrefsStore,
    scenes: &mut dyn SceneSurface,
    audio: &mut dyn AudioSurface,
) {
    audio.play_sfx(Sfx::ButtonClick);
    let name = prefs.get_string(LAST_LEVEL_KEY, "Level1");
    let stage = match SceneId::from_name(&name) {
        Some(stage @ SceneId::Level(_)) => stage,
        _ => {
            log::debug!("stored stage {name:?} unusable, starting over");
            SceneId::Level(1)
        }
    };
    scenes.load(stage);
}

/// Stage entry: record it as the resume point and show the banner.
pub fn enter_stage(stage: SceneId, prefs: &mut dyn PrefsStore, ads: &mut dyn AdSurface) {
    prefs.set_string(LAST_LEVEL_KEY, &stage.as_name());
    ads.show_banner();
}

/// Stage exit: the banner only lives inside stages.
pub fn leave_stage(ads: &mut dyn AdSurface) {
    ads.hide_banner();
}

/// "Next level" on the win panel: interstitial-gated stage advance.
/// The final stage rolls the resume point back to the first level and
/// shows the end screen instead.
pub fn next_stage_pressed(
    current: SceneId,
    prefs: &mut dyn PrefsStore,
    ads: &mut dyn AdSurface,
    scenes: &mut dyn SceneSurface,
    audio: &mut dyn AudioSurface,
) {
    audio.play_sfx(Sfx::ButtonClick);
    gate_on_interstitial(ads, Box::new(move || advance_stage(current, prefs, scenes)));
}

fn advance_stage(current: SceneId, prefs: &mut dyn PrefsStore, scenes: &mut dyn SceneSurface) {
    if let Some(next) = current.next_level() {
        prefs.set_string(LAST_LEVEL_KEY, &next.as_name());
        scenes.load(next);
    } else if current.is_final_level() {
        prefs.set_string(LAST_LEVEL_KEY, &SceneId::Level(1).as_name());
        scenes.load(SceneId::End);
    } else {
        log::debug!("stage advance from {current:?} ignored");
    }
}

/// "Try again" on the loss panel: interstitial-gated stage reload.
pub fn retry_pressed(
    current: SceneId,
    ads: &mut dyn AdSurface,
    scenes: &mut dyn SceneSurface,
    audio: &mut dyn AudioSurface,
) {
    audio.play_sfx(Sfx::ButtonClick);
    gate_on_interstitial(ads, Box::new(move || scenes.load(current)));
}

/// Any "main menu" button.
pub fn main_menu_pressed(scenes: &mut dyn SceneSurface, audio: &mut dyn AudioSurface) {
    audio.play_sfx(Sfx::ButtonClick);
    scenes.load(SceneId::MainMenu);
}

/// The post-campaign thanks screen: holds for a fixed delay, then wipes
/// all persisted progress and returns to the menu.
pub struct EndScreen {
    scheduler: Scheduler,
    reset: Option<TaskHandle>,
}

impl EndScreen {
    pub fn new() -> Self {
        let mut scheduler = Scheduler::new();
        let reset = Some(scheduler.schedule_once(consts::END_SCREEN_DELAY));
        Self { scheduler, reset }
    }

    /// Drive the hold; returns true on the tick the reset ran.
    pub fn advance(
        &mut self,
        dt: f32,
        prefs: &mut dyn PrefsStore,
        scenes: &mut dyn SceneSurface,
    ) -> bool {
        let fired = self.scheduler.advance(dt);
        match self.reset {
            Some(task) if fired.contains(&task) => {
                self.reset = None;
                prefs.clear_all();
                scenes.load(SceneId::MainMenu);
                true
            }
            _ => false,
        }
    }
}

impl Default for EndScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::{LogAds, NullAds};
    use crate::audio::NullAudio;
    use crate::prefs::MemoryPrefs;
    use crate::scene::LogScenes;

    #[test]
    fn test_gate_runs_immediately_when_no_ad_ready() {
        let mut ads = NullAds;
        let mut ran = false;
        gate_on_interstitial(&mut ads, Box::new(|| ran = true));
        assert!(ran);
    }

    #[test]
    fn test_gate_runs_as_interstitial_callback() {
        let mut ads = LogAds::default();
        let mut ran = false;
        gate_on_interstitial(&mut ads, Box::new(|| ran = true));
        assert!(ran);
    }

    #[test]
    fn test_play_pressed_uses_last_level() {
        let mut prefs = MemoryPrefs::new();
        let mut scenes = LogScenes::default();
        let mut audio = NullAudio;

        play_pressed(&prefs, &mut scenes, &mut audio);
        assert_eq!(scenes.history, vec![SceneId::Level(1)]);

        prefs.set_string(LAST_LEVEL_KEY, "Level3");
        play_pressed(&prefs, &mut scenes, &mut audio);
        assert_eq!(scenes.history[1], SceneId::Level(3));

        // Garbage resume points fall back to the first stage
        prefs.set_string(LAST_LEVEL_KEY, "End");
        play_pressed(&prefs, &mut scenes, &mut audio);
        assert_eq!(scenes.history[2], SceneId::Level(1));
    }

    #[test]
    fn test_stage_advance_and_final_rollover() {
        let mut prefs = MemoryPrefs::new();
        let mut ads = NullAds;
        let mut scenes = LogScenes::default();
        let mut audio = NullAudio;

        next_stage_pressed(
            SceneId::Level(1),
            &mut prefs,
            &mut ads,
            &mut scenes,
            &mut audio,
        );
        assert_eq!(scenes.history, vec![SceneId::Level(2)]);
        assert_eq!(prefs.get_string(LAST_LEVEL_KEY, ""), "Level2");

        next_stage_pressed(
            SceneId::Level(4),
            &mut prefs,
            &mut ads,
            &mut scenes,
            &mut audio,
        );
        assert_eq!(scenes.history[1], SceneId::End);
        assert_eq!(prefs.get_string(LAST_LEVEL_KEY, ""), "Level1");
    }

    #[test]
    fn test_retry_reloads_current_stage() {
        let mut ads = LogAds::default();
        let mut scenes = LogScenes::default();
        let mut audio = NullAudio;

        retry_pressed(SceneId::Level(2), &mut ads, &mut scenes, &mut audio);
        assert_eq!(scenes.history, vec![SceneId::Level(2)]);
    }

    #[test]
    fn test_enter_stage_records_resume_point() {
        let mut prefs = MemoryPrefs::new();
        let mut ads = NullAds;
        enter_stage(SceneId::Level(2), &mut prefs, &mut ads);
        assert_eq!(prefs.get_string(LAST_LEVEL_KEY, ""), "Level2");
    }

    #[test]
    fn test_end_screen_wipes_after_hold() {
        let mut prefs = MemoryPrefs::new();
        prefs.set_string(LAST_LEVEL_KEY, "Level4");
        let mut scenes = LogScenes::default();
        let mut screen = EndScreen::new();

        assert!(!screen.advance(consts::END_SCREEN_DELAY - 1.0, &mut prefs, &mut scenes));
        assert!(prefs.has_key(LAST_LEVEL_KEY));

        assert!(screen.advance(1.0, &mut prefs, &mut scenes));
        assert!(!prefs.has_key(LAST_LEVEL_KEY));
        assert_eq!(scenes.history, vec![SceneId::MainMenu]);

        // The reset runs once
        assert!(!screen.advance(100.0, &mut prefs, &mut scenes));
        assert_eq!(scenes.history.len(), 1);
    }
}
