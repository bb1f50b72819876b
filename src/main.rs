//! Meteor Rush entry point
//!
//! Headless demo driver: runs one scripted stage at a fixed timestep with
//! log-backed collaborator surfaces, an auto-player on the elimination
//! input, and the full menu/stage flow around the session.

use meteor_rush::ads::LogAds;
use meteor_rush::audio::LogAudio;
use meteor_rush::consts::{MAX_SUBSTEPS, SIM_DT};
use meteor_rush::flow;
use meteor_rush::prefs::MemoryPrefs;
use meteor_rush::scene::{LogScenes, SceneId};
use meteor_rush::sim::{NullPanels, ObstacleId, Session, SessionConfig, SessionState};

/// Seconds of simulated time between auto-player eliminations
const AUTO_FIRE_PERIOD: f32 = 0.9;
/// Simulated render frame length
const FRAME_DT: f32 = 1.0 / 60.0;

/// The obstacle closest to the escape line, the one a player would tap
fn most_urgent(session: &Session) -> Option<ObstacleId> {
    session
        .pool()
        .in_flight_ids()
        .into_iter()
        .min_by(|a, b| {
            let ya = session.pool().get(*a).pos().y;
            let yb = session.pool().get(*b).pos().y;
            ya.partial_cmp(&yb).unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn main() {
    env_logger::init();
    log::info!("Meteor Rush (headless demo) starting...");

    let mut prefs = MemoryPrefs::new();
    let mut menu_audio = LogAudio::new();
    let mut scenes = LogScenes::default();
    let mut ads = LogAds::default();

    // Menu: restore settings, pick the stage to play
    let settings = flow::enter_menu(&prefs, &mut menu_audio);
    log::info!(
        "settings: volume {:.2}, vibration {}",
        settings.volume,
        settings.vibration
    );
    flow::play_pressed(&prefs, &mut scenes, &mut menu_audio);
    let stage = *scenes.history.last().unwrap_or(&SceneId::Level(1));
    flow::enter_stage(stage, &mut prefs, &mut ads);

    // The session takes its own surfaces; the demo reuses the log mixer
    let mut session = match Session::new(
        SessionConfig {
            duration: 30.0,
            seed: 42,
            ..SessionConfig::default()
        },
        Box::new(menu_audio),
        Box::new(NullPanels),
        Box::new(LogScenes::default()),
    ) {
        Ok(session) => session,
        Err(err) => {
            log::error!("session construction failed: {err}");
            return;
        }
    };

    // Fixed-timestep accumulator loop over simulated frames
    let mut accumulator = 0.0f32;
    let mut elapsed = 0.0f32;
    let mut next_auto_fire = AUTO_FIRE_PERIOD;
    let mut paused_once = false;

    while !session.state().is_terminal() && elapsed < 120.0 {
        accumulator += FRAME_DT;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            session.advance(SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }
        elapsed += FRAME_DT;

        // Demonstrate the pause input once, mid-run
        if !paused_once && elapsed >= 5.0 {
            paused_once = true;
            session.toggle_pause();
            for _ in 0..30 {
                session.advance(SIM_DT); // frozen; nothing moves
            }
            session.toggle_pause();
        }

        if session.state() == SessionState::Active && elapsed >= next_auto_fire {
            next_auto_fire += AUTO_FIRE_PERIOD;
            if let Some(id) = most_urgent(&session) {
                session.eliminate(id);
            }
        }
    }

    flow::leave_stage(&mut ads);

    println!(
        "session finished: {:?}, score {}, spawn interval {:.3}s",
        session.state(),
        session.score(),
        session.spawn_interval()
    );
}
