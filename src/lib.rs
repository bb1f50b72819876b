//! Meteor Rush - a short falling-obstacle arcade session
//!
//! Core modules:
//! - `sim`: Deterministic session core (obstacle pool, spawn scheduling, state machine)
//! - `audio`: Fire-and-forget audio surface consumed by the session
//! - `ads`: Banner/interstitial ad surface for stage gating
//! - `scene`: Scene navigation surface and stage identifiers
//! - `prefs`: Persisted scalar key-value store
//! - `settings`: Player settings (volume, vibration) over the pref store
//! - `flow`: Menu / stage-progression / end-screen glue

pub mod ads;
pub mod audio;
pub mod flow;
pub mod prefs;
pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{ObstaclePool, Session, SessionConfig, SessionState};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth motion)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Session length in seconds; the player wins by outlasting it
    pub const GAME_DURATION: f32 = 10.0;
    /// Countdown granularity (whole seconds, like the HUD timer)
    pub const COUNTDOWN_STEP: f32 = 1.0;

    /// Seconds between spawns at session start
    pub const INITIAL_SPAWN_INTERVAL: f32 = 2.0;
    /// Seconds between difficulty escalations
    pub const ESCALATION_INTERVAL: f32 = 5.0;
    /// Each escalation divides the spawn interval by this
    pub const SPAWN_RATE_DIVISOR: f32 = 1.2;
    /// Spawn interval floor; escalation clamps here
    pub const MIN_SPAWN_INTERVAL: f32 = 0.5;

    /// Pre-allocated obstacle count; the pool never grows
    pub const POOL_CAPACITY: usize = 3;
    /// Maximum simultaneous in-flight obstacles
    pub const MAX_IN_FLIGHT: usize = 3;
    /// Obstacles spawned immediately when a session starts
    pub const INITIAL_SPAWN_COUNT: usize = 0;

    /// Vertical spawn position along the fall axis
    pub const SPAWN_HEIGHT: f32 = 6.0;
    /// Spawn x is uniform in [-SPAWN_HALF_WIDTH, SPAWN_HALF_WIDTH]
    pub const SPAWN_HALF_WIDTH: f32 = 2.5;
    /// An obstacle at or below this y has escaped
    pub const ESCAPE_LINE: f32 = -6.0;

    /// Fall speed every obstacle resets to on spawn (units/second)
    pub const BASE_FALL_SPEED: f32 = 3.0;
    /// Speed added to each in-flight obstacle per escalation
    pub const FALL_SPEED_STEP: f32 = 0.5;

    /// Score per eliminated obstacle
    pub const ELIMINATION_REWARD: u32 = 5;

    /// Delay before falling back to the menu when no terminal panel exists
    pub const MENU_FALLBACK_DELAY: f32 = 2.0;
    /// Hold on the end screen before wiping prefs and returning to the menu
    pub const END_SCREEN_DELAY: f32 = 10.0;
}
