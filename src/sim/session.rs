//! Session controller
//!
//! Owns the state machine, the countdown, the spawn-rate escalation
//! schedule and the score. Everything is driven from a single `advance`
//! entry point on one control thread; the scheduler's tasks are the only
//! "suspended" work, and they are all canceled the instant the session
//! terminates.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ConfigError;
use super::obstacle::{ObstacleEvent, ObstacleId};
use super::pool::ObstaclePool;
use super::scheduler::{Scheduler, TaskHandle};
use crate::audio::{AudioSurface, Music, Sfx};
use crate::consts;
use crate::scene::{SceneId, SceneSurface};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Gameplay running
    Active,
    /// Frozen; timers and spawns hold their remaining delays
    Paused,
    /// Timer expired with nothing escaped. Terminal.
    Won,
    /// An obstacle crossed the escape line. Terminal.
    Lost,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Won | SessionState::Lost)
    }
}

/// HUD and terminal panels. The booleans report whether a panel exists;
/// when none does, the session falls back to menu navigation after a
/// fixed delay.
pub trait PanelSurface {
    fn refresh(&mut self, score: u32, time_remaining: f32);
    fn show_win_panel(&mut self) -> bool;
    fn show_loss_panel(&mut self) -> bool;
    fn set_pause_panel(&mut self, visible: bool);
}

/// Panel-less UI; every terminal transition falls back to the menu
#[derive(Debug, Default)]
pub struct NullPanels;

impl PanelSurface for NullPanels {
    fn refresh(&mut self, _score: u32, _time_remaining: f32) {}

    fn show_win_panel(&mut self) -> bool {
        false
    }

    fn show_loss_panel(&mut self) -> bool {
        false
    }

    fn set_pause_panel(&mut self, _visible: bool) {}
}

/// Session tunables. Validated once at construction; nothing after that
/// can fail fatally.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Seconds the player must survive to win
    pub duration: f32,
    /// Seconds between spawns at session start
    pub initial_spawn_interval: f32,
    /// Seconds between difficulty escalations
    pub escalation_interval: f32,
    /// Each escalation divides the spawn interval by this (> 1)
    pub spawn_rate_divisor: f32,
    /// Spawn interval never drops below this
    pub min_spawn_interval: f32,
    /// Pre-allocated obstacle count, fixed for the session
    pub pool_capacity: usize,
    /// Concurrency cap, independent of pool capacity
    pub max_in_flight: usize,
    /// Obstacles spawned immediately at session start
    pub initial_spawn_count: usize,
    /// Vertical spawn position
    pub spawn_height: f32,
    /// Spawn x is uniform in [-spawn_half_width, spawn_half_width]
    pub spawn_half_width: f32,
    /// Crossing this y loses the session
    pub escape_line: f32,
    /// Fall speed every spawn resets to
    pub base_fall_speed: f32,
    /// Speed added to in-flight obstacles per escalation
    pub fall_speed_step: f32,
    /// Score per elimination
    pub elimination_reward: u32,
    /// Menu navigation delay when no terminal panel exists
    pub menu_fallback_delay: f32,
    /// Spawn-position RNG seed
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration: consts::GAME_DURATION,
            initial_spawn_interval: consts::INITIAL_SPAWN_INTERVAL,
            escalation_interval: consts::ESCALATION_INTERVAL,
            spawn_rate_divisor: consts::SPAWN_RATE_DIVISOR,
            min_spawn_interval: consts::MIN_SPAWN_INTERVAL,
            pool_capacity: consts::POOL_CAPACITY,
            max_in_flight: consts::MAX_IN_FLIGHT,
            initial_spawn_count: consts::INITIAL_SPAWN_COUNT,
            spawn_height: consts::SPAWN_HEIGHT,
            spawn_half_width: consts::SPAWN_HALF_WIDTH,
            escape_line: consts::ESCAPE_LINE,
            base_fall_speed: consts::BASE_FALL_SPEED,
            fall_speed_step: consts::FALL_SPEED_STEP,
            elimination_reward: consts::ELIMINATION_REWARD,
            menu_fallback_delay: consts::MENU_FALLBACK_DELAY,
            seed: 0,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_capacity == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::NonPositive("concurrency cap"));
        }
        if self.duration <= 0.0 {
            return Err(ConfigError::NonPositive("duration"));
        }
        if self.initial_spawn_interval <= 0.0 {
            return Err(ConfigError::NonPositive("initial spawn interval"));
        }
        if self.escalation_interval <= 0.0 {
            return Err(ConfigError::NonPositive("escalation interval"));
        }
        if self.min_spawn_interval <= 0.0 {
            return Err(ConfigError::NonPositive("minimum spawn interval"));
        }
        if self.base_fall_speed <= 0.0 {
            return Err(ConfigError::NonPositive("base fall speed"));
        }
        if self.spawn_rate_divisor <= 1.0 {
            return Err(ConfigError::DivisorNotAboveOne);
        }
        Ok(())
    }
}

/// One escalation step: divide, then clamp to the floor
fn next_spawn_interval(current: f32, divisor: f32, floor: f32) -> f32 {
    (current / divisor).max(floor)
}

/// The running game session
pub struct Session {
    config: SessionConfig,
    state: SessionState,
    score: u32,
    time_remaining: f32,
    spawn_interval: f32,
    pool: ObstaclePool,
    scheduler: Scheduler,
    rng: Pcg32,
    spawn_task: Option<TaskHandle>,
    countdown_task: Option<TaskHandle>,
    escalation_task: Option<TaskHandle>,
    menu_fallback_task: Option<TaskHandle>,
    audio: Box<dyn AudioSurface>,
    panels: Box<dyn PanelSurface>,
    scenes: Box<dyn SceneSurface>,
}

impl Session {
    /// Construct a session and enter Active. The collaborator surfaces
    /// are injected here; there is no ambient global instance.
    pub fn new(
        config: SessionConfig,
        audio: Box<dyn AudioSurface>,
        panels: Box<dyn PanelSurface>,
        scenes: Box<dyn SceneSurface>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self {
            state: SessionState::Active,
            score: 0,
            time_remaining: config.duration,
            spawn_interval: config.initial_spawn_interval,
            pool: ObstaclePool::new(config.pool_capacity)?,
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(config.seed),
            spawn_task: None,
            countdown_task: None,
            escalation_task: None,
            menu_fallback_task: None,
            audio,
            panels,
            scenes,
            config,
        };
        session.start();
        Ok(session)
    }

    /// Re-initialize from the stored config: fresh pool, fresh scheduler,
    /// reseeded RNG. Nothing of the previous run survives.
    pub fn restart(&mut self) {
        let pool = match ObstaclePool::new(self.config.pool_capacity) {
            Ok(pool) => pool,
            Err(err) => {
                log::warn!("restart refused: {err}");
                return;
            }
        };
        self.pool = pool;
        self.scheduler = Scheduler::new();
        self.rng = Pcg32::seed_from_u64(self.config.seed);
        self.spawn_task = None;
        self.countdown_task = None;
        self.escalation_task = None;
        self.menu_fallback_task = None;
        self.state = SessionState::Active;
        self.score = 0;
        self.time_remaining = self.config.duration;
        self.spawn_interval = self.config.initial_spawn_interval;
        self.start();
    }

    fn start(&mut self) {
        self.countdown_task = Some(self.scheduler.schedule_repeating(consts::COUNTDOWN_STEP));
        self.spawn_task = Some(self.scheduler.schedule_repeating(self.spawn_interval));
        self.escalation_task = Some(
            self.scheduler
                .schedule_repeating(self.config.escalation_interval),
        );
        for _ in 0..self.config.initial_spawn_count {
            self.try_spawn();
        }
        self.audio.play_music(Music::Gameplay);
        self.panels.refresh(self.score, self.time_remaining);
        log::info!(
            "session started: {}s, spawn every {}s",
            self.config.duration,
            self.spawn_interval
        );
    }

    /// Single per-tick entry point. No-op while Paused, which freezes
    /// every scheduled delay exactly where it was.
    pub fn advance(&mut self, dt: f32) {
        if self.state == SessionState::Paused {
            return;
        }
        for handle in self.scheduler.advance(dt) {
            self.dispatch(handle);
        }
        if self.state == SessionState::Active {
            self.fall_obstacles(dt);
        }
    }

    fn dispatch(&mut self, handle: TaskHandle) {
        if Some(handle) == self.spawn_task {
            self.try_spawn();
        } else if Some(handle) == self.countdown_task {
            self.countdown_tick();
        } else if Some(handle) == self.escalation_task {
            self.escalate();
        } else if Some(handle) == self.menu_fallback_task {
            self.menu_fallback_task = None;
            self.scenes.load(SceneId::MainMenu);
        } else {
            // Fired in the same frame its owner slot was cleared; the
            // terminal cleanup already ran, so this self-cancels.
            log::debug!("stale task {:?} ignored", handle);
        }
    }

    /// Spawn one obstacle if the session is Active, the concurrency cap
    /// has room and the pool has an instance. Both the cap and pool
    /// exhaustion skip silently; that is expected under load.
    fn try_spawn(&mut self) {
        if self.state != SessionState::Active {
            log::debug!("spawn tick in {:?} ignored", self.state);
            return;
        }
        if self.pool.in_flight_count() >= self.config.max_in_flight {
            return;
        }
        let Some(id) = self.pool.acquire() else {
            log::trace!("pool exhausted, spawn skipped");
            return;
        };
        let x = self
            .rng
            .random_range(-self.config.spawn_half_width..=self.config.spawn_half_width);
        self.pool
            .get_mut(id)
            .activate(Vec2::new(x, self.config.spawn_height), self.config.base_fall_speed);
    }

    fn countdown_tick(&mut self) {
        if self.state != SessionState::Active {
            log::debug!("countdown tick in {:?} ignored", self.state);
            return;
        }
        self.time_remaining = (self.time_remaining - consts::COUNTDOWN_STEP).max(0.0);
        self.panels.refresh(self.score, self.time_remaining);
        if self.time_remaining <= 0.0 {
            self.finish(SessionState::Won);
        }
    }

    /// Difficulty ramp: shrink the spawn interval (clamped to the floor),
    /// re-arm the spawn timer at the new cadence, and speed up every
    /// obstacle already in flight - arrival rate and fall speed escalate
    /// together.
    fn escalate(&mut self) {
        if self.state != SessionState::Active {
            log::debug!("escalation tick in {:?} ignored", self.state);
            return;
        }
        self.spawn_interval = next_spawn_interval(
            self.spawn_interval,
            self.config.spawn_rate_divisor,
            self.config.min_spawn_interval,
        );
        if let Some(task) = self.spawn_task {
            self.scheduler.reschedule(task, self.spawn_interval);
        }
        for id in self.pool.in_flight_ids() {
            self.pool.get_mut(id).increase_speed(self.config.fall_speed_step);
        }
        log::info!("spawn interval now {:.3}s", self.spawn_interval);
    }

    fn fall_obstacles(&mut self, dt: f32) {
        for id in self.pool.in_flight_ids() {
            let obstacle = self.pool.get_mut(id);
            if !obstacle.is_active() {
                continue;
            }
            if let Some(ObstacleEvent::Escaped) = obstacle.tick(dt, self.config.escape_line) {
                self.finish(SessionState::Lost);
                return;
            }
        }
    }

    /// Player interaction entry point: eliminate an in-flight obstacle.
    pub fn eliminate(&mut self, id: ObstacleId) {
        if self.state != SessionState::Active {
            log::debug!("eliminate in {:?} ignored", self.state);
            return;
        }
        if !self.pool.release(id) {
            return;
        }
        self.score += self.config.elimination_reward;
        self.audio.play_sfx(Sfx::ObstacleDestroyed);
        self.panels.refresh(self.score, self.time_remaining);
    }

    /// Pause input entry point. Idempotent: pausing anything but an
    /// Active session is a no-op.
    pub fn pause(&mut self) {
        if self.state != SessionState::Active {
            log::debug!("pause in {:?} ignored", self.state);
            return;
        }
        self.state = SessionState::Paused;
        self.audio.pause_music();
        self.panels.set_pause_panel(true);
    }

    /// Resume input entry point. Idempotent: resuming anything but a
    /// Paused session is a no-op.
    pub fn resume(&mut self) {
        if self.state != SessionState::Paused {
            log::debug!("resume in {:?} ignored", self.state);
            return;
        }
        self.audio.play_sfx(Sfx::ButtonClick);
        self.state = SessionState::Active;
        self.audio.resume_music();
        self.panels.set_pause_panel(false);
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Active => self.pause(),
            SessionState::Paused => self.resume(),
            _ => log::debug!("pause toggle in {:?} ignored", self.state),
        }
    }

    /// Terminal transition, strictly ordered: flip state, cancel every
    /// pending task, recall the in-flight obstacles over a snapshot, and
    /// only then notify collaborators - nothing a user does on a terminal
    /// panel can reach a half-cleaned session.
    fn finish(&mut self, terminal: SessionState) {
        self.state = terminal;

        self.scheduler.cancel_all();
        self.spawn_task = None;
        self.countdown_task = None;
        self.escalation_task = None;

        for id in self.pool.in_flight_ids() {
            self.pool.release(id);
        }

        self.audio.stop_music();
        let has_panel = if terminal == SessionState::Won {
            self.audio.play_sfx(Sfx::Win);
            self.panels.show_win_panel()
        } else {
            self.audio.play_sfx(Sfx::GameOver);
            self.panels.show_loss_panel()
        };
        if !has_panel {
            log::warn!(
                "no terminal panel, returning to menu in {}s",
                self.config.menu_fallback_delay
            );
            self.menu_fallback_task =
                Some(self.scheduler.schedule_once(self.config.menu_fallback_delay));
        }
        log::info!("session over: {:?}, score {}", terminal, self.score);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    pub fn in_flight_count(&self) -> usize {
        self.pool.in_flight_count()
    }

    pub fn pool(&self) -> &ObstaclePool {
        &self.pool
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
