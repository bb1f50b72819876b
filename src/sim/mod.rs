//! Deterministic session core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No allocation during play (obstacles are pooled up front)
//! - No rendering or platform dependencies

pub mod obstacle;
pub mod pool;
pub mod scheduler;
pub mod session;

pub use obstacle::{Obstacle, ObstacleEvent, ObstacleId};
pub use pool::ObstaclePool;
pub use scheduler::{Scheduler, TaskHandle};
pub use session::{NullPanels, PanelSurface, Session, SessionConfig, SessionState};

use std::error::Error;
use std::fmt;

/// Fatal construction-time configuration problem; the session cannot start.
///
/// Everything that can go wrong after construction degrades to a no-op
/// instead (see the guards in `pool` and `session`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Pool capacity must be at least 1
    EmptyPool,
    /// Named scalar field must be strictly positive
    NonPositive(&'static str),
    /// Spawn-rate divisor must be greater than 1 for the interval to shrink
    DivisorNotAboveOne,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPool => write!(f, "pool capacity must be at least 1"),
            ConfigError::NonPositive(field) => write!(f, "{field} must be positive"),
            ConfigError::DivisorNotAboveOne => {
                write!(f, "spawn rate divisor must be greater than 1")
            }
        }
    }
}

impl Error for ConfigError {}
