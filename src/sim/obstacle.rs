//! Falling obstacle entity
//!
//! Obstacles are created once at pool initialization and recycled for the
//! whole session. An obstacle is either pooled (inactive, owned by the
//! pool's available queue) or in-flight (active, tracked by the session).

use glam::Vec2;

/// Stable identity of a pooled obstacle slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObstacleId(pub(crate) u32);

impl ObstacleId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Terminal event an in-flight obstacle reports back to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleEvent {
    /// Crossed the lower boundary; the session loses
    Escaped,
}

/// A reusable falling obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pos: Vec2,
    speed: f32,
    active: bool,
}

impl Obstacle {
    pub(crate) fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            speed: 0.0,
            active: false,
        }
    }

    /// Transition pooled -> in-flight, resetting position and fall speed.
    ///
    /// Returns false (and leaves the obstacle untouched) if it is already
    /// in-flight.
    pub fn activate(&mut self, spawn_pos: Vec2, fall_speed: f32) -> bool {
        if self.active {
            log::debug!("activate on an in-flight obstacle ignored");
            return false;
        }
        self.pos = spawn_pos;
        self.speed = fall_speed;
        self.active = true;
        true
    }

    /// Return to the pooled state. Position is meaningless until the next
    /// `activate`.
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    /// Advance the fall by `speed * dt`; reports `Escaped` once the lower
    /// boundary is crossed. The session owns the pool, so termination is
    /// mediated there rather than here.
    pub fn tick(&mut self, dt: f32, escape_line: f32) -> Option<ObstacleEvent> {
        if !self.active {
            return None;
        }
        self.pos.y -= self.speed * dt;
        if self.pos.y <= escape_line {
            return Some(ObstacleEvent::Escaped);
        }
        None
    }

    /// Add `delta` to the current fall speed. No-op while pooled, so an
    /// escalation tick cannot touch a just-recycled instance.
    pub fn increase_speed(&mut self, delta: f32) {
        if !self.active {
            log::debug!("increase_speed on a pooled obstacle ignored");
            return;
        }
        self.speed += delta;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_resets_state() {
        let mut obs = Obstacle::new();
        assert!(obs.activate(Vec2::new(1.0, 6.0), 3.0));
        assert!(obs.is_active());
        assert_eq!(obs.pos(), Vec2::new(1.0, 6.0));
        assert_eq!(obs.speed(), 3.0);
    }

    #[test]
    fn test_double_activate_is_rejected() {
        let mut obs = Obstacle::new();
        assert!(obs.activate(Vec2::new(0.0, 6.0), 3.0));
        assert!(!obs.activate(Vec2::new(9.0, 9.0), 99.0));
        // First activation wins
        assert_eq!(obs.pos(), Vec2::new(0.0, 6.0));
        assert_eq!(obs.speed(), 3.0);
    }

    #[test]
    fn test_tick_falls_and_escapes() {
        let mut obs = Obstacle::new();
        obs.activate(Vec2::new(0.0, 6.0), 4.0);

        assert_eq!(obs.tick(1.0, -6.0), None);
        assert_eq!(obs.pos().y, 2.0);

        assert_eq!(obs.tick(1.0, -6.0), None);
        assert_eq!(obs.tick(1.0, -6.0), Some(ObstacleEvent::Escaped));
    }

    #[test]
    fn test_pooled_obstacle_ignores_ticks_and_boosts() {
        let mut obs = Obstacle::new();
        assert_eq!(obs.tick(1.0, -6.0), None);

        obs.increase_speed(2.0);
        assert_eq!(obs.speed(), 0.0);

        obs.activate(Vec2::new(0.0, 6.0), 3.0);
        obs.increase_speed(0.5);
        assert_eq!(obs.speed(), 3.5);

        obs.deactivate();
        obs.increase_speed(0.5);
        assert_eq!(obs.speed(), 3.5);
    }
}
