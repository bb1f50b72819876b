//! Fixed-capacity obstacle pool
//!
//! All obstacles are allocated up front; gameplay only moves ids between
//! the available queue and the in-flight set. FIFO reuse keeps recycling
//! round-robin. Invariant: every slot is either available or in-flight,
//! never both, so `available_count + in_flight_count == capacity` holds at
//! every observation point.

use std::collections::VecDeque;

use super::obstacle::{Obstacle, ObstacleId};
use super::ConfigError;

/// Bounded reservoir of reusable obstacles
#[derive(Debug)]
pub struct ObstaclePool {
    slots: Vec<Obstacle>,
    available: VecDeque<ObstacleId>,
    in_flight: Vec<bool>,
}

impl ObstaclePool {
    /// Pre-allocate `capacity` inactive obstacles. The capacity is fixed
    /// for the session; a zero capacity is a configuration error.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::EmptyPool);
        }
        Ok(Self {
            slots: (0..capacity).map(|_| Obstacle::new()).collect(),
            available: (0..capacity as u32).map(ObstacleId).collect(),
            in_flight: vec![false; capacity],
        })
    }

    /// Take the head of the available queue, or None when exhausted.
    ///
    /// Exhaustion is expected under load; the caller skips the spawn
    /// instead of growing the pool.
    pub fn acquire(&mut self) -> Option<ObstacleId> {
        let id = self.available.pop_front()?;
        self.in_flight[id.index()] = true;
        Some(id)
    }

    /// Deactivate an in-flight obstacle and append it to the available
    /// queue. Returns false on a double release or a foreign id.
    pub fn release(&mut self, id: ObstacleId) -> bool {
        match self.in_flight.get(id.index()) {
            Some(true) => {}
            _ => {
                log::debug!("release of obstacle {:?} not tracked in-flight ignored", id);
                return false;
            }
        }
        self.in_flight[id.index()] = false;
        self.slots[id.index()].deactivate();
        self.available.push_back(id);
        true
    }

    pub fn get(&self, id: ObstacleId) -> &Obstacle {
        &self.slots[id.index()]
    }

    pub fn get_mut(&mut self, id: ObstacleId) -> &mut Obstacle {
        &mut self.slots[id.index()]
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.iter().filter(|flying| **flying).count()
    }

    /// Snapshot of the in-flight ids, safe to iterate while releasing.
    pub fn in_flight_ids(&self) -> Vec<ObstacleId> {
        self.in_flight
            .iter()
            .enumerate()
            .filter(|(_, flying)| **flying)
            .map(|(i, _)| ObstacleId(i as u32))
            .collect()
    }
}
