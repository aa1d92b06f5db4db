//! Respawn schedule shared by the entity pools.
//!
//! One optional remaining delay per pool slot. The owning pool advances it
//! by the frame delta at the start of its update and reactivates whatever
//! slots come due. Delays are kept in f64 so hundreds of f32 frame deltas
//! still land on the right frame. Once cancelled the schedule holds
//! nothing and refuses new entries, so nothing can respawn after teardown.

/// Slack for float accumulation when a delay is built from many frame deltas.
pub const RESPAWN_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct RespawnSchedule {
    remaining: Vec<Option<f64>>,
    cancelled: bool,
}

impl RespawnSchedule {
    pub fn new(slots: usize) -> Self {
        Self {
            remaining: vec![None; slots],
            cancelled: false,
        }
    }

    /// Schedule `slot` to come due after `delay` seconds.
    ///
    /// Returns false if the slot already has a pending timer, is out of
    /// range, or the schedule was cancelled.
    pub fn schedule(&mut self, slot: usize, delay: f32) -> bool {
        if self.cancelled {
            return false;
        }
        match self.remaining.get_mut(slot) {
            Some(entry @ None) => {
                *entry = Some(f64::from(delay.max(0.0)));
                true
            }
            _ => false,
        }
    }

    /// Advance every pending timer by `delta` and return the slots now due.
    pub fn advance(&mut self, delta: f32) -> Vec<usize> {
        if self.cancelled {
            return Vec::new();
        }

        let mut due = Vec::new();
        for (slot, entry) in self.remaining.iter_mut().enumerate() {
            if let Some(left) = entry {
                *left -= f64::from(delta);
                if *left <= RESPAWN_EPSILON {
                    *entry = None;
                    due.push(slot);
                }
            }
        }
        due
    }

    pub fn is_pending(&self, slot: usize) -> bool {
        matches!(self.remaining.get(slot), Some(Some(_)))
    }

    pub fn remaining(&self, slot: usize) -> Option<f32> {
        self.remaining.get(slot).copied().flatten().map(|r| r as f32)
    }

    pub fn pending_count(&self) -> usize {
        self.remaining.iter().filter(|r| r.is_some()).count()
    }

    /// Drop every pending timer and stop accepting new ones.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending_count();
        self.remaining.iter_mut().for_each(|r| *r = None);
        self.cancelled = true;
        dropped
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Clear timers and accept new ones again (fresh session).
    pub fn reset(&mut self) {
        self.remaining.iter_mut().for_each(|r| *r = None);
        self.cancelled = false;
    }
}
