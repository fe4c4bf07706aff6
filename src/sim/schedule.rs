//! Cancellable delayed actions
//!
//! Wave transitions and the tutorial rift attempt spawn their target after a
//! fixed delay. Starting, restarting or ending a game cancels everything
//! pending so a stale spawn can never fire into a reset state.

use serde::{Deserialize, Serialize};

/// What a delayed action does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayedAction {
    /// First target of the current wave
    SpawnWaveTarget,
    /// Guided tutorial target
    SpawnTutorialTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Pending {
    /// Tick at which the action fires
    fire_at: u64,
    action: DelayedAction,
}

/// Tick-driven scheduler (sorted by fire time, FIFO for ties)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<Pending>,
}

impl Scheduler {
    /// Schedule `action` to fire `delay_ticks` after `now`
    pub fn schedule(&mut self, now: u64, delay_ticks: u32, action: DelayedAction) {
        let fire_at = now + delay_ticks as u64;
        let idx = self.pending.partition_point(|p| p.fire_at <= fire_at);
        self.pending.insert(idx, Pending { fire_at, action });
    }

    /// Drop every pending action
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Cancelled {} pending action(s)", self.pending.len());
        }
        self.pending.clear();
    }

    /// Remove and return actions due at or before `now`, in order
    pub fn take_due(&mut self, now: u64) -> Vec<DelayedAction> {
        let split = self.pending.partition_point(|p| p.fire_at <= now);
        self.pending.drain(..split).map(|p| p.action).collect()
    }

    pub fn is_pending(&self, action: DelayedAction) -> bool {
        self.pending.iter().any(|p| p.action == action)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
